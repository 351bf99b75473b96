//! Recursive-descent parser for label expressions.

use crate::atom::{is_atom_char, LabelAtom};
use crate::error::LabelError;
use crate::expr::LabelExpr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Atom(String),
    Not,
    And,
    Or,
    Implies,
    Iff,
    LParen,
    RParen,
}

impl Token {
    fn text(&self) -> String {
        match self {
            Token::Atom(name) => name.clone(),
            Token::Not => "!".to_string(),
            Token::And => "&&".to_string(),
            Token::Or => "||".to_string(),
            Token::Implies => "->".to_string(),
            Token::Iff => "<->".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Parses a label expression from text.
pub fn parse_expr(input: &str) -> Result<LabelExpr, LabelError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(LabelError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.iff()?;

    if let Some((token, offset)) = parser.tokens.get(parser.pos) {
        return Err(LabelError::UnexpectedToken {
            found: token.text(),
            offset: *offset,
            expected: "end of expression",
        });
    }

    Ok(expr)
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, LabelError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '!' => {
                chars.next();
                Token::Not
            }
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            '&' | '|' => {
                chars.next();
                match chars.next() {
                    Some((_, next)) if next == c => {
                        if c == '&' {
                            Token::And
                        } else {
                            Token::Or
                        }
                    }
                    _ => return Err(LabelError::UnexpectedChar { ch: c, offset }),
                }
            }
            '<' => {
                chars.next();
                match (chars.next(), chars.next()) {
                    (Some((_, '-')), Some((_, '>'))) => Token::Iff,
                    _ => return Err(LabelError::UnexpectedChar { ch: c, offset }),
                }
            }
            '-' if input[offset + 1..].starts_with('>') => {
                chars.next();
                chars.next();
                Token::Implies
            }
            '"' => {
                chars.next();
                Token::Atom(quoted(&mut chars, offset)?)
            }
            c if is_atom_char(c) => {
                let mut name = String::new();
                while let Some(&(i, c)) = chars.peek() {
                    if !is_atom_char(c) || (c == '-' && input[i + 1..].starts_with('>')) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                Token::Atom(name)
            }
            _ => return Err(LabelError::UnexpectedChar { ch: c, offset }),
        };

        tokens.push((token, offset));
    }

    Ok(tokens)
}

fn quoted(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    start: usize,
) -> Result<String, LabelError> {
    let mut name = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '"' => return Ok(name),
            '\\' => match chars.next() {
                Some((_, escaped)) => name.push(escaped),
                None => break,
            },
            c => name.push(c),
        }
    }
    Err(LabelError::UnterminatedQuote { offset: start })
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn iff(&mut self) -> Result<LabelExpr, LabelError> {
        let mut lhs = self.implies()?;
        while self.eat(&Token::Iff) {
            lhs = LabelExpr::iff(lhs, self.implies()?);
        }
        Ok(lhs)
    }

    fn implies(&mut self) -> Result<LabelExpr, LabelError> {
        let mut lhs = self.or()?;
        while self.eat(&Token::Implies) {
            lhs = LabelExpr::implies(lhs, self.or()?);
        }
        Ok(lhs)
    }

    fn or(&mut self) -> Result<LabelExpr, LabelError> {
        let mut lhs = self.and()?;
        while self.eat(&Token::Or) {
            lhs = LabelExpr::or(lhs, self.and()?);
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<LabelExpr, LabelError> {
        let mut lhs = self.unary()?;
        while self.eat(&Token::And) {
            lhs = LabelExpr::and(lhs, self.unary()?);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<LabelExpr, LabelError> {
        if self.eat(&Token::Not) {
            return Ok(LabelExpr::not(self.unary()?));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<LabelExpr, LabelError> {
        let Some((token, offset)) = self.tokens.get(self.pos).cloned() else {
            return Err(LabelError::UnexpectedEnd {
                expected: "a label or '('",
            });
        };
        self.pos += 1;

        match token {
            Token::Atom(name) => Ok(LabelExpr::Atom(LabelAtom::new(name))),
            Token::LParen => {
                let inner = self.iff()?;
                match self.tokens.get(self.pos) {
                    Some((Token::RParen, _)) => {
                        self.pos += 1;
                        Ok(LabelExpr::paren(inner))
                    }
                    Some((other, offset)) => Err(LabelError::UnexpectedToken {
                        found: other.text(),
                        offset: *offset,
                        expected: "')'",
                    }),
                    None => Err(LabelError::UnexpectedEnd { expected: "')'" }),
                }
            }
            other => Err(LabelError::UnexpectedToken {
                found: other.text(),
                offset,
                expected: "a label or '('",
            }),
        }
    }
}
