//! Label requirement expression tree.

use crate::atom::{LabelAtom, LabelSet};
use crate::error::LabelError;

/// A boolean expression over label atoms.
///
/// The set of node kinds is closed. Trees are finite and immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LabelExpr {
    /// A single label.
    Atom(LabelAtom),

    /// `!e`
    Not(Box<LabelExpr>),

    /// `l&&r`
    And(Box<LabelExpr>, Box<LabelExpr>),

    /// `l||r`
    Or(Box<LabelExpr>, Box<LabelExpr>),

    /// `l<->r`
    Iff(Box<LabelExpr>, Box<LabelExpr>),

    /// `antecedent->consequent`
    Implies(Box<LabelExpr>, Box<LabelExpr>),

    /// `(e)`
    Paren(Box<LabelExpr>),
}

impl LabelExpr {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(LabelAtom::new(name))
    }

    pub fn not(expr: LabelExpr) -> Self {
        Self::Not(Box::new(expr))
    }

    pub fn and(lhs: LabelExpr, rhs: LabelExpr) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: LabelExpr, rhs: LabelExpr) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: LabelExpr, rhs: LabelExpr) -> Self {
        Self::Iff(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(antecedent: LabelExpr, consequent: LabelExpr) -> Self {
        Self::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn paren(expr: LabelExpr) -> Self {
        Self::Paren(Box::new(expr))
    }

    /// Parses an expression from its text form.
    pub fn parse(s: &str) -> Result<Self, LabelError> {
        crate::parse::parse_expr(s)
    }

    /// Evaluates the expression as an ordinary boolean formula, where an atom
    /// is true when the worker carries that label.
    ///
    /// This is the base eligibility rule: a worker is a candidate for a
    /// requirement when the requirement matches its labels.
    pub fn matches<S: LabelSet + ?Sized>(&self, labels: &S) -> bool {
        match self {
            LabelExpr::Atom(atom) => labels.has(atom),
            LabelExpr::Not(e) => !e.matches(labels),
            LabelExpr::And(l, r) => l.matches(labels) && r.matches(labels),
            LabelExpr::Or(l, r) => l.matches(labels) || r.matches(labels),
            LabelExpr::Iff(l, r) => l.matches(labels) == r.matches(labels),
            LabelExpr::Implies(a, c) => !a.matches(labels) || c.matches(labels),
            LabelExpr::Paren(e) => e.matches(labels),
        }
    }

    /// Returns every atom referenced by the expression, left to right.
    pub fn atoms(&self) -> Vec<&LabelAtom> {
        let mut out = Vec::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut Vec<&'a LabelAtom>) {
        match self {
            LabelExpr::Atom(atom) => out.push(atom),
            LabelExpr::Not(e) | LabelExpr::Paren(e) => e.collect_atoms(out),
            LabelExpr::And(l, r)
            | LabelExpr::Or(l, r)
            | LabelExpr::Iff(l, r)
            | LabelExpr::Implies(l, r) => {
                l.collect_atoms(out);
                r.collect_atoms(out);
            }
        }
    }

    /// Binding strength, higher binds tighter.
    fn precedence(&self) -> u8 {
        match self {
            LabelExpr::Iff(..) => 1,
            LabelExpr::Implies(..) => 2,
            LabelExpr::Or(..) => 3,
            LabelExpr::And(..) => 4,
            LabelExpr::Not(_) => 5,
            LabelExpr::Atom(_) | LabelExpr::Paren(_) => 6,
        }
    }

    fn fmt_binary(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        lhs: &LabelExpr,
        op: &str,
        rhs: &LabelExpr,
    ) -> std::fmt::Result {
        let p = self.precedence();
        fmt_operand(f, lhs, lhs.precedence() < p)?;
        f.write_str(op)?;
        // Left-associative: a right operand at the same level needs grouping.
        fmt_operand(f, rhs, rhs.precedence() <= p)
    }
}

fn fmt_operand(
    f: &mut std::fmt::Formatter<'_>,
    expr: &LabelExpr,
    wrap: bool,
) -> std::fmt::Result {
    if wrap {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl std::fmt::Display for LabelExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelExpr::Atom(atom) => f.write_str(&atom.to_expression()),
            LabelExpr::Not(e) => {
                f.write_str("!")?;
                fmt_operand(f, e, e.precedence() < self.precedence())
            }
            LabelExpr::And(l, r) => self.fmt_binary(f, l, "&&", r),
            LabelExpr::Or(l, r) => self.fmt_binary(f, l, "||", r),
            LabelExpr::Iff(l, r) => self.fmt_binary(f, l, "<->", r),
            LabelExpr::Implies(l, r) => self.fmt_binary(f, l, "->", r),
            LabelExpr::Paren(e) => write!(f, "({e})"),
        }
    }
}

impl std::str::FromStr for LabelExpr {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<LabelAtom> for LabelExpr {
    fn from(atom: LabelAtom) -> Self {
        Self::Atom(atom)
    }
}

impl serde::Serialize for LabelExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for LabelExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    fn labels(names: &[&str]) -> HashSet<LabelAtom> {
        names.iter().map(|n| LabelAtom::new(*n)).collect()
    }

    #[rstest]
    #[case("linux", &["linux"], true)]
    #[case("linux", &["windows"], false)]
    #[case("!linux", &["windows"], true)]
    #[case("linux&&gpu", &["linux"], false)]
    #[case("linux&&gpu", &["linux", "gpu"], true)]
    #[case("linux||gpu", &["gpu"], true)]
    #[case("linux<->gpu", &[], true)]
    #[case("linux<->gpu", &["gpu"], false)]
    #[case("linux->gpu", &["windows"], true)]
    #[case("linux->gpu", &["linux"], false)]
    #[case("(linux)", &["linux"], true)]
    fn test_matches_is_boolean_evaluation(
        #[case] expr: &str,
        #[case] worker: &[&str],
        #[case] expected: bool,
    ) {
        let expr = LabelExpr::parse(expr).unwrap();
        assert_eq!(expr.matches(&labels(worker)), expected);
    }

    #[test]
    fn test_display_canonical_forms() {
        let expr = LabelExpr::and(LabelExpr::atom("a"), LabelExpr::not(LabelExpr::atom("b")));
        assert_eq!(expr.to_string(), "a&&!b");

        let expr = LabelExpr::implies(LabelExpr::atom("a"), LabelExpr::iff(LabelExpr::atom("b"), LabelExpr::atom("c")));
        assert_eq!(expr.to_string(), "a->(b<->c)");

        let expr = LabelExpr::paren(LabelExpr::or(LabelExpr::atom("a"), LabelExpr::atom("b")));
        assert_eq!(expr.to_string(), "(a||b)");
    }

    #[test]
    fn test_display_groups_lower_precedence_operands() {
        let expr = LabelExpr::and(
            LabelExpr::or(LabelExpr::atom("a"), LabelExpr::atom("b")),
            LabelExpr::atom("c"),
        );
        assert_eq!(expr.to_string(), "(a||b)&&c");

        let expr = LabelExpr::not(LabelExpr::and(LabelExpr::atom("a"), LabelExpr::atom("b")));
        assert_eq!(expr.to_string(), "!(a&&b)");
    }

    #[test]
    fn test_display_groups_right_nested_same_operator() {
        let expr = LabelExpr::or(
            LabelExpr::atom("a"),
            LabelExpr::or(LabelExpr::atom("b"), LabelExpr::atom("c")),
        );
        assert_eq!(expr.to_string(), "a||(b||c)");
    }

    #[test]
    fn test_code_built_tree_gains_grouping_once() {
        let built = LabelExpr::not(LabelExpr::and(LabelExpr::atom("a"), LabelExpr::atom("b")));
        let reparsed = LabelExpr::parse(&built.to_string()).unwrap();

        assert_eq!(
            reparsed,
            LabelExpr::not(LabelExpr::paren(LabelExpr::and(LabelExpr::atom("a"), LabelExpr::atom("b"))))
        );
        assert_eq!(reparsed.to_string(), built.to_string());
        assert_eq!(LabelExpr::parse(&reparsed.to_string()).unwrap(), reparsed);

        for worker in [&[][..], &["a"][..], &["a", "b"][..]] {
            assert_eq!(built.matches(&labels(worker)), reparsed.matches(&labels(worker)));
        }
    }

    #[test]
    fn test_parsed_tree_roundtrips_exactly() {
        let parsed = LabelExpr::parse("!(a&&b)||(c->d)").unwrap();
        assert_eq!(LabelExpr::parse(&parsed.to_string()).unwrap(), parsed);
    }

    #[test]
    fn test_atoms_in_order() {
        let expr = LabelExpr::parse("a->(b||!c)").unwrap();
        let names: Vec<_> = expr.atoms().into_iter().map(LabelAtom::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_expr_json_roundtrip() {
        let expr = LabelExpr::parse("linux && (gpu || \"big box\")").unwrap();
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, "\"linux&&(gpu||\\\"big box\\\")\"");
        let parsed: LabelExpr = serde_json::from_str(&json).unwrap();
        assert_eq!(expr, parsed);
    }

    #[test]
    fn test_expr_deserialize_rejects_bad_syntax() {
        let result: Result<LabelExpr, _> = serde_json::from_str("\"a &&\"");
        assert!(result.is_err());
    }
}
