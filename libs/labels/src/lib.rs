//! # exlabel-labels
//!
//! Label atoms and label requirement expressions for worker selection.
//!
//! ## Design Principles
//!
//! - Atoms are identified by name only; two atoms with the same name are equal
//! - Expressions are immutable trees over a closed set of node kinds
//! - Parentheses are kept in the tree so that `(a)` and `a` stay distinguishable
//! - Parsed expressions roundtrip through their text form (parse → format → parse);
//!   a tree built in code may gain `Paren` nodes on its first roundtrip
//!
//! ## Expression Syntax
//!
//! Lowest to highest precedence, binary operators left-associative:
//!
//! | Operator | Node      |
//! |----------|-----------|
//! | `a<->b`  | `Iff`     |
//! | `a->b`   | `Implies` |
//! | `a\|\|b` | `Or`      |
//! | `a&&b`   | `And`     |
//! | `!a`     | `Not`     |
//! | `(a)`    | `Paren`   |
//!
//! Atoms are bare words (`linux`, `gpu-a100`) or double-quoted strings
//! (`"needs space"`).

mod atom;
mod error;
mod expr;
mod parse;

pub use atom::{LabelAtom, LabelSet};
pub use error::LabelError;
pub use expr::LabelExpr;
pub use parse::parse_expr;
