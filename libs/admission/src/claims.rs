//! Exclusivity claims over label requirement expressions.
//!
//! This is not boolean evaluation. It answers whether an expression asks for
//! one of the given exclusive labels:
//!
//! - `And`, `Or` and `Iff` all claim when either side claims
//! - `Implies` claims only through its consequent
//! - `!atom` claims when the atom is *not* exclusive; negating an exclusive
//!   atom opts out, and negating anything other than a bare atom never claims

use exlabel_labels::{LabelExpr, LabelSet};

/// Returns true if `expr` claims exclusivity over the `exclusive` labels.
pub fn claims_exclusivity<S: LabelSet + ?Sized>(expr: &LabelExpr, exclusive: &S) -> bool {
    match expr {
        LabelExpr::Atom(atom) => exclusive.has(atom),
        LabelExpr::Paren(inner) => claims_exclusivity(inner, exclusive),
        LabelExpr::Not(inner) => match inner.as_ref() {
            LabelExpr::Atom(atom) => !exclusive.has(atom),
            _ => false,
        },
        LabelExpr::And(lhs, rhs) | LabelExpr::Or(lhs, rhs) | LabelExpr::Iff(lhs, rhs) => {
            claims_exclusivity(lhs, exclusive) || claims_exclusivity(rhs, exclusive)
        }
        LabelExpr::Implies(_, consequent) => claims_exclusivity(consequent, exclusive),
    }
}
