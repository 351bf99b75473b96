//! Label atoms and label set lookups.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A named capability tag attached to workers or referenced by expressions.
///
/// Identity is the name. Atoms are never validated: any non-empty token
/// handed over by configuration is a valid atom name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelAtom(String);

impl LabelAtom {
    /// Creates an atom with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the atom name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns true if the name has to be quoted in expression text.
    pub fn needs_quoting(&self) -> bool {
        let mut chars = self.0.chars().peekable();
        if chars.peek().is_none() {
            return true;
        }
        while let Some(c) = chars.next() {
            if !is_atom_char(c) || (c == '-' && chars.peek() == Some(&'>')) {
                return true;
            }
        }
        false
    }

    /// Returns the atom as it appears in expression text.
    pub fn to_expression(&self) -> String {
        if !self.needs_quoting() {
            return self.0.clone();
        }
        let mut out = String::with_capacity(self.0.len() + 2);
        out.push('"');
        for c in self.0.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
        out
    }
}

/// Characters allowed in an unquoted atom.
pub(crate) fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '!' | '&' | '|' | '<' | '>' | '(' | ')' | '"')
}

impl std::fmt::Display for LabelAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LabelAtom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LabelAtom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LabelAtom {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LabelAtom {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl serde::Serialize for LabelAtom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for LabelAtom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self(name))
    }
}

/// Membership lookup over a collection of atoms.
pub trait LabelSet {
    /// Returns true if the atom is in the set.
    fn has(&self, atom: &LabelAtom) -> bool;
}

impl<S: BuildHasher> LabelSet for HashSet<LabelAtom, S> {
    fn has(&self, atom: &LabelAtom) -> bool {
        self.contains(atom)
    }
}

impl LabelSet for BTreeSet<LabelAtom> {
    fn has(&self, atom: &LabelAtom) -> bool {
        self.contains(atom)
    }
}

impl LabelSet for [LabelAtom] {
    fn has(&self, atom: &LabelAtom) -> bool {
        self.contains(atom)
    }
}

impl LabelSet for Vec<LabelAtom> {
    fn has(&self, atom: &LabelAtom) -> bool {
        self.as_slice().has(atom)
    }
}

impl<T: LabelSet + ?Sized> LabelSet for &T {
    fn has(&self, atom: &LabelAtom) -> bool {
        (**self).has(atom)
    }
}
