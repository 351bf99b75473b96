//! The exclusive label registry.

use std::collections::HashSet;

use exlabel_labels::{LabelAtom, LabelSet};

/// The labels configured as exclusive.
///
/// Built from a single space-separated configuration string and only ever
/// replaced as a whole. The original string is kept so that saving the
/// configuration writes back exactly what was loaded.
///
/// Equality compares the label set only: source spacing, label order and an
/// absent versus empty string do not make two registries differ.
#[derive(Debug, Clone, Default)]
pub struct ExclusiveRegistry {
    source: Option<String>,
    labels: Vec<LabelAtom>,
    index: HashSet<LabelAtom>,
}

impl ExclusiveRegistry {
    /// An empty registry. Every worker is admitted against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the registry from an optional configuration string.
    ///
    /// The string is split on ASCII space; each non-empty token becomes one
    /// label. Tokens are not validated. Repeated labels collapse to the first
    /// occurrence.
    pub fn from_config(source: Option<&str>) -> Self {
        let Some(source) = source else {
            return Self::empty();
        };

        let mut labels = Vec::new();
        let mut index = HashSet::new();
        for token in source.split(' ').filter(|t| !t.is_empty()) {
            let atom = LabelAtom::new(token);
            if index.insert(atom.clone()) {
                labels.push(atom);
            }
        }

        Self {
            source: Some(source.to_string()),
            labels,
            index,
        }
    }

    /// Builds the registry from a configuration string.
    pub fn parse(source: &str) -> Self {
        Self::from_config(Some(source))
    }

    /// The configuration string this registry was built from.
    pub fn config_string(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Exclusive labels in configuration order.
    pub fn labels(&self) -> &[LabelAtom] {
        &self.labels
    }

    pub fn contains(&self, atom: &LabelAtom) -> bool {
        self.index.contains(atom)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl PartialEq for ExclusiveRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for ExclusiveRegistry {}

impl LabelSet for ExclusiveRegistry {
    fn has(&self, atom: &LabelAtom) -> bool {
        self.contains(atom)
    }
}

impl std::str::FromStr for ExclusiveRegistry {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl serde::Serialize for ExclusiveRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.source.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for ExclusiveRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let source = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_config(source.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &ExclusiveRegistry) -> Vec<&str> {
        registry.labels().iter().map(LabelAtom::name).collect()
    }

    #[test]
    fn test_empty_string() {
        let registry = ExclusiveRegistry::parse("");
        assert!(registry.is_empty());
        assert_eq!(registry.config_string(), Some(""));
    }

    #[test]
    fn test_absent_string() {
        let registry = ExclusiveRegistry::from_config(None);
        assert!(registry.is_empty());
        assert_eq!(registry.config_string(), None);
    }

    #[test]
    fn test_multiple_labels() {
        let registry = ExclusiveRegistry::parse("label1 label2 label3");
        assert_eq!(registry.len(), 3);
        assert_eq!(names(&registry), vec!["label1", "label2", "label3"]);
        assert!(registry.contains(&LabelAtom::new("label2")));
        assert!(!registry.contains(&LabelAtom::new("label4")));
    }

    #[test]
    fn test_repeated_spaces_are_skipped() {
        let registry = ExclusiveRegistry::parse("  a   b ");
        assert_eq!(names(&registry), vec!["a", "b"]);
        assert_eq!(registry.config_string(), Some("  a   b "));
    }

    #[test]
    fn test_only_ascii_space_separates() {
        let registry = ExclusiveRegistry::parse("a\tb c");
        assert_eq!(names(&registry), vec!["a\tb", "c"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let registry = ExclusiveRegistry::parse("gpu gpu fpga gpu");
        assert_eq!(names(&registry), vec!["gpu", "fpga"]);
    }

    #[test]
    fn test_order_does_not_change_membership() {
        let forward = ExclusiveRegistry::parse("a b c");
        let backward = ExclusiveRegistry::parse("c b a");
        for probe in ["a", "b", "c", "d"] {
            let atom = LabelAtom::new(probe);
            assert_eq!(forward.contains(&atom), backward.contains(&atom));
        }
    }

    #[test]
    fn test_equality_ignores_order_and_source() {
        assert_eq!(ExclusiveRegistry::parse("a b"), ExclusiveRegistry::parse("b a"));
        assert_eq!(ExclusiveRegistry::parse("a  b a"), ExclusiveRegistry::parse("a b"));
        assert_eq!(ExclusiveRegistry::from_config(None), ExclusiveRegistry::parse(""));
        assert_ne!(ExclusiveRegistry::parse("a"), ExclusiveRegistry::parse("a b"));
    }

    #[test]
    fn test_config_roundtrip() {
        let registry = ExclusiveRegistry::parse("exclusive1 exclusive2");
        let again = ExclusiveRegistry::from_config(registry.config_string());
        assert_eq!(again.config_string(), Some("exclusive1 exclusive2"));
        assert_eq!(again, registry);
    }

    #[test]
    fn test_json_roundtrip() {
        let registry = ExclusiveRegistry::parse("exclusive1 exclusive2");
        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, "\"exclusive1 exclusive2\"");
        let parsed: ExclusiveRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, registry);

        let absent: ExclusiveRegistry = serde_json::from_str("null").unwrap();
        assert!(absent.is_empty());
    }
}
