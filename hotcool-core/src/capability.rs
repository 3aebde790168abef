//! Device capabilities
//!
//! A device advertises what it can do as a [`CapabilitySet`]. Modules and
//! entities are created by querying the set rather than by product model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single device capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Fan heater element (`hmod`, `hmax`, `hsta`)
    Heating,
    /// Motorised oscillation (`oson`, `osal`, `osau`, `ancp`)
    Oscillating,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Heating => f.write_str("heating"),
            Capability::Oscillating => f.write_str("oscillating"),
        }
    }
}

/// Set of capabilities supported by a device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Create an empty capability set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// True when every listed capability is present
    pub fn contains_all(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().all(|c| self.0.contains(c))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Capabilities implied by a product type code
///
/// Hot+Cool models heat and oscillate; Pure Cool models only oscillate.
/// Unknown product types get an empty set.
pub fn capabilities_for_product_type(product_type: &str) -> CapabilitySet {
    match product_type {
        "455" | "455A" | "527" | "527E" | "527K" | "527M" => {
            [Capability::Heating, Capability::Oscillating]
                .into_iter()
                .collect()
        }
        "438" | "438E" | "438K" | "469" | "475" | "520" => {
            [Capability::Oscillating].into_iter().collect()
        }
        _ => CapabilitySet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_all() {
        let set: CapabilitySet = [Capability::Heating, Capability::Oscillating]
            .into_iter()
            .collect();
        assert!(set.contains_all(&[Capability::Heating, Capability::Oscillating]));
        assert!(set.contains_all(&[]));

        let set: CapabilitySet = [Capability::Oscillating].into_iter().collect();
        assert!(!set.contains_all(&[Capability::Heating, Capability::Oscillating]));
        assert!(set.contains(Capability::Oscillating));
    }

    #[test]
    fn test_product_types() {
        let hot_cool = capabilities_for_product_type("527");
        assert!(hot_cool.contains(Capability::Heating));
        assert!(hot_cool.contains(Capability::Oscillating));

        let pure_cool = capabilities_for_product_type("438");
        assert!(!pure_cool.contains(Capability::Heating));
        assert!(pure_cool.contains(Capability::Oscillating));

        assert!(capabilities_for_product_type("999").is_empty());
    }

    #[test]
    fn test_serde_as_list() {
        let set: CapabilitySet = serde_json::from_str(r#"["oscillating", "heating"]"#).unwrap();
        assert_eq!(set.to_string(), "heating, oscillating");
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["heating","oscillating"]"#
        );
    }
}
