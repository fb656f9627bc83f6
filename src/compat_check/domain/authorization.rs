use crate::shared::error::CompatError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Privileges checked before any trigger action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ManageOptions,
    ManageNetwork,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageOptions => "manage_options",
            Capability::ManageNetwork => "manage_network",
        }
    }
}

impl std::str::FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manage_options" => Ok(Capability::ManageOptions),
            "manage_network" => Ok(Capability::ManageNetwork),
            other => Err(format!("Unknown capability: {}", other)),
        }
    }
}

/// The party invoking trigger actions, with its granted capabilities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    capabilities: BTreeSet<Capability>,
}

impl Operator {
    pub fn new(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// An operator holding every capability
    pub fn administrator() -> Self {
        Self::new([Capability::ManageOptions, Capability::ManageNetwork])
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Fails with [`CompatError::Forbidden`] unless the capability is held
    pub fn require(&self, capability: Capability, action: &str) -> Result<()> {
        if self.can(capability) {
            return Ok(());
        }
        Err(CompatError::Forbidden {
            action: action.to_string(),
            capability: capability.as_str().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_administrator_holds_everything() {
        let operator = Operator::administrator();
        assert!(operator.can(Capability::ManageOptions));
        assert!(operator.can(Capability::ManageNetwork));
    }

    #[test]
    fn test_require_missing_capability() {
        let operator = Operator::new([Capability::ManageOptions]);
        assert!(operator.require(Capability::ManageOptions, "rescan").is_ok());

        let err = operator
            .require(Capability::ManageNetwork, "rescan")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CompatError>(),
            Some(CompatError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_capability_from_str() {
        assert_eq!(
            Capability::from_str(" Manage_Options ").unwrap(),
            Capability::ManageOptions
        );
        assert!(Capability::from_str("edit_posts").is_err());
    }
}
