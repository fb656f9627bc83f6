use super::Capability;
use serde::{Deserialize, Serialize};

/// Evaluation context: a single site, or the whole multisite network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Site,
    Network,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Site, Scope::Network];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Site => "site",
            Scope::Network => "network",
        }
    }

    /// Capability an operator needs to trigger actions in this scope
    pub fn required_capability(&self) -> Capability {
        match self {
            Scope::Site => Capability::ManageOptions,
            Scope::Network => Capability::ManageNetwork,
        }
    }

    /// Column header used for the activation status in tables and exports
    pub fn status_column_label(&self) -> &'static str {
        match self {
            Scope::Site => "Plugin Status",
            Scope::Network => "Plugin Network Status",
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "site" | "single" => Ok(Scope::Site),
            "network" | "multisite" => Ok(Scope::Network),
            _ => Err(format!(
                "Invalid scope: {}. Please specify 'site' or 'network'",
                s
            )),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scope_from_str() {
        assert_eq!(Scope::from_str("site").unwrap(), Scope::Site);
        assert_eq!(Scope::from_str("NETWORK").unwrap(), Scope::Network);
        assert_eq!(Scope::from_str("multisite").unwrap(), Scope::Network);
        assert!(Scope::from_str("galaxy").is_err());
    }

    #[test]
    fn test_scope_capabilities() {
        assert_eq!(Scope::Site.required_capability(), Capability::ManageOptions);
        assert_eq!(
            Scope::Network.required_capability(),
            Capability::ManageNetwork
        );
    }

    #[test]
    fn test_status_column_label() {
        assert_eq!(Scope::Site.status_column_label(), "Plugin Status");
        assert_eq!(
            Scope::Network.status_column_label(),
            "Plugin Network Status"
        );
    }
}
