use super::persisted_state;
use crate::application::dto::ActionOutcome;
use crate::compat_check::domain::{LicenseState, LicenseVerdict};
use crate::ports::outbound::{KeyValueStore, PortalClient};
use crate::shared::error::CompatError;
use crate::shared::Result;

/// Reduces a site URL or host to the bare lowercase host the Portal expects
///
/// Scheme, port, path and a leading `www.` are removed:
/// `https://WWW.Example.com:8080/blog` becomes `example.com`.
pub fn normalize_site_host(site: &str) -> Result<String> {
    let trimmed = site.trim();
    if trimmed.is_empty() {
        return Err(CompatError::Validation {
            message: "Site URL is empty".to_string(),
        }
        .into());
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let parsed = url::Url::parse(&with_scheme).map_err(|e| CompatError::Validation {
        message: format!("Invalid site URL '{}': {}", trimmed, e),
    })?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| CompatError::Validation {
            message: format!("Site URL '{}' has no host", trimmed),
        })?
        .to_lowercase();

    Ok(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// LicenseUseCase - stores and validates the Portal license key
pub struct LicenseUseCase<S, P> {
    store: S,
    portal: P,
}

impl<S, P> LicenseUseCase<S, P>
where
    S: KeyValueStore,
    P: PortalClient,
{
    pub fn new(store: S, portal: P) -> Self {
        Self { store, portal }
    }

    pub fn current(&self) -> Result<LicenseState> {
        persisted_state::read_license(&self.store)
    }

    /// Saves a key without contacting the Portal
    ///
    /// A different key is stored as not yet validated. An empty key removes
    /// the license. Either way the Portal overrides no longer apply.
    pub fn save(&self, key: &str) -> Result<ActionOutcome> {
        let key = key.trim();
        let stored = self.current()?;

        if key.is_empty() {
            persisted_state::write_license(&self.store, &LicenseState::unset())?;
            self.drop_overrides()?;
            return Ok(ActionOutcome::success("License removed."));
        }

        if key == stored.key {
            return Ok(ActionOutcome::success("License key unchanged."));
        }

        persisted_state::write_license(
            &self.store,
            &LicenseState {
                key: key.to_string(),
                valid: false,
            },
        )?;
        self.drop_overrides()?;
        Ok(ActionOutcome::success(
            "License saved. Validate it to enable Portal scans.",
        ))
    }

    /// Validates a key against the Portal for the given site
    ///
    /// # Errors
    /// `CompatError::LicenseRequired` for an empty key and
    /// `CompatError::LicenseRejected` when the Portal does not accept it.
    /// A rejection is persisted before the error is returned.
    pub async fn validate(&self, key: &str, site: &str) -> Result<ActionOutcome> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CompatError::LicenseRequired.into());
        }
        let host = normalize_site_host(site)?;

        let verdict = match self.portal.validate_license(key, &host).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(site = %host, error = %e, "license validation request failed");
                LicenseVerdict {
                    valid: false,
                    message: None,
                }
            }
        };

        if verdict.valid {
            persisted_state::write_license(
                &self.store,
                &LicenseState {
                    key: key.to_string(),
                    valid: true,
                },
            )?;
            tracing::info!(site = %host, "license validated");
            return Ok(ActionOutcome::success("License validated successfully."));
        }

        persisted_state::write_license(
            &self.store,
            &LicenseState {
                key: key.to_string(),
                valid: false,
            },
        )?;
        self.drop_overrides()?;

        let message = verdict
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| CompatError::NETWORK_ERROR_MESSAGE.to_string());
        Err(CompatError::LicenseRejected { message }.into())
    }

    fn drop_overrides(&self) -> Result<()> {
        if persisted_state::clear_overrides(&self.store)? {
            tracing::info!("cleared Portal overrides after license change");
        }
        Ok(())
    }
}
