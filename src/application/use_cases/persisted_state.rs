//! Keys and accessors for everything the pipeline keeps in the store
//!
//! All writes to the override map go through [`write_overrides`] so the
//! cached rows of both scopes are dropped together with it.

use crate::compat_check::domain::{AggregatedRow, LicenseState, RemoteOverrideMap, Scope};
use crate::ports::outbound::{load_json, save_json, KeyValueStore};
use crate::shared::Result;
use std::time::Duration;

/// Prefix of the per-scope transient holding aggregated rows
pub const SCAN_RESULTS_KEY: &str = "pcc_scan_results";

/// Option holding the Portal license
pub const LICENSE_KEY: &str = "pcc_license";

/// Option holding the slug to PHP-version-list override map
pub const OVERRIDES_KEY: &str = "pcc_remote_php_versions";

/// Default lifetime of cached scan results
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

pub fn scan_results_key(scope: Scope) -> String {
    format!("{}:{}", SCAN_RESULTS_KEY, scope.as_str())
}

pub fn read_rows(store: &impl KeyValueStore, scope: Scope) -> Result<Option<Vec<AggregatedRow>>> {
    load_json(store, &scan_results_key(scope))
}

pub fn write_rows(
    store: &impl KeyValueStore,
    scope: Scope,
    rows: &[AggregatedRow],
    ttl: Duration,
) -> Result<()> {
    save_json(store, &scan_results_key(scope), &rows, Some(ttl))
}

pub fn invalidate_rows(store: &impl KeyValueStore, scope: Scope) -> Result<()> {
    tracing::debug!(scope = %scope, "invalidating cached scan results");
    store.delete(&scan_results_key(scope))
}

pub fn invalidate_all_rows(store: &impl KeyValueStore) -> Result<()> {
    for scope in Scope::ALL {
        invalidate_rows(store, scope)?;
    }
    Ok(())
}

pub fn read_overrides(store: &impl KeyValueStore) -> Result<RemoteOverrideMap> {
    Ok(load_json(store, OVERRIDES_KEY)?.unwrap_or_default())
}

/// Persists the override map and drops the cached rows of every scope
pub fn write_overrides(store: &impl KeyValueStore, overrides: &RemoteOverrideMap) -> Result<()> {
    save_json(store, OVERRIDES_KEY, overrides, None)?;
    invalidate_all_rows(store)
}

/// Removes all overrides; returns whether anything was stored
pub fn clear_overrides(store: &impl KeyValueStore) -> Result<bool> {
    let had_entries = !read_overrides(store)?.is_empty();
    store.delete(OVERRIDES_KEY)?;
    if had_entries {
        invalidate_all_rows(store)?;
    }
    Ok(had_entries)
}

pub fn read_license(store: &impl KeyValueStore) -> Result<LicenseState> {
    Ok(load_json(store, LICENSE_KEY)?.unwrap_or_default())
}

pub fn write_license(store: &impl KeyValueStore, license: &LicenseState) -> Result<()> {
    if license.is_set() {
        save_json(store, LICENSE_KEY, license, None)
    } else {
        store.delete(LICENSE_KEY)
    }
}
