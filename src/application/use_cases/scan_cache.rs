use super::aggregate_compatibility::RowAggregator;
use super::persisted_state::{self, DEFAULT_CACHE_TTL};
use crate::application::dto::ScanRequest;
use crate::compat_check::domain::{AggregatedRow, Scope};
use crate::ports::outbound::KeyValueStore;
use crate::shared::Result;
use std::time::Duration;

/// ScanCacheUseCase - serves aggregated rows from the store when fresh
///
/// A rebuild always replaces the whole row list of a scope; individual
/// rows are never refreshed on their own.
pub struct ScanCacheUseCase<S, A> {
    store: S,
    aggregator: A,
    ttl: Duration,
}

impl<S, A> ScanCacheUseCase<S, A>
where
    S: KeyValueStore,
    A: RowAggregator,
{
    pub fn new(store: S, aggregator: A) -> Self {
        Self {
            store,
            aggregator,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the rows for a scope, rebuilding on miss or when forced
    ///
    /// An empty cached list counts as a miss.
    pub async fn get(&self, request: ScanRequest) -> Result<Vec<AggregatedRow>> {
        if !request.force_rebuild {
            if let Some(rows) = self.cached(request.scope)? {
                tracing::debug!(scope = %request.scope, rows = rows.len(), "serving cached scan results");
                return Ok(rows);
            }
        }
        self.rebuild(request.scope).await
    }

    /// Non-empty, unexpired cached rows for the scope, if any
    pub fn cached(&self, scope: Scope) -> Result<Option<Vec<AggregatedRow>>> {
        Ok(persisted_state::read_rows(&self.store, scope)?.filter(|rows| !rows.is_empty()))
    }

    pub fn invalidate(&self, scope: Scope) -> Result<()> {
        persisted_state::invalidate_rows(&self.store, scope)
    }

    pub fn invalidate_all(&self) -> Result<()> {
        persisted_state::invalidate_all_rows(&self.store)
    }

    async fn rebuild(&self, scope: Scope) -> Result<Vec<AggregatedRow>> {
        tracing::info!(scope = %scope, "rebuilding scan results");
        let overrides = persisted_state::read_overrides(&self.store)?;
        let rows = self.aggregator.aggregate(scope, &overrides).await?;
        persisted_state::write_rows(&self.store, scope, &rows, self.ttl)?;
        Ok(rows)
    }
}
