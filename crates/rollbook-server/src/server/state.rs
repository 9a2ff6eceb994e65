use rollbook::{CsvStore, PoolConfig};
use std::sync::Arc;

/// Shared per-request state: the store handle and the averaging pool sizing.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CsvStore>,
    pub pool: PoolConfig,
}

impl AppState {
    pub fn new(store: Arc<CsvStore>, pool: PoolConfig) -> Self {
        Self { store, pool }
    }
}
