pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::auth::IdentityClient;
use crate::config::{CatalogConfig, IdentityConfig};
use crate::store::RecordStore;
use std::sync::Arc;

/// Shared application state.
///
/// Session state is explicit here: auth cookies are created and destroyed
/// only by handlers wired through this struct, never via ambient storage.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub identity: IdentityClient,
    pub catalog: CatalogConfig,
    pub identity_cfg: IdentityConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        identity: IdentityClient,
        catalog: CatalogConfig,
        identity_cfg: IdentityConfig,
    ) -> Self {
        Self {
            store,
            identity,
            catalog,
            identity_cfg,
        }
    }
}
