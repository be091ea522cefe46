use std::sync::Arc;

use menu_panel_core::DocumentStore;

use crate::config::AppConfig;
use crate::token::TokenKeys;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: DocumentStore,
    config: AppConfig,
    tokens: TokenKeys,
}

impl AppState {
    pub fn new(store: DocumentStore, config: AppConfig) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl_hours);
        Self {
            inner: Arc::new(InnerState {
                store,
                config,
                tokens,
            }),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn tokens(&self) -> &TokenKeys {
        &self.inner.tokens
    }
}
