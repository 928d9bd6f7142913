pub mod api;
pub mod storage;

use std::rc::Rc;

use client_core::{ApiClient, AppConfig, AuthController, Gateway, SessionStore, SystemClock};

use self::api::FetchTransport;
use self::storage::LocalStorageStore;

/// Everything that talks to the outside world, wired once per page load.
///
/// The store is shared: the controller writes it, the gateway reads it.
pub struct Services {
    pub config: AppConfig,
    pub api: Rc<ApiClient>,
    pub auth: Rc<AuthController>,
}

impl Services {
    pub fn new(config: AppConfig) -> Self {
        let store: Rc<dyn SessionStore> = Rc::new(LocalStorageStore);
        let gateway = Gateway::new(config.api_base_url.clone(), store.clone(), Rc::new(FetchTransport));
        let api = Rc::new(ApiClient::new(gateway));
        let auth = Rc::new(AuthController::new(store, api.clone(), Rc::new(SystemClock)));

        Self { config, api, auth }
    }

    pub fn from_build_env() -> Self {
        let config = AppConfig::from_build_env().unwrap_or_else(|err| {
            tracing::error!("Invalid build configuration, using defaults: {:#}", err);
            AppConfig::default()
        });
        tracing::debug!(api = %config.api_base_url, "Using API gateway");
        Self::new(config)
    }
}
