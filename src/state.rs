use chalkportal_auth::SessionContext;
use chalkportal_cache::{HttpBackend, LocalBackend, ResourceBackend, ResourceStore};
use chalkportal_config::{ApiConfig, LoginRoutes, StorageConfig};
use chalkportal_core::StoreResult;

/// Everything a portal view needs: one shared store and the session it reads.
pub struct PortalState<B: ResourceBackend> {
    pub store: ResourceStore<B>,
    pub session: SessionContext,
}

impl<B: ResourceBackend> std::fmt::Debug for PortalState<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalState")
            .field("store", &self.store)
            .field("session", &self.session)
            .finish()
    }
}

impl<B: ResourceBackend> Clone for PortalState<B> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            session: self.session.clone(),
        }
    }
}

impl<B: ResourceBackend> PortalState<B> {
    pub fn new(backend: B, session: SessionContext) -> Self {
        Self {
            store: ResourceStore::new(backend, session.clone()),
            session,
        }
    }
}

impl PortalState<HttpBackend> {
    pub fn http(
        api_config: ApiConfig,
        login_routes: LoginRoutes,
        session: SessionContext,
    ) -> StoreResult<Self> {
        let backend = HttpBackend::new(api_config, session.clone(), login_routes)?;
        Ok(Self::new(backend, session))
    }
}

impl PortalState<LocalBackend> {
    pub fn local(storage_config: StorageConfig, session: SessionContext) -> Self {
        Self::new(LocalBackend::new(storage_config), session)
    }
}

/// State over the REST API configured by `API_*` and `*_LOGIN_ROUTE` variables.
pub fn init_portal_state(session: SessionContext) -> StoreResult<PortalState<HttpBackend>> {
    PortalState::http(ApiConfig::from_env(), LoginRoutes::from_env(), session)
}

/// State over local JSON files configured by `LOCAL_*` variables.
pub fn init_local_state(session: SessionContext) -> PortalState<LocalBackend> {
    PortalState::local(StorageConfig::from_env(), session)
}
