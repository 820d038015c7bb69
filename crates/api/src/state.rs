use std::sync::Arc;

use siteworks_core::clock::SystemClock;
use siteworks_core::ident::UuidTokens;
use siteworks_core::service::{
    BlogService, CategoryService, ClientService, EnquiryService, ServiceCatalog, SiteSearch,
};
use siteworks_core::store::pg::PgStore;
use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor. Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    pool: PgPool,
    config: AppConfig,
    categories: CategoryService<PgStore>,
    catalog: ServiceCatalog<PgStore>,
    blogs: BlogService<PgStore>,
    clients: ClientService<PgStore>,
    enquiries: EnquiryService<PgStore>,
    search: SiteSearch<PgStore>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let store = PgStore::new(pool.clone());
        let clock = Arc::new(SystemClock);
        let tokens = Arc::new(UuidTokens);

        let blogs = BlogService::new(store.clone(), clock.clone(), tokens.clone());
        let catalog = ServiceCatalog::new(store.clone(), clock.clone(), tokens.clone());
        let search = SiteSearch::new(blogs.clone(), catalog.clone());

        Self {
            inner: Arc::new(InnerState {
                categories: CategoryService::new(store.clone(), clock.clone(), tokens.clone()),
                clients: ClientService::new(store.clone(), clock.clone(), tokens.clone()),
                enquiries: EnquiryService::new(store, clock, tokens),
                blogs,
                catalog,
                search,
                pool,
                config,
            }),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn categories(&self) -> &CategoryService<PgStore> {
        &self.inner.categories
    }

    pub fn catalog(&self) -> &ServiceCatalog<PgStore> {
        &self.inner.catalog
    }

    pub fn blogs(&self) -> &BlogService<PgStore> {
        &self.inner.blogs
    }

    pub fn clients(&self) -> &ClientService<PgStore> {
        &self.inner.clients
    }

    pub fn enquiries(&self) -> &EnquiryService<PgStore> {
        &self.inner.enquiries
    }

    pub fn search(&self) -> &SiteSearch<PgStore> {
        &self.inner.search
    }
}
