//! Combined public search across blogs and services.

use serde::Serialize;

use crate::error::CoreResult;
use crate::model::{BlogPublicView, ServicePublicView};
use crate::service::{BlogService, ServiceCatalog};
use crate::store::{BlogStore, CategoryStore, ServiceStore, SubcategoryStore, UserDirectory};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub blogs: Vec<BlogPublicView>,
    pub services: Vec<ServicePublicView>,
}

#[derive(Clone)]
pub struct SiteSearch<S> {
    blogs: BlogService<S>,
    services: ServiceCatalog<S>,
}

impl<S> SiteSearch<S>
where
    S: BlogStore + CategoryStore + SubcategoryStore + ServiceStore + UserDirectory,
{
    pub fn new(blogs: BlogService<S>, services: ServiceCatalog<S>) -> Self {
        Self { blogs, services }
    }

    /// One keyword, both content families, public scope only. A blank
    /// keyword returns the full public listings.
    pub async fn search_public(&self, keyword: &str) -> CoreResult<SearchResult> {
        let blogs = self.blogs.search_public(keyword).await?;
        let services = self.services.search_public(keyword).await?;
        Ok(SearchResult { blogs, services })
    }
}
