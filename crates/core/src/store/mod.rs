//! Persistence capabilities, one trait per aggregate.
//!
//! The aggregate services are generic over these traits; production runs
//! them against [`pg::PgStore`], the unit tests against an in-memory
//! implementation. Method names carry the entity prefix so one store type
//! can implement every trait without collisions.
//!
//! Uniqueness lookups take the already-normalized value (trimmed name,
//! lowercased slug) and compare case-insensitively among non-deleted
//! records. `exclude` carries the record's own id on update so a record
//! never collides with itself.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::model::{
    Blog, BlogFaq, Category, Client, Enquiry, Service, Subcategory, UserRef,
};

pub mod pg;

#[cfg(test)]
pub mod memory;

/// Acting-user lookups. Every mutation validates its acting user here
/// before any other validation runs.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_active_user(&self, id: i64) -> CoreResult<Option<UserRef>>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_active_category(&self, id: i64) -> CoreResult<Option<Category>>;
    async fn list_active_categories(&self) -> CoreResult<Vec<Category>>;
    async fn search_active_categories(&self, keyword: &str) -> CoreResult<Vec<Category>>;
    async fn category_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn category_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool>;
    /// True while any active subcategory or service still references the
    /// category. Blocks soft deletion.
    async fn category_has_children(&self, id: i64) -> CoreResult<bool>;
    async fn insert_category(&self, record: Category) -> CoreResult<Category>;
    async fn update_category(&self, record: &Category) -> CoreResult<()>;
}

#[async_trait]
pub trait SubcategoryStore: Send + Sync {
    async fn find_active_subcategory(&self, id: i64) -> CoreResult<Option<Subcategory>>;
    async fn list_active_subcategories(&self, category_id: Option<i64>) -> CoreResult<Vec<Subcategory>>;
    async fn subcategory_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn subcategory_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn insert_subcategory(&self, record: Subcategory) -> CoreResult<Subcategory>;
    async fn update_subcategory(&self, record: &Subcategory) -> CoreResult<()>;
}

#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn find_active_service(&self, id: i64) -> CoreResult<Option<Service>>;
    async fn find_public_service_by_slug(&self, slug: &str) -> CoreResult<Option<Service>>;
    async fn list_active_services(&self) -> CoreResult<Vec<Service>>;
    async fn list_public_services(&self) -> CoreResult<Vec<Service>>;
    async fn latest_public_services(&self, limit: i64) -> CoreResult<Vec<Service>>;
    async fn public_services_by_category(&self, category_id: i64) -> CoreResult<Vec<Service>>;
    async fn public_services_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<Service>>;
    async fn featured_public_services(&self) -> CoreResult<Vec<Service>>;
    async fn search_active_services(&self, keyword: &str) -> CoreResult<Vec<Service>>;
    /// Load the referenced services filtered to active. The caller compares
    /// counts to detect missing or inactive ids.
    async fn load_active_services(&self, ids: &[i64]) -> CoreResult<Vec<Service>>;
    async fn service_title_taken(&self, title: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn service_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn insert_service(&self, record: Service) -> CoreResult<Service>;
    async fn update_service(&self, record: &Service) -> CoreResult<()>;
    /// Best-effort visit counter; lost updates under concurrency accepted.
    async fn bump_service_visits(&self, id: i64) -> CoreResult<()>;
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn find_active_blog(&self, id: i64) -> CoreResult<Option<Blog>>;
    async fn find_public_blog_by_slug(&self, slug: &str) -> CoreResult<Option<Blog>>;
    async fn list_active_blogs(&self) -> CoreResult<Vec<Blog>>;
    async fn list_public_blogs(&self) -> CoreResult<Vec<Blog>>;
    async fn latest_public_blogs(&self, limit: i64) -> CoreResult<Vec<Blog>>;
    async fn public_blogs_by_category(&self, category_id: i64) -> CoreResult<Vec<Blog>>;
    async fn public_blogs_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<Blog>>;
    async fn public_blogs_by_service(&self, service_id: i64) -> CoreResult<Vec<Blog>>;
    async fn featured_public_blogs(&self) -> CoreResult<Vec<Blog>>;
    async fn search_active_blogs(&self, keyword: &str) -> CoreResult<Vec<Blog>>;
    async fn blog_title_taken(&self, title: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn blog_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool>;
    /// Persists the record and its service associations.
    async fn insert_blog(&self, record: Blog) -> CoreResult<Blog>;
    /// Replaces the service associations wholesale (clear-then-add).
    async fn update_blog(&self, record: &Blog) -> CoreResult<()>;
    async fn bump_blog_visits(&self, id: i64) -> CoreResult<()>;

    /// FAQ lookups are scoped to the owning blog: a faq id under the wrong
    /// parent is NotFound, not a cross-parent hit.
    async fn find_active_faq(&self, blog_id: i64, faq_id: i64) -> CoreResult<Option<BlogFaq>>;
    async fn list_active_faqs(&self, blog_id: i64) -> CoreResult<Vec<BlogFaq>>;
    async fn insert_faq(&self, record: BlogFaq) -> CoreResult<BlogFaq>;
    async fn update_faq(&self, record: &BlogFaq) -> CoreResult<()>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn find_active_client(&self, id: i64) -> CoreResult<Option<Client>>;
    async fn list_active_clients(&self) -> CoreResult<Vec<Client>>;
    async fn list_public_clients(&self) -> CoreResult<Vec<Client>>;
    async fn search_active_clients(&self, keyword: &str) -> CoreResult<Vec<Client>>;
    async fn client_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn client_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool>;
    async fn insert_client(&self, record: Client) -> CoreResult<Client>;
    async fn update_client(&self, record: &Client) -> CoreResult<()>;
}

#[async_trait]
pub trait EnquiryStore: Send + Sync {
    async fn find_active_enquiry(&self, id: i64) -> CoreResult<Option<Enquiry>>;
    /// Lookup by normalized (trimmed, lowercased) email among active records.
    async fn find_active_enquiry_by_email(&self, email: &str) -> CoreResult<Option<Enquiry>>;
    /// Lookup by trimmed mobile among active records.
    async fn find_active_enquiry_by_mobile(&self, mobile: &str) -> CoreResult<Option<Enquiry>>;
    async fn list_active_enquiries(&self) -> CoreResult<Vec<Enquiry>>;
    async fn insert_enquiry(&self, record: Enquiry) -> CoreResult<Enquiry>;
    async fn update_enquiry(&self, record: &Enquiry) -> CoreResult<()>;
}
