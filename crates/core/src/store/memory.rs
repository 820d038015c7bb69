//! In-memory store backing the unit tests. Mirrors the Postgres queries'
//! scoping and ordering so the aggregate services can be exercised without
//! a database.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::CoreResult;
use crate::lifecycle::{DeleteStatus, DisplayStatus, HomeStatus};
use crate::model::{Blog, BlogFaq, Category, Client, Enquiry, Service, Subcategory, UserRef};
use crate::CoreError;

use super::{
    BlogStore, CategoryStore, ClientStore, EnquiryStore, ServiceStore, SubcategoryStore,
    UserDirectory,
};

#[derive(Default)]
struct Tables {
    users: Vec<(UserRef, DeleteStatus)>,
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    services: Vec<Service>,
    blogs: Vec<Blog>,
    faqs: Vec<BlogFaq>,
    clients: Vec<Client>,
    enquiries: Vec<Enquiry>,
    next_id: i64,
}

impl Tables {
    fn alloc(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<Tables>>,
}

fn is_active(status: DeleteStatus) -> bool {
    status == DeleteStatus::Active
}

// Matches Postgres LOWER() semantics, which fold beyond ASCII.
fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().expect("store mutex poisoned")
    }

    pub fn seed_user(&self, full_name: &str) -> UserRef {
        self.seed_user_with_status(full_name, DeleteStatus::Active)
    }

    pub fn seed_deleted_user(&self, full_name: &str) -> UserRef {
        self.seed_user_with_status(full_name, DeleteStatus::Deleted)
    }

    fn seed_user_with_status(&self, full_name: &str, delete_status: DeleteStatus) -> UserRef {
        let mut t = self.lock();
        let id = t.alloc();
        let user = UserRef {
            id,
            public_id: format!("user-{id}"),
            full_name: Some(full_name.to_string()),
        };
        t.users.push((user.clone(), delete_status));
        user
    }

    pub fn seed_category(&self, name: &str, slug: &str) -> Category {
        let mut t = self.lock();
        let id = t.alloc();
        let category = Category {
            id,
            public_id: format!("cat-{id}"),
            name: name.to_string(),
            slug: slug.to_string(),
            icon: None,
            meta_title: None,
            meta_keyword: None,
            meta_description: None,
            search_keywords: None,
            display_status: DisplayStatus::Visible,
            delete_status: DeleteStatus::Active,
            created_at: Utc::now(),
            modified_at: None,
            created_by: None,
            modified_by: None,
        };
        t.categories.push(category.clone());
        category
    }

    pub fn seed_subcategory(&self, category_id: i64, name: &str, slug: &str) -> Subcategory {
        let mut t = self.lock();
        let id = t.alloc();
        let sub = Subcategory {
            id,
            public_id: format!("sub-{id}"),
            category_id,
            name: name.to_string(),
            slug: slug.to_string(),
            display_status: DisplayStatus::Visible,
            delete_status: DeleteStatus::Active,
            created_at: Utc::now(),
            modified_at: None,
            created_by: None,
            modified_by: None,
        };
        t.subcategories.push(sub.clone());
        sub
    }

    pub fn seed_service(&self, category_id: i64, title: &str, slug: &str) -> Service {
        let mut t = self.lock();
        let id = t.alloc();
        let service = Service {
            id,
            public_id: format!("svc-{id}"),
            title: title.to_string(),
            slug: slug.to_string(),
            short_description: None,
            full_description: None,
            banner_image: None,
            thumbnail: None,
            video_url: None,
            meta_title: None,
            meta_keyword: None,
            meta_description: None,
            display_status: DisplayStatus::Visible,
            home_status: HomeStatus::NotFeatured,
            delete_status: DeleteStatus::Active,
            visited: 0,
            category_id,
            subcategory_id: None,
            created_at: Utc::now(),
            modified_at: None,
            created_by: None,
            modified_by: None,
        };
        t.services.push(service.clone());
        service
    }
}

#[async_trait]
impl UserDirectory for MemStore {
    async fn find_active_user(&self, id: i64) -> CoreResult<Option<UserRef>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, status)| u.id == id && is_active(*status))
            .map(|(u, _)| u.clone()))
    }
}

#[async_trait]
impl CategoryStore for MemStore {
    async fn find_active_category(&self, id: i64) -> CoreResult<Option<Category>> {
        Ok(self
            .lock()
            .categories
            .iter()
            .find(|c| c.id == id && is_active(c.delete_status))
            .cloned())
    }

    async fn list_active_categories(&self) -> CoreResult<Vec<Category>> {
        let mut rows: Vec<_> = self
            .lock()
            .categories
            .iter()
            .filter(|c| is_active(c.delete_status))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn search_active_categories(&self, keyword: &str) -> CoreResult<Vec<Category>> {
        let mut rows: Vec<_> = self
            .lock()
            .categories
            .iter()
            .filter(|c| is_active(c.delete_status))
            .filter(|c| {
                contains_ci(Some(&c.name), keyword)
                    || contains_ci(c.search_keywords.as_deref(), keyword)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn category_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().categories.iter().any(|c| {
            is_active(c.delete_status)
                && eq_ci(&c.name, name)
                && Some(c.id) != exclude
        }))
    }

    async fn category_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().categories.iter().any(|c| {
            is_active(c.delete_status)
                && eq_ci(&c.slug, slug)
                && Some(c.id) != exclude
        }))
    }

    async fn category_has_children(&self, id: i64) -> CoreResult<bool> {
        let t = self.lock();
        let subs = t
            .subcategories
            .iter()
            .any(|s| s.category_id == id && is_active(s.delete_status));
        let services = t
            .services
            .iter()
            .any(|s| s.category_id == id && is_active(s.delete_status));
        Ok(subs || services)
    }

    async fn insert_category(&self, mut record: Category) -> CoreResult<Category> {
        let mut t = self.lock();
        record.id = t.alloc();
        t.categories.push(record.clone());
        Ok(record)
    }

    async fn update_category(&self, record: &Category) -> CoreResult<()> {
        let mut t = self.lock();
        match t.categories.iter_mut().find(|c| c.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(CoreError::not_found("Category")),
        }
    }
}

#[async_trait]
impl SubcategoryStore for MemStore {
    async fn find_active_subcategory(&self, id: i64) -> CoreResult<Option<Subcategory>> {
        Ok(self
            .lock()
            .subcategories
            .iter()
            .find(|s| s.id == id && is_active(s.delete_status))
            .cloned())
    }

    async fn list_active_subcategories(&self, category_id: Option<i64>) -> CoreResult<Vec<Subcategory>> {
        let mut rows: Vec<_> = self
            .lock()
            .subcategories
            .iter()
            .filter(|s| is_active(s.delete_status))
            .filter(|s| category_id.map(|id| s.category_id == id).unwrap_or(true))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn subcategory_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().subcategories.iter().any(|s| {
            is_active(s.delete_status)
                && eq_ci(&s.name, name)
                && Some(s.id) != exclude
        }))
    }

    async fn subcategory_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().subcategories.iter().any(|s| {
            is_active(s.delete_status)
                && eq_ci(&s.slug, slug)
                && Some(s.id) != exclude
        }))
    }

    async fn insert_subcategory(&self, mut record: Subcategory) -> CoreResult<Subcategory> {
        let mut t = self.lock();
        record.id = t.alloc();
        t.subcategories.push(record.clone());
        Ok(record)
    }

    async fn update_subcategory(&self, record: &Subcategory) -> CoreResult<()> {
        let mut t = self.lock();
        match t.subcategories.iter_mut().find(|s| s.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(CoreError::not_found("Subcategory")),
        }
    }
}

fn public_service(s: &Service) -> bool {
    s.delete_status == DeleteStatus::Active && s.display_status == DisplayStatus::Visible
}

fn sort_latest_services(mut rows: Vec<Service>) -> Vec<Service> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[async_trait]
impl ServiceStore for MemStore {
    async fn find_active_service(&self, id: i64) -> CoreResult<Option<Service>> {
        Ok(self
            .lock()
            .services
            .iter()
            .find(|s| s.id == id && is_active(s.delete_status))
            .cloned())
    }

    async fn find_public_service_by_slug(&self, slug: &str) -> CoreResult<Option<Service>> {
        Ok(self
            .lock()
            .services
            .iter()
            .find(|s| public_service(s) && eq_ci(&s.slug, slug))
            .cloned())
    }

    async fn list_active_services(&self) -> CoreResult<Vec<Service>> {
        let rows = self
            .lock()
            .services
            .iter()
            .filter(|s| is_active(s.delete_status))
            .cloned()
            .collect();
        Ok(sort_latest_services(rows))
    }

    async fn list_public_services(&self) -> CoreResult<Vec<Service>> {
        let rows = self
            .lock()
            .services
            .iter()
            .filter(|s| public_service(s))
            .cloned()
            .collect();
        Ok(sort_latest_services(rows))
    }

    async fn latest_public_services(&self, limit: i64) -> CoreResult<Vec<Service>> {
        let mut rows = self.list_public_services().await?;
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn public_services_by_category(&self, category_id: i64) -> CoreResult<Vec<Service>> {
        let rows = self
            .lock()
            .services
            .iter()
            .filter(|s| public_service(s) && s.category_id == category_id)
            .cloned()
            .collect();
        Ok(sort_latest_services(rows))
    }

    async fn public_services_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<Service>> {
        let rows = self
            .lock()
            .services
            .iter()
            .filter(|s| public_service(s) && s.subcategory_id == Some(subcategory_id))
            .cloned()
            .collect();
        Ok(sort_latest_services(rows))
    }

    async fn featured_public_services(&self) -> CoreResult<Vec<Service>> {
        let rows = self
            .lock()
            .services
            .iter()
            .filter(|s| public_service(s) && s.home_status == HomeStatus::Featured)
            .cloned()
            .collect();
        Ok(sort_latest_services(rows))
    }

    async fn search_active_services(&self, keyword: &str) -> CoreResult<Vec<Service>> {
        let rows = self
            .lock()
            .services
            .iter()
            .filter(|s| is_active(s.delete_status))
            .filter(|s| {
                contains_ci(Some(&s.title), keyword)
                    || contains_ci(s.short_description.as_deref(), keyword)
            })
            .cloned()
            .collect();
        Ok(sort_latest_services(rows))
    }

    async fn load_active_services(&self, ids: &[i64]) -> CoreResult<Vec<Service>> {
        Ok(self
            .lock()
            .services
            .iter()
            .filter(|s| is_active(s.delete_status) && ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn service_title_taken(&self, title: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().services.iter().any(|s| {
            is_active(s.delete_status)
                && eq_ci(&s.title, title)
                && Some(s.id) != exclude
        }))
    }

    async fn service_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().services.iter().any(|s| {
            is_active(s.delete_status)
                && eq_ci(&s.slug, slug)
                && Some(s.id) != exclude
        }))
    }

    async fn insert_service(&self, mut record: Service) -> CoreResult<Service> {
        let mut t = self.lock();
        record.id = t.alloc();
        t.services.push(record.clone());
        Ok(record)
    }

    async fn update_service(&self, record: &Service) -> CoreResult<()> {
        let mut t = self.lock();
        match t.services.iter_mut().find(|s| s.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(CoreError::not_found("Service")),
        }
    }

    async fn bump_service_visits(&self, id: i64) -> CoreResult<()> {
        if let Some(row) = self.lock().services.iter_mut().find(|s| s.id == id) {
            row.visited += 1;
        }
        Ok(())
    }
}

fn public_blog(b: &Blog) -> bool {
    b.delete_status == DeleteStatus::Active && b.display_status == DisplayStatus::Visible
}

fn sort_latest_blogs(mut rows: Vec<Blog>) -> Vec<Blog> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[async_trait]
impl BlogStore for MemStore {
    async fn find_active_blog(&self, id: i64) -> CoreResult<Option<Blog>> {
        Ok(self
            .lock()
            .blogs
            .iter()
            .find(|b| b.id == id && is_active(b.delete_status))
            .cloned())
    }

    async fn find_public_blog_by_slug(&self, slug: &str) -> CoreResult<Option<Blog>> {
        Ok(self
            .lock()
            .blogs
            .iter()
            .find(|b| public_blog(b) && eq_ci(&b.slug, slug))
            .cloned())
    }

    async fn list_active_blogs(&self) -> CoreResult<Vec<Blog>> {
        let rows = self
            .lock()
            .blogs
            .iter()
            .filter(|b| is_active(b.delete_status))
            .cloned()
            .collect();
        Ok(sort_latest_blogs(rows))
    }

    async fn list_public_blogs(&self) -> CoreResult<Vec<Blog>> {
        let rows = self
            .lock()
            .blogs
            .iter()
            .filter(|b| public_blog(b))
            .cloned()
            .collect();
        Ok(sort_latest_blogs(rows))
    }

    async fn latest_public_blogs(&self, limit: i64) -> CoreResult<Vec<Blog>> {
        let mut rows = self.list_public_blogs().await?;
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn public_blogs_by_category(&self, category_id: i64) -> CoreResult<Vec<Blog>> {
        let rows = self
            .lock()
            .blogs
            .iter()
            .filter(|b| public_blog(b) && b.category_id == category_id)
            .cloned()
            .collect();
        Ok(sort_latest_blogs(rows))
    }

    async fn public_blogs_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<Blog>> {
        let rows = self
            .lock()
            .blogs
            .iter()
            .filter(|b| public_blog(b) && b.subcategory_id == Some(subcategory_id))
            .cloned()
            .collect();
        Ok(sort_latest_blogs(rows))
    }

    async fn public_blogs_by_service(&self, service_id: i64) -> CoreResult<Vec<Blog>> {
        let rows = self
            .lock()
            .blogs
            .iter()
            .filter(|b| public_blog(b) && b.service_ids.contains(&service_id))
            .cloned()
            .collect();
        Ok(sort_latest_blogs(rows))
    }

    async fn featured_public_blogs(&self) -> CoreResult<Vec<Blog>> {
        let rows = self
            .lock()
            .blogs
            .iter()
            .filter(|b| public_blog(b) && b.home_status == HomeStatus::Featured)
            .cloned()
            .collect();
        Ok(sort_latest_blogs(rows))
    }

    async fn search_active_blogs(&self, keyword: &str) -> CoreResult<Vec<Blog>> {
        let rows = self
            .lock()
            .blogs
            .iter()
            .filter(|b| is_active(b.delete_status))
            .filter(|b| {
                contains_ci(Some(&b.title), keyword)
                    || contains_ci(b.summary.as_deref(), keyword)
                    || contains_ci(b.description.as_deref(), keyword)
                    || contains_ci(b.search_keyword.as_deref(), keyword)
            })
            .cloned()
            .collect();
        Ok(sort_latest_blogs(rows))
    }

    async fn blog_title_taken(&self, title: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().blogs.iter().any(|b| {
            is_active(b.delete_status)
                && eq_ci(&b.title, title)
                && Some(b.id) != exclude
        }))
    }

    async fn blog_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().blogs.iter().any(|b| {
            is_active(b.delete_status)
                && eq_ci(&b.slug, slug)
                && Some(b.id) != exclude
        }))
    }

    async fn insert_blog(&self, mut record: Blog) -> CoreResult<Blog> {
        let mut t = self.lock();
        record.id = t.alloc();
        t.blogs.push(record.clone());
        Ok(record)
    }

    async fn update_blog(&self, record: &Blog) -> CoreResult<()> {
        let mut t = self.lock();
        match t.blogs.iter_mut().find(|b| b.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(CoreError::not_found("Blog")),
        }
    }

    async fn bump_blog_visits(&self, id: i64) -> CoreResult<()> {
        if let Some(row) = self.lock().blogs.iter_mut().find(|b| b.id == id) {
            row.visited += 1;
        }
        Ok(())
    }

    async fn find_active_faq(&self, blog_id: i64, faq_id: i64) -> CoreResult<Option<BlogFaq>> {
        Ok(self
            .lock()
            .faqs
            .iter()
            .find(|f| {
                f.id == faq_id && f.blog_id == blog_id && is_active(f.delete_status)
            })
            .cloned())
    }

    async fn list_active_faqs(&self, blog_id: i64) -> CoreResult<Vec<BlogFaq>> {
        Ok(self
            .lock()
            .faqs
            .iter()
            .filter(|f| f.blog_id == blog_id && is_active(f.delete_status))
            .cloned()
            .collect())
    }

    async fn insert_faq(&self, mut record: BlogFaq) -> CoreResult<BlogFaq> {
        let mut t = self.lock();
        record.id = t.alloc();
        t.faqs.push(record.clone());
        Ok(record)
    }

    async fn update_faq(&self, record: &BlogFaq) -> CoreResult<()> {
        let mut t = self.lock();
        match t.faqs.iter_mut().find(|f| f.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(CoreError::not_found("FAQ")),
        }
    }
}

#[async_trait]
impl ClientStore for MemStore {
    async fn find_active_client(&self, id: i64) -> CoreResult<Option<Client>> {
        Ok(self
            .lock()
            .clients
            .iter()
            .find(|c| c.id == id && is_active(c.delete_status))
            .cloned())
    }

    async fn list_active_clients(&self) -> CoreResult<Vec<Client>> {
        let mut rows: Vec<_> = self
            .lock()
            .clients
            .iter()
            .filter(|c| is_active(c.delete_status))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn list_public_clients(&self) -> CoreResult<Vec<Client>> {
        let mut rows: Vec<_> = self
            .lock()
            .clients
            .iter()
            .filter(|c| {
                c.delete_status == DeleteStatus::Active
                    && c.display_status == DisplayStatus::Visible
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn search_active_clients(&self, keyword: &str) -> CoreResult<Vec<Client>> {
        let mut rows: Vec<_> = self
            .lock()
            .clients
            .iter()
            .filter(|c| is_active(c.delete_status))
            .filter(|c| {
                contains_ci(Some(&c.name), keyword)
                    || contains_ci(c.website_url.as_deref(), keyword)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn client_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().clients.iter().any(|c| {
            is_active(c.delete_status)
                && eq_ci(&c.name, name)
                && Some(c.id) != exclude
        }))
    }

    async fn client_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        Ok(self.lock().clients.iter().any(|c| {
            is_active(c.delete_status)
                && eq_ci(&c.slug, slug)
                && Some(c.id) != exclude
        }))
    }

    async fn insert_client(&self, mut record: Client) -> CoreResult<Client> {
        let mut t = self.lock();
        record.id = t.alloc();
        t.clients.push(record.clone());
        Ok(record)
    }

    async fn update_client(&self, record: &Client) -> CoreResult<()> {
        let mut t = self.lock();
        match t.clients.iter_mut().find(|c| c.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(CoreError::not_found("Client")),
        }
    }
}

#[async_trait]
impl EnquiryStore for MemStore {
    async fn find_active_enquiry(&self, id: i64) -> CoreResult<Option<Enquiry>> {
        Ok(self
            .lock()
            .enquiries
            .iter()
            .find(|e| e.id == id && is_active(e.delete_status))
            .cloned())
    }

    async fn find_active_enquiry_by_email(&self, email: &str) -> CoreResult<Option<Enquiry>> {
        Ok(self
            .lock()
            .enquiries
            .iter()
            .find(|e| {
                is_active(e.delete_status) && e.email.as_deref() == Some(email)
            })
            .cloned())
    }

    async fn find_active_enquiry_by_mobile(&self, mobile: &str) -> CoreResult<Option<Enquiry>> {
        Ok(self
            .lock()
            .enquiries
            .iter()
            .find(|e| {
                is_active(e.delete_status) && e.mobile.as_deref() == Some(mobile)
            })
            .cloned())
    }

    async fn list_active_enquiries(&self) -> CoreResult<Vec<Enquiry>> {
        let mut rows: Vec<_> = self
            .lock()
            .enquiries
            .iter()
            .filter(|e| is_active(e.delete_status))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn insert_enquiry(&self, mut record: Enquiry) -> CoreResult<Enquiry> {
        let mut t = self.lock();
        record.id = t.alloc();
        t.enquiries.push(record.clone());
        Ok(record)
    }

    async fn update_enquiry(&self, record: &Enquiry) -> CoreResult<()> {
        let mut t = self.lock();
        match t.enquiries.iter_mut().find(|e| e.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(CoreError::not_found("Enquiry")),
        }
    }
}
