//! Blog aggregate: posts, owned FAQs, service associations, and the
//! public visit-counting fetch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::ident::TokenSource;
use crate::lifecycle::{DeleteStatus, DisplayStatus, HomeStatus};
use crate::model::blog::BlogNames;
use crate::model::{
    Blog, BlogAdminView, BlogFaq, BlogFaqInput, BlogFaqView, BlogInput, BlogPublicView,
};
use crate::store::{BlogStore, CategoryStore, ServiceStore, SubcategoryStore, UserDirectory};
use crate::validate;

#[derive(Clone)]
pub struct BlogService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl<S> BlogService<S>
where
    S: BlogStore + CategoryStore + SubcategoryStore + ServiceStore + UserDirectory,
{
    pub fn new(store: S, clock: Arc<dyn Clock>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { store, clock, tokens }
    }

    pub async fn create(&self, input: BlogInput, acting_user_id: i64) -> CoreResult<BlogAdminView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let title = validate::required_text(input.title.as_deref(), "Blog title")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Blog slug")?;

        validate::check_unique(self.store.blog_title_taken(&title, None), "Blog with this title")
            .await?;
        validate::check_unique(self.store.blog_slug_taken(&slug, None), "Blog slug").await?;

        let (category, subcategory) =
            validate::resolve_hierarchy(&self.store, input.category_id, input.subcategory_id).await?;
        let service_ids = input.service_ids.unwrap_or_default();
        let services = validate::resolve_services(&self.store, &service_ids).await?;

        let now = self.clock.now_utc();
        let record = Blog {
            id: 0,
            public_id: self.tokens.mint(),
            title,
            slug,
            image: validate::optional_text(input.image.as_deref()),
            summary: validate::optional_text(input.summary.as_deref()),
            description: validate::optional_text(input.description.as_deref()),
            meta_title: validate::optional_text(input.meta_title.as_deref()),
            meta_keyword: validate::optional_text(input.meta_keyword.as_deref()),
            meta_description: validate::optional_text(input.meta_description.as_deref()),
            search_keyword: validate::optional_text(input.search_keyword.as_deref()),
            display_status: DisplayStatus::from_input(input.display_status),
            home_status: HomeStatus::from_input(input.home_status),
            delete_status: DeleteStatus::Active,
            visited: 0,
            category_id: category.id,
            subcategory_id: subcategory.as_ref().map(|s| s.id),
            author_name: user.full_name.clone(),
            created_at: now,
            modified_at: Some(now),
            created_by: Some(user.public_id),
            modified_by: None,
            service_ids,
        };
        let saved = self.store.insert_blog(record).await?;
        tracing::info!(blog = %saved.title, user = acting_user_id, "blog created");
        Ok(BlogAdminView::project(
            saved,
            BlogNames {
                category_name: Some(category.name),
                subcategory_name: subcategory.map(|s| s.name),
                service_titles: services.into_iter().map(|s| s.title).collect(),
            },
        ))
    }

    pub async fn update(&self, id: i64, input: BlogInput, acting_user_id: i64) -> CoreResult<BlogAdminView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut existing = self
            .store
            .find_active_blog(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Blog"))?;

        let title = validate::required_text(input.title.as_deref(), "Blog title")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Blog slug")?;

        if existing.title.to_lowercase() != title.to_lowercase() {
            validate::check_unique(
                self.store.blog_title_taken(&title, Some(id)),
                "Blog with this title",
            )
            .await?;
        }
        if existing.slug.to_lowercase() != slug.to_lowercase() {
            validate::check_unique(self.store.blog_slug_taken(&slug, Some(id)), "Blog slug").await?;
        }

        let (category, subcategory) =
            validate::resolve_hierarchy(&self.store, input.category_id, input.subcategory_id).await?;
        // Associations are replaced wholesale, never merged.
        let service_ids = input.service_ids.unwrap_or_default();
        let services = validate::resolve_services(&self.store, &service_ids).await?;

        existing.title = title;
        existing.slug = slug;
        existing.image = validate::optional_text(input.image.as_deref());
        existing.summary = validate::optional_text(input.summary.as_deref());
        existing.description = validate::optional_text(input.description.as_deref());
        existing.meta_title = validate::optional_text(input.meta_title.as_deref());
        existing.meta_keyword = validate::optional_text(input.meta_keyword.as_deref());
        existing.meta_description = validate::optional_text(input.meta_description.as_deref());
        existing.search_keyword = validate::optional_text(input.search_keyword.as_deref());
        existing.display_status = DisplayStatus::from_input(input.display_status);
        existing.home_status = HomeStatus::from_input(input.home_status);
        existing.category_id = category.id;
        existing.subcategory_id = subcategory.as_ref().map(|s| s.id);
        existing.service_ids = service_ids;
        existing.modified_at = Some(self.clock.now_utc());
        existing.modified_by = Some(user.public_id);

        self.store.update_blog(&existing).await?;
        tracing::info!(blog = %existing.title, id, "blog updated");
        Ok(BlogAdminView::project(
            existing,
            BlogNames {
                category_name: Some(category.name),
                subcategory_name: subcategory.map(|s| s.name),
                service_titles: services.into_iter().map(|s| s.title).collect(),
            },
        ))
    }

    pub async fn soft_delete(&self, id: i64, acting_user_id: i64) -> CoreResult<()> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut blog = self
            .store
            .find_active_blog(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Blog"))?;

        blog.delete_status = DeleteStatus::Deleted;
        blog.modified_at = Some(self.clock.now_utc());
        blog.modified_by = Some(user.public_id);
        self.store.update_blog(&blog).await?;
        tracing::info!(id, user = acting_user_id, "blog soft deleted");
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> CoreResult<BlogAdminView> {
        let blog = self
            .store
            .find_active_blog(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Blog"))?;
        let names = self.names_for(&blog).await?;
        Ok(BlogAdminView::project(blog, names))
    }

    pub async fn list(&self) -> CoreResult<Vec<BlogAdminView>> {
        let rows = self.store.list_active_blogs().await?;
        self.admin_views(rows).await
    }

    pub async fn search(&self, keyword: &str) -> CoreResult<Vec<BlogAdminView>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list().await;
        }
        let rows = self.store.search_active_blogs(keyword).await?;
        self.admin_views(rows).await
    }

    // ---- Customer-facing reads ------------------------------------------

    pub async fn list_public(&self) -> CoreResult<Vec<BlogPublicView>> {
        let rows = self.store.list_public_blogs().await?;
        self.public_views(rows).await
    }

    pub async fn latest_public(&self, limit: i64) -> CoreResult<Vec<BlogPublicView>> {
        let rows = self.store.latest_public_blogs(limit).await?;
        self.public_views(rows).await
    }

    pub async fn public_by_category(&self, category_id: i64) -> CoreResult<Vec<BlogPublicView>> {
        if category_id <= 0 {
            return Ok(Vec::new());
        }
        let rows = self.store.public_blogs_by_category(category_id).await?;
        self.public_views(rows).await
    }

    pub async fn public_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<BlogPublicView>> {
        if subcategory_id <= 0 {
            return Ok(Vec::new());
        }
        let rows = self.store.public_blogs_by_subcategory(subcategory_id).await?;
        self.public_views(rows).await
    }

    pub async fn public_by_service(&self, service_id: i64) -> CoreResult<Vec<BlogPublicView>> {
        if service_id <= 0 {
            return Ok(Vec::new());
        }
        let rows = self.store.public_blogs_by_service(service_id).await?;
        self.public_views(rows).await
    }

    pub async fn featured_public(&self) -> CoreResult<Vec<BlogPublicView>> {
        let rows = self.store.featured_public_blogs().await?;
        self.public_views(rows).await
    }

    pub async fn search_public(&self, keyword: &str) -> CoreResult<Vec<BlogPublicView>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list_public().await;
        }
        let rows = self.store.search_active_blogs(keyword).await?;
        let visible = rows
            .into_iter()
            .filter(|b| b.display_status == DisplayStatus::Visible)
            .collect();
        self.public_views(visible).await
    }

    /// Public single-item fetch by slug. A hit records one visit before the
    /// projection is built; a miss performs no write and returns `None`.
    pub async fn fetch_by_slug_and_record_visit(&self, slug: &str) -> CoreResult<Option<BlogPublicView>> {
        let slug = slug.trim().to_lowercase();
        if slug.is_empty() {
            return Ok(None);
        }
        let Some(mut blog) = self.store.find_public_blog_by_slug(&slug).await? else {
            return Ok(None);
        };
        self.store.bump_blog_visits(blog.id).await?;
        blog.visited += 1;
        let names = self.names_for(&blog).await?;
        Ok(Some(BlogPublicView::project(blog, names)))
    }

    // ---- FAQs (owned children) -------------------------------------------

    pub async fn list_faqs(&self, blog_id: i64) -> CoreResult<Vec<BlogFaqView>> {
        self.active_blog(blog_id).await?;
        let rows = self.store.list_active_faqs(blog_id).await?;
        Ok(rows.into_iter().map(BlogFaqView::from).collect())
    }

    pub async fn add_faq(
        &self,
        blog_id: i64,
        input: BlogFaqInput,
        acting_user_id: i64,
    ) -> CoreResult<BlogFaqView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        self.active_blog(blog_id).await?;
        let title = validate::required_text(input.title.as_deref(), "FAQ title")?;

        let now = self.clock.now_utc();
        let record = BlogFaq {
            id: 0,
            public_id: self.tokens.mint(),
            blog_id,
            title,
            description: validate::optional_text(input.description.as_deref()),
            display_status: DisplayStatus::from_input(input.display_status),
            delete_status: DeleteStatus::Active,
            created_at: now,
            modified_at: Some(now),
            created_by: Some(user.public_id),
            modified_by: None,
        };
        let saved = self.store.insert_faq(record).await?;
        tracing::info!(faq = saved.id, blog = blog_id, "blog faq created");
        Ok(saved.into())
    }

    pub async fn update_faq(
        &self,
        blog_id: i64,
        faq_id: i64,
        input: BlogFaqInput,
        acting_user_id: i64,
    ) -> CoreResult<BlogFaqView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        self.active_blog(blog_id).await?;
        let mut faq = self
            .store
            .find_active_faq(blog_id, faq_id)
            .await?
            .ok_or_else(|| CoreError::not_found("FAQ"))?;

        faq.title = validate::required_text(input.title.as_deref(), "FAQ title")?;
        faq.description = validate::optional_text(input.description.as_deref());
        faq.display_status = DisplayStatus::from_input(input.display_status);
        faq.modified_at = Some(self.clock.now_utc());
        faq.modified_by = Some(user.public_id);

        self.store.update_faq(&faq).await?;
        Ok(faq.into())
    }

    pub async fn soft_delete_faq(&self, blog_id: i64, faq_id: i64, acting_user_id: i64) -> CoreResult<()> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        self.active_blog(blog_id).await?;
        let mut faq = self
            .store
            .find_active_faq(blog_id, faq_id)
            .await?
            .ok_or_else(|| CoreError::not_found("FAQ"))?;

        faq.delete_status = DeleteStatus::Deleted;
        faq.modified_at = Some(self.clock.now_utc());
        faq.modified_by = Some(user.public_id);
        self.store.update_faq(&faq).await?;
        tracing::info!(faq = faq_id, blog = blog_id, "blog faq soft deleted");
        Ok(())
    }

    // ---- Projection helpers ----------------------------------------------

    async fn active_blog(&self, id: i64) -> CoreResult<Blog> {
        self.store
            .find_active_blog(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Blog"))
    }

    async fn names_for(&self, blog: &Blog) -> CoreResult<BlogNames> {
        let category_name = self
            .store
            .find_active_category(blog.category_id)
            .await?
            .map(|c| c.name);
        let subcategory_name = match blog.subcategory_id {
            Some(id) => self.store.find_active_subcategory(id).await?.map(|s| s.name),
            None => None,
        };
        let service_titles = self
            .store
            .load_active_services(&blog.service_ids)
            .await?
            .into_iter()
            .map(|s| s.title)
            .collect();
        Ok(BlogNames {
            category_name,
            subcategory_name,
            service_titles,
        })
    }

    async fn name_maps(
        &self,
    ) -> CoreResult<(HashMap<i64, String>, HashMap<i64, String>, HashMap<i64, String>)> {
        let categories = self
            .store
            .list_active_categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let subcategories = self
            .store
            .list_active_subcategories(None)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();
        let services = self
            .store
            .list_active_services()
            .await?
            .into_iter()
            .map(|s| (s.id, s.title))
            .collect();
        Ok((categories, subcategories, services))
    }

    fn names_from_maps(
        blog: &Blog,
        categories: &HashMap<i64, String>,
        subcategories: &HashMap<i64, String>,
        services: &HashMap<i64, String>,
    ) -> BlogNames {
        BlogNames {
            category_name: categories.get(&blog.category_id).cloned(),
            subcategory_name: blog
                .subcategory_id
                .and_then(|id| subcategories.get(&id).cloned()),
            service_titles: blog
                .service_ids
                .iter()
                .filter_map(|id| services.get(id).cloned())
                .collect(),
        }
    }

    async fn admin_views(&self, rows: Vec<Blog>) -> CoreResult<Vec<BlogAdminView>> {
        let (categories, subcategories, services) = self.name_maps().await?;
        Ok(rows
            .into_iter()
            .map(|b| {
                let names = Self::names_from_maps(&b, &categories, &subcategories, &services);
                BlogAdminView::project(b, names)
            })
            .collect())
    }

    async fn public_views(&self, rows: Vec<Blog>) -> CoreResult<Vec<BlogPublicView>> {
        let (categories, subcategories, services) = self.name_maps().await?;
        Ok(rows
            .into_iter()
            .map(|b| {
                let names = Self::names_from_maps(&b, &categories, &subcategories, &services);
                BlogPublicView::project(b, names)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ident::SeqTokens;
    use crate::store::memory::MemStore;
    use chrono::{TimeZone, Utc};

    fn blog_service(store: MemStore) -> BlogService<MemStore> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        BlogService::new(store, Arc::new(clock), Arc::new(SeqTokens::default()))
    }

    fn input(title: &str, slug: &str, category_id: i64) -> BlogInput {
        BlogInput {
            title: Some(title.to_string()),
            slug: Some(slug.to_string()),
            summary: Some("summary".into()),
            description: Some("description".into()),
            category_id: Some(category_id),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_snapshots_author_and_defaults() {
        let store = MemStore::new();
        let user = store.seed_user("Asha Rao");
        let category = store.seed_category("Legal", "legal");
        let svc = blog_service(store);

        let view = svc
            .create(input("First Post", " First-Post ", category.id), user.id)
            .await
            .unwrap();
        assert_eq!(view.slug, "first-post");
        assert_eq!(view.author_name.as_deref(), Some("Asha Rao"));
        assert_eq!(view.category_name.as_deref(), Some("Legal"));
        assert_eq!(view.display_status, DisplayStatus::Visible);
        assert_eq!(view.home_status, HomeStatus::NotFeatured);
    }

    #[tokio::test]
    async fn subcategory_from_wrong_category_fails() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let cat_a = store.seed_category("Legal", "legal");
        let cat_b = store.seed_category("Tax", "tax");
        let sub_b = store.seed_subcategory(cat_b.id, "GST", "gst");
        let svc = blog_service(store);

        let mut req = input("Post", "post", cat_a.id);
        req.subcategory_id = Some(sub_b.id);
        let err = svc.create(req, user.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn associations_are_validated_and_replaced() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        let svc_a = store.seed_service(category.id, "Drafting", "drafting");
        let svc_b = store.seed_service(category.id, "Notary", "notary");
        let svc = blog_service(store);

        let mut req = input("Post", "post", category.id);
        req.service_ids = Some(vec![svc_a.id]);
        let created = svc.create(req, user.id).await.unwrap();
        assert_eq!(created.service_titles, vec!["Drafting".to_string()]);

        // Replace, not merge.
        let mut req = input("Post", "post", category.id);
        req.service_ids = Some(vec![svc_b.id]);
        let updated = svc.update(created.id, req, user.id).await.unwrap();
        assert_eq!(updated.service_ids, vec![svc_b.id]);
        assert_eq!(updated.service_titles, vec!["Notary".to_string()]);

        // Unknown association id fails the whole mutation.
        let mut req = input("Post", "post", category.id);
        req.service_ids = Some(vec![svc_b.id, 9999]);
        let err = svc.update(created.id, req, user.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn failed_update_leaves_row_and_associations_untouched() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        let svc_a = store.seed_service(category.id, "Drafting", "drafting");
        let svc = blog_service(store);

        let mut req = input("Post", "post", category.id);
        req.service_ids = Some(vec![svc_a.id]);
        let created = svc.create(req, user.id).await.unwrap();

        // The row change and the association change land together or not
        // at all; a bad association id must not leave a half-applied update.
        let mut req = input("Renamed", "renamed", category.id);
        req.service_ids = Some(vec![svc_a.id, 9999]);
        let err = svc.update(created.id, req, user.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));

        let current = svc.find_by_id(created.id).await.unwrap();
        assert_eq!(current.title, "Post");
        assert_eq!(current.slug, "post");
        assert_eq!(current.service_ids, vec![svc_a.id]);
    }

    #[tokio::test]
    async fn duplicate_title_conflicts_until_deleted() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        let svc = blog_service(store);

        let first = svc
            .create(input("Post", "post", category.id), user.id)
            .await
            .unwrap();
        let err = svc
            .create(input("POST", "post-2", category.id), user.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));

        svc.soft_delete(first.id, user.id).await.unwrap();
        svc.create(input("Post", "post", category.id), user.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn visit_counter_returns_post_increment_state() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        let svc = blog_service(store);

        svc.create(input("Post", "post", category.id), user.id)
            .await
            .unwrap();

        let seen = svc
            .fetch_by_slug_and_record_visit("post")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(seen.visited, 1);
        let seen = svc
            .fetch_by_slug_and_record_visit("post")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(seen.visited, 2);
        assert!(svc
            .fetch_by_slug_and_record_visit("absent")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn faqs_are_scoped_to_their_parent() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        let svc = blog_service(store);

        let blog_a = svc
            .create(input("Post A", "post-a", category.id), user.id)
            .await
            .unwrap();
        let blog_b = svc
            .create(input("Post B", "post-b", category.id), user.id)
            .await
            .unwrap();

        let faq = svc
            .add_faq(
                blog_a.id,
                BlogFaqInput {
                    title: Some("How long does it take?".into()),
                    description: Some("Two weeks.".into()),
                    ..Default::default()
                },
                user.id,
            )
            .await
            .unwrap();

        // Same faq id under the wrong parent is NotFound.
        let err = svc
            .update_faq(
                blog_b.id,
                faq.id,
                BlogFaqInput {
                    title: Some("changed".into()),
                    ..Default::default()
                },
                user.id,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        svc.soft_delete_faq(blog_a.id, faq.id, user.id).await.unwrap();
        assert!(svc.list_faqs(blog_a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn public_search_blank_keyword_is_full_public_list() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        let svc = blog_service(store);

        svc.create(input("Visible Post", "visible", category.id), user.id)
            .await
            .unwrap();
        let mut hidden = input("Hidden Post", "hidden", category.id);
        hidden.display_status = Some(DisplayStatus::Hidden);
        svc.create(hidden, user.id).await.unwrap();

        let all = svc.search_public("").await.unwrap();
        assert_eq!(all.len(), 1);

        // Keyword search also stays public-scoped.
        let hits = svc.search_public("post").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Visible Post");
    }
}
