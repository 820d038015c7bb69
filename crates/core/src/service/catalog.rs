//! Service-offering aggregate.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::ident::TokenSource;
use crate::lifecycle::{DeleteStatus, DisplayStatus, HomeStatus};
use crate::model::{Service, ServiceAdminView, ServiceInput, ServicePublicView};
use crate::store::{CategoryStore, ServiceStore, SubcategoryStore, UserDirectory};
use crate::validate;

#[derive(Clone)]
pub struct ServiceCatalog<S> {
    store: S,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl<S> ServiceCatalog<S>
where
    S: ServiceStore + CategoryStore + SubcategoryStore + UserDirectory,
{
    pub fn new(store: S, clock: Arc<dyn Clock>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { store, clock, tokens }
    }

    pub async fn create(&self, input: ServiceInput, acting_user_id: i64) -> CoreResult<ServiceAdminView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let title = validate::required_text(input.title.as_deref(), "Service title")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Service slug")?;

        validate::check_unique(self.store.service_title_taken(&title, None), "Service with this title")
            .await?;
        validate::check_unique(self.store.service_slug_taken(&slug, None), "Service slug").await?;

        let (category, subcategory) =
            validate::resolve_hierarchy(&self.store, input.category_id, input.subcategory_id).await?;

        let now = self.clock.now_utc();
        let record = Service {
            id: 0,
            public_id: self.tokens.mint(),
            title,
            slug,
            short_description: validate::optional_text(input.short_description.as_deref()),
            full_description: validate::optional_text(input.full_description.as_deref()),
            banner_image: validate::optional_text(input.banner_image.as_deref()),
            thumbnail: validate::optional_text(input.thumbnail.as_deref()),
            video_url: validate::optional_text(input.video_url.as_deref()),
            meta_title: validate::optional_text(input.meta_title.as_deref()),
            meta_keyword: validate::optional_text(input.meta_keyword.as_deref()),
            meta_description: validate::optional_text(input.meta_description.as_deref()),
            display_status: DisplayStatus::from_input(input.display_status),
            home_status: HomeStatus::from_input(input.home_status),
            delete_status: DeleteStatus::Active,
            visited: 0,
            category_id: category.id,
            subcategory_id: subcategory.as_ref().map(|s| s.id),
            created_at: now,
            modified_at: Some(now),
            created_by: Some(user.public_id),
            modified_by: None,
        };
        let saved = self.store.insert_service(record).await?;
        tracing::info!(service = %saved.title, user = acting_user_id, "service created");
        Ok(ServiceAdminView::project(
            saved,
            Some(category.name),
            subcategory.map(|s| s.name),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        input: ServiceInput,
        acting_user_id: i64,
    ) -> CoreResult<ServiceAdminView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut existing = self
            .store
            .find_active_service(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Service"))?;

        let title = validate::required_text(input.title.as_deref(), "Service title")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Service slug")?;

        if existing.title.to_lowercase() != title.to_lowercase() {
            validate::check_unique(
                self.store.service_title_taken(&title, Some(id)),
                "Service with this title",
            )
            .await?;
        }
        if existing.slug.to_lowercase() != slug.to_lowercase() {
            validate::check_unique(self.store.service_slug_taken(&slug, Some(id)), "Service slug")
                .await?;
        }

        let (category, subcategory) =
            validate::resolve_hierarchy(&self.store, input.category_id, input.subcategory_id).await?;

        existing.title = title;
        existing.slug = slug;
        existing.short_description = validate::optional_text(input.short_description.as_deref());
        existing.full_description = validate::optional_text(input.full_description.as_deref());
        existing.banner_image = validate::optional_text(input.banner_image.as_deref());
        existing.thumbnail = validate::optional_text(input.thumbnail.as_deref());
        existing.video_url = validate::optional_text(input.video_url.as_deref());
        existing.meta_title = validate::optional_text(input.meta_title.as_deref());
        existing.meta_keyword = validate::optional_text(input.meta_keyword.as_deref());
        existing.meta_description = validate::optional_text(input.meta_description.as_deref());
        existing.display_status = DisplayStatus::from_input(input.display_status);
        existing.home_status = HomeStatus::from_input(input.home_status);
        existing.category_id = category.id;
        existing.subcategory_id = subcategory.as_ref().map(|s| s.id);
        existing.modified_at = Some(self.clock.now_utc());
        existing.modified_by = Some(user.public_id);

        self.store.update_service(&existing).await?;
        tracing::info!(service = %existing.title, id, "service updated");
        Ok(ServiceAdminView::project(
            existing,
            Some(category.name),
            subcategory.map(|s| s.name),
        ))
    }

    pub async fn soft_delete(&self, id: i64, acting_user_id: i64) -> CoreResult<()> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut service = self
            .store
            .find_active_service(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Service"))?;

        service.delete_status = DeleteStatus::Deleted;
        service.modified_at = Some(self.clock.now_utc());
        service.modified_by = Some(user.public_id);
        self.store.update_service(&service).await?;
        tracing::info!(id, user = acting_user_id, "service soft deleted");
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> CoreResult<ServiceAdminView> {
        let service = self
            .store
            .find_active_service(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Service"))?;
        let (category_name, subcategory_name) = self.names_for(&service).await?;
        Ok(ServiceAdminView::project(service, category_name, subcategory_name))
    }

    pub async fn list(&self) -> CoreResult<Vec<ServiceAdminView>> {
        let rows = self.store.list_active_services().await?;
        self.admin_views(rows).await
    }

    pub async fn search(&self, keyword: &str) -> CoreResult<Vec<ServiceAdminView>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list().await;
        }
        let rows = self.store.search_active_services(keyword).await?;
        self.admin_views(rows).await
    }

    // ---- Customer-facing reads ------------------------------------------

    pub async fn list_public(&self) -> CoreResult<Vec<ServicePublicView>> {
        let rows = self.store.list_public_services().await?;
        self.public_views(rows).await
    }

    pub async fn latest_public(&self, limit: i64) -> CoreResult<Vec<ServicePublicView>> {
        let rows = self.store.latest_public_services(limit).await?;
        self.public_views(rows).await
    }

    pub async fn public_by_category(&self, category_id: i64) -> CoreResult<Vec<ServicePublicView>> {
        if category_id <= 0 {
            return Ok(Vec::new());
        }
        let rows = self.store.public_services_by_category(category_id).await?;
        self.public_views(rows).await
    }

    pub async fn public_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<ServicePublicView>> {
        if subcategory_id <= 0 {
            return Ok(Vec::new());
        }
        let rows = self.store.public_services_by_subcategory(subcategory_id).await?;
        self.public_views(rows).await
    }

    pub async fn featured_public(&self) -> CoreResult<Vec<ServicePublicView>> {
        let rows = self.store.featured_public_services().await?;
        self.public_views(rows).await
    }

    pub async fn search_public(&self, keyword: &str) -> CoreResult<Vec<ServicePublicView>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list_public().await;
        }
        let rows = self.store.search_active_services(keyword).await?;
        let visible = rows
            .into_iter()
            .filter(|s| s.display_status == DisplayStatus::Visible)
            .collect();
        self.public_views(visible).await
    }

    /// Public single-item fetch by slug. A hit records one visit before the
    /// projection is built, so the returned count includes this view; a
    /// miss performs no write.
    pub async fn fetch_by_slug_and_record_visit(
        &self,
        slug: &str,
    ) -> CoreResult<Option<ServicePublicView>> {
        let slug = slug.trim().to_lowercase();
        if slug.is_empty() {
            return Ok(None);
        }
        let Some(mut service) = self.store.find_public_service_by_slug(&slug).await? else {
            return Ok(None);
        };
        self.store.bump_service_visits(service.id).await?;
        service.visited += 1;
        let (category_name, subcategory_name) = self.names_for(&service).await?;
        Ok(Some(ServicePublicView::project(
            service,
            category_name,
            subcategory_name,
        )))
    }

    // ---- Projection helpers ----------------------------------------------

    async fn names_for(&self, service: &Service) -> CoreResult<(Option<String>, Option<String>)> {
        let category_name = self
            .store
            .find_active_category(service.category_id)
            .await?
            .map(|c| c.name);
        let subcategory_name = match service.subcategory_id {
            Some(id) => self.store.find_active_subcategory(id).await?.map(|s| s.name),
            None => None,
        };
        Ok((category_name, subcategory_name))
    }

    async fn name_maps(&self) -> CoreResult<(HashMap<i64, String>, HashMap<i64, String>)> {
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
        Ok((categories, subcategories))
    }

    async fn admin_views(&self, rows: Vec<Service>) -> CoreResult<Vec<ServiceAdminView>> {
        let (categories, subcategories) = self.name_maps().await?;
        Ok(rows
            .into_iter()
            .map(|s| {
                let category_name = categories.get(&s.category_id).cloned();
                let subcategory_name = s
                    .subcategory_id
                    .and_then(|id| subcategories.get(&id).cloned());
                ServiceAdminView::project(s, category_name, subcategory_name)
            })
            .collect())
    }

    async fn public_views(&self, rows: Vec<Service>) -> CoreResult<Vec<ServicePublicView>> {
        let (categories, subcategories) = self.name_maps().await?;
        Ok(rows
            .into_iter()
            .map(|s| {
                let category_name = categories.get(&s.category_id).cloned();
                let subcategory_name = s
                    .subcategory_id
                    .and_then(|id| subcategories.get(&id).cloned());
                ServicePublicView::project(s, category_name, subcategory_name)
            })
            .collect())
    }
}
