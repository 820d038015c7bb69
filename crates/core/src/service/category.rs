//! Category and subcategory aggregate.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::ident::TokenSource;
use crate::lifecycle::{DeleteStatus, DisplayStatus};
use crate::model::{
    Category, CategoryInput, CategoryView, Subcategory, SubcategoryInput, SubcategoryView,
};
use crate::store::{CategoryStore, SubcategoryStore, UserDirectory};
use crate::validate;

#[derive(Clone)]
pub struct CategoryService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl<S> CategoryService<S>
where
    S: CategoryStore + SubcategoryStore + UserDirectory,
{
    pub fn new(store: S, clock: Arc<dyn Clock>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { store, clock, tokens }
    }

    pub async fn list(&self) -> CoreResult<Vec<CategoryView>> {
        let rows = self.store.list_active_categories().await?;
        Ok(rows.into_iter().map(CategoryView::from).collect())
    }

    /// Blank keyword is the unfiltered list, never an error.
    pub async fn search(&self, keyword: &str) -> CoreResult<Vec<CategoryView>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list().await;
        }
        let rows = self.store.search_active_categories(keyword).await?;
        Ok(rows.into_iter().map(CategoryView::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> CoreResult<CategoryView> {
        let category = self
            .store
            .find_active_category(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Category"))?;
        Ok(category.into())
    }

    pub async fn create(&self, input: CategoryInput, acting_user_id: i64) -> CoreResult<CategoryView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let name = validate::required_text(input.name.as_deref(), "Category name")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Category slug")?;

        validate::check_unique(self.store.category_name_taken(&name, None), "Category name").await?;
        validate::check_unique(self.store.category_slug_taken(&slug, None), "Category slug").await?;

        let now = self.clock.now_utc();
        let record = Category {
            id: 0,
            public_id: self.tokens.mint(),
            name,
            slug,
            icon: validate::optional_text(input.icon.as_deref()),
            meta_title: validate::optional_text(input.meta_title.as_deref()),
            meta_keyword: validate::optional_text(input.meta_keyword.as_deref()),
            meta_description: validate::optional_text(input.meta_description.as_deref()),
            search_keywords: validate::optional_text(input.search_keywords.as_deref()),
            display_status: DisplayStatus::from_input(input.display_status),
            delete_status: DeleteStatus::Active,
            created_at: now,
            modified_at: Some(now),
            created_by: Some(user.public_id),
            modified_by: None,
        };
        let saved = self.store.insert_category(record).await?;
        tracing::info!(category = %saved.name, user = acting_user_id, "category created");
        Ok(saved.into())
    }

    pub async fn update(
        &self,
        id: i64,
        input: CategoryInput,
        acting_user_id: i64,
    ) -> CoreResult<CategoryView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut existing = self
            .store
            .find_active_category(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Category"))?;

        let name = validate::required_text(input.name.as_deref(), "Category name")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Category slug")?;

        // Only re-check uniqueness when the normalized value actually
        // changed, so an unchanged name never collides with itself.
        if existing.name.to_lowercase() != name.to_lowercase() {
            validate::check_unique(self.store.category_name_taken(&name, Some(id)), "Category name")
                .await?;
        }
        if existing.slug.to_lowercase() != slug.to_lowercase() {
            validate::check_unique(self.store.category_slug_taken(&slug, Some(id)), "Category slug")
                .await?;
        }

        existing.name = name;
        existing.slug = slug;
        existing.icon = validate::optional_text(input.icon.as_deref());
        existing.meta_title = validate::optional_text(input.meta_title.as_deref());
        existing.meta_keyword = validate::optional_text(input.meta_keyword.as_deref());
        existing.meta_description = validate::optional_text(input.meta_description.as_deref());
        existing.search_keywords = validate::optional_text(input.search_keywords.as_deref());
        existing.display_status = DisplayStatus::from_input(input.display_status);
        existing.modified_at = Some(self.clock.now_utc());
        existing.modified_by = Some(user.public_id);

        self.store.update_category(&existing).await?;
        tracing::info!(category = %existing.name, id, "category updated");
        Ok(existing.into())
    }

    /// Deletion is blocked, not cascaded: a category with active children
    /// cannot be removed.
    pub async fn soft_delete(&self, id: i64, acting_user_id: i64) -> CoreResult<()> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut category = self
            .store
            .find_active_category(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Category"))?;

        if self.store.category_has_children(id).await? {
            return Err(CoreError::invalid(
                "Cannot delete category that has subcategories or services",
            ));
        }

        category.delete_status = DeleteStatus::Deleted;
        category.modified_at = Some(self.clock.now_utc());
        category.modified_by = Some(user.public_id);
        self.store.update_category(&category).await?;
        tracing::info!(id, user = acting_user_id, "category soft deleted");
        Ok(())
    }

    // ---- Subcategories -------------------------------------------------

    pub async fn list_subcategories(&self, category_id: Option<i64>) -> CoreResult<Vec<SubcategoryView>> {
        let rows = self.store.list_active_subcategories(category_id).await?;
        Ok(rows.into_iter().map(SubcategoryView::from).collect())
    }

    pub async fn create_subcategory(
        &self,
        input: SubcategoryInput,
        acting_user_id: i64,
    ) -> CoreResult<SubcategoryView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let name = validate::required_text(input.name.as_deref(), "Subcategory name")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Subcategory slug")?;
        let (category, _) = validate::resolve_hierarchy(&self.store, input.category_id, None).await?;

        validate::check_unique(
            self.store.subcategory_name_taken(&name, None),
            "Subcategory name",
        )
        .await?;
        validate::check_unique(
            self.store.subcategory_slug_taken(&slug, None),
            "Subcategory slug",
        )
        .await?;

        let now = self.clock.now_utc();
        let record = Subcategory {
            id: 0,
            public_id: self.tokens.mint(),
            category_id: category.id,
            name,
            slug,
            display_status: DisplayStatus::from_input(input.display_status),
            delete_status: DeleteStatus::Active,
            created_at: now,
            modified_at: Some(now),
            created_by: Some(user.public_id),
            modified_by: None,
        };
        let saved = self.store.insert_subcategory(record).await?;
        tracing::info!(subcategory = %saved.name, category = saved.category_id, "subcategory created");
        Ok(saved.into())
    }

    pub async fn update_subcategory(
        &self,
        id: i64,
        input: SubcategoryInput,
        acting_user_id: i64,
    ) -> CoreResult<SubcategoryView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut existing = self
            .store
            .find_active_subcategory(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Subcategory"))?;

        let name = validate::required_text(input.name.as_deref(), "Subcategory name")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Subcategory slug")?;
        let (category, _) = validate::resolve_hierarchy(&self.store, input.category_id, None).await?;

        if existing.name.to_lowercase() != name.to_lowercase() {
            validate::check_unique(
                self.store.subcategory_name_taken(&name, Some(id)),
                "Subcategory name",
            )
            .await?;
        }
        if existing.slug.to_lowercase() != slug.to_lowercase() {
            validate::check_unique(
                self.store.subcategory_slug_taken(&slug, Some(id)),
                "Subcategory slug",
            )
            .await?;
        }

        existing.category_id = category.id;
        existing.name = name;
        existing.slug = slug;
        existing.display_status = DisplayStatus::from_input(input.display_status);
        existing.modified_at = Some(self.clock.now_utc());
        existing.modified_by = Some(user.public_id);

        self.store.update_subcategory(&existing).await?;
        Ok(existing.into())
    }

    pub async fn soft_delete_subcategory(&self, id: i64, acting_user_id: i64) -> CoreResult<()> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut sub = self
            .store
            .find_active_subcategory(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Subcategory"))?;

        sub.delete_status = DeleteStatus::Deleted;
        sub.modified_at = Some(self.clock.now_utc());
        sub.modified_by = Some(user.public_id);
        self.store.update_subcategory(&sub).await?;
        tracing::info!(id, user = acting_user_id, "subcategory soft deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ident::SeqTokens;
    use crate::store::memory::MemStore;
    use chrono::{TimeZone, Utc};

    fn service(store: MemStore) -> CategoryService<MemStore> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        CategoryService::new(store, Arc::new(clock), Arc::new(SeqTokens::default()))
    }

    fn input(name: &str, slug: &str) -> CategoryInput {
        CategoryInput {
            name: Some(name.to_string()),
            slug: Some(slug.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_enters_active_and_visible() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let svc = service(store);

        let view = svc.create(input("Legal", "Legal "), user.id).await.unwrap();
        assert_eq!(view.slug, "legal");
        assert_eq!(view.display_status, DisplayStatus::Visible);
        assert_eq!(view.created_by.as_deref(), Some(user.public_id.as_str()));
        assert!(!view.public_id.is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict_case_insensitive() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let svc = service(store);

        svc.create(input("Legal", "legal"), user.id).await.unwrap();
        let err = svc
            .create(input("legal", "legal-2"), user.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_detection_folds_non_ascii_names() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let svc = service(store);

        let created = svc.create(input("Café", "cafe"), user.id).await.unwrap();
        let err = svc
            .create(input("CAFÉ", "cafe-2"), user.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));

        // A recased accented name is still the same name, not a collision.
        let updated = svc
            .update(created.id, input("CAFÉ", "cafe"), user.id)
            .await
            .unwrap();
        assert_eq!(updated.name, "CAFÉ");
    }

    #[tokio::test]
    async fn update_with_unchanged_name_never_self_collides() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let svc = service(store);

        let created = svc.create(input("Legal", "legal"), user.id).await.unwrap();
        let updated = svc
            .update(created.id, input("LEGAL", "legal"), user.id)
            .await
            .unwrap();
        assert_eq!(updated.name, "LEGAL");
        assert_eq!(updated.modified_by.as_deref(), Some(user.public_id.as_str()));
    }

    #[tokio::test]
    async fn soft_delete_is_terminal() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let svc = service(store);

        let created = svc.create(input("Legal", "legal"), user.id).await.unwrap();
        svc.soft_delete(created.id, user.id).await.unwrap();

        assert!(matches!(
            svc.soft_delete(created.id, user.id).await.unwrap_err(),
            CoreError::NotFound(_)
        ));
        assert!(matches!(
            svc.find_by_id(created.id).await.unwrap_err(),
            CoreError::NotFound(_)
        ));
        assert!(matches!(
            svc.update(created.id, input("Legal", "legal"), user.id)
                .await
                .unwrap_err(),
            CoreError::NotFound(_)
        ));
        // The name is free again for new records.
        svc.create(input("Legal", "legal"), user.id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_blocked_while_children_exist() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        store.seed_subcategory(category.id, "Contracts", "contracts");
        let svc = service(store);

        let err = svc.soft_delete(category.id, user.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn subcategory_requires_active_parent() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let category = store.seed_category("Legal", "legal");
        let svc = service(store);

        let sub = svc
            .create_subcategory(
                SubcategoryInput {
                    category_id: Some(category.id),
                    name: Some("Contracts".into()),
                    slug: Some("Contracts".into()),
                    ..Default::default()
                },
                user.id,
            )
            .await
            .unwrap();
        assert_eq!(sub.slug, "contracts");
        assert_eq!(sub.category_id, category.id);

        let err = svc
            .create_subcategory(
                SubcategoryInput {
                    category_id: Some(9999),
                    name: Some("Orphan".into()),
                    slug: Some("orphan".into()),
                    ..Default::default()
                },
                user.id,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_search_equals_list() {
        let store = MemStore::new();
        let user = store.seed_user("Asha");
        let svc = service(store);
        svc.create(input("Legal", "legal"), user.id).await.unwrap();
        svc.create(input("Tax", "tax"), user.id).await.unwrap();

        assert_eq!(svc.search("  ").await.unwrap().len(), 2);
        let hits = svc.search("leg").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Legal");
    }

    #[tokio::test]
    async fn mutation_requires_active_user() {
        let store = MemStore::new();
        let svc = service(store);
        let err = svc.create(input("Legal", "legal"), 7).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn mutation_rejects_soft_deleted_user() {
        let store = MemStore::new();
        let gone = store.seed_deleted_user("Ravi");
        let svc = service(store);
        let err = svc
            .create(input("Legal", "legal"), gone.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }
}
