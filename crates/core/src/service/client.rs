//! Client logo aggregate.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::ident::TokenSource;
use crate::lifecycle::{DeleteStatus, DisplayStatus};
use crate::model::{Client, ClientInput, ClientView};
use crate::store::{ClientStore, UserDirectory};
use crate::validate;

#[derive(Clone)]
pub struct ClientService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl<S> ClientService<S>
where
    S: ClientStore + UserDirectory,
{
    pub fn new(store: S, clock: Arc<dyn Clock>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { store, clock, tokens }
    }

    pub async fn create(&self, input: ClientInput, acting_user_id: i64) -> CoreResult<ClientView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let name = validate::required_text(input.name.as_deref(), "Client name")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Client slug")?;

        validate::check_unique(self.store.client_name_taken(&name, None), "Client with this name")
            .await?;
        validate::check_unique(self.store.client_slug_taken(&slug, None), "Client slug").await?;

        let now = self.clock.now_utc();
        let record = Client {
            id: 0,
            public_id: self.tokens.mint(),
            name,
            slug,
            logo: validate::optional_text(input.logo.as_deref()),
            website_url: validate::optional_text(input.website_url.as_deref()),
            description: validate::optional_text(input.description.as_deref()),
            display_status: DisplayStatus::from_input(input.display_status),
            delete_status: DeleteStatus::Active,
            created_at: now,
            modified_at: Some(now),
            created_by: Some(user.public_id),
            modified_by: None,
        };
        let saved = self.store.insert_client(record).await?;
        tracing::info!(client = %saved.name, user = acting_user_id, "client created");
        Ok(saved.into())
    }

    pub async fn update(&self, id: i64, input: ClientInput, acting_user_id: i64) -> CoreResult<ClientView> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut existing = self
            .store
            .find_active_client(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Client"))?;

        let name = validate::required_text(input.name.as_deref(), "Client name")?;
        let slug = validate::normalized_slug(input.slug.as_deref(), "Client slug")?;

        if existing.name.to_lowercase() != name.to_lowercase() {
            validate::check_unique(
                self.store.client_name_taken(&name, Some(id)),
                "Client with this name",
            )
            .await?;
        }
        if existing.slug.to_lowercase() != slug.to_lowercase() {
            validate::check_unique(self.store.client_slug_taken(&slug, Some(id)), "Client slug")
                .await?;
        }

        existing.name = name;
        existing.slug = slug;
        existing.logo = validate::optional_text(input.logo.as_deref());
        existing.website_url = validate::optional_text(input.website_url.as_deref());
        existing.description = validate::optional_text(input.description.as_deref());
        existing.display_status = DisplayStatus::from_input(input.display_status);
        existing.modified_at = Some(self.clock.now_utc());
        existing.modified_by = Some(user.public_id);

        self.store.update_client(&existing).await?;
        Ok(existing.into())
    }

    pub async fn soft_delete(&self, id: i64, acting_user_id: i64) -> CoreResult<()> {
        let user = validate::acting_user(&self.store, acting_user_id).await?;
        let mut client = self
            .store
            .find_active_client(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Client"))?;

        client.delete_status = DeleteStatus::Deleted;
        client.modified_at = Some(self.clock.now_utc());
        client.modified_by = Some(user.public_id);
        self.store.update_client(&client).await?;
        tracing::info!(id, user = acting_user_id, "client soft deleted");
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> CoreResult<ClientView> {
        self.store
            .find_active_client(id)
            .await?
            .map(ClientView::from)
            .ok_or_else(|| CoreError::not_found("Client"))
    }

    pub async fn list(&self) -> CoreResult<Vec<ClientView>> {
        let rows = self.store.list_active_clients().await?;
        Ok(rows.into_iter().map(ClientView::from).collect())
    }

    pub async fn list_public(&self) -> CoreResult<Vec<ClientView>> {
        let rows = self.store.list_public_clients().await?;
        Ok(rows.into_iter().map(ClientView::from).collect())
    }

    pub async fn search(&self, keyword: &str) -> CoreResult<Vec<ClientView>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list().await;
        }
        let rows = self.store.search_active_clients(keyword).await?;
        Ok(rows.into_iter().map(ClientView::from).collect())
    }
}
