use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{DeleteStatus, DisplayStatus};

/// A client logo shown on the site. Maps to the `clients` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Client {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub display_status: DisplayStatus,
    pub delete_status: DeleteStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub display_status: Option<DisplayStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub display_status: DisplayStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Client> for ClientView {
    fn from(c: Client) -> Self {
        ClientView {
            id: c.id,
            public_id: c.public_id,
            name: c.name,
            slug: c.slug,
            logo: c.logo,
            website_url: c.website_url,
            description: c.description,
            display_status: c.display_status,
            created_at: c.created_at,
            modified_at: c.modified_at,
        }
    }
}
