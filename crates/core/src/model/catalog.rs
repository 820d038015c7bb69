use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{DeleteStatus, DisplayStatus, HomeStatus};

/// A marketed service offering. Maps to the `services` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub public_id: String,
    pub title: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub banner_image: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub display_status: DisplayStatus,
    pub home_status: HomeStatus,
    pub delete_status: DeleteStatus,
    pub visited: i64,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub banner_image: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub display_status: Option<DisplayStatus>,
    pub home_status: Option<HomeStatus>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
}

/// Admin projection: everything including status flags and audit refs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAdminView {
    pub id: i64,
    pub public_id: String,
    pub title: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub banner_image: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub display_status: DisplayStatus,
    pub home_status: HomeStatus,
    pub visited: i64,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub subcategory_id: Option<i64>,
    pub subcategory_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

/// Customer projection: no status flags, no audit refs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePublicView {
    pub public_id: String,
    pub title: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub banner_image: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub visited: i64,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ServiceAdminView {
    pub fn project(s: Service, category_name: Option<String>, subcategory_name: Option<String>) -> Self {
        ServiceAdminView {
            id: s.id,
            public_id: s.public_id,
            title: s.title,
            slug: s.slug,
            short_description: s.short_description,
            full_description: s.full_description,
            banner_image: s.banner_image,
            thumbnail: s.thumbnail,
            video_url: s.video_url,
            meta_title: s.meta_title,
            meta_keyword: s.meta_keyword,
            meta_description: s.meta_description,
            display_status: s.display_status,
            home_status: s.home_status,
            visited: s.visited,
            category_id: s.category_id,
            category_name,
            subcategory_id: s.subcategory_id,
            subcategory_name,
            created_at: s.created_at,
            modified_at: s.modified_at,
            created_by: s.created_by,
            modified_by: s.modified_by,
        }
    }
}

impl ServicePublicView {
    pub fn project(s: Service, category_name: Option<String>, subcategory_name: Option<String>) -> Self {
        ServicePublicView {
            public_id: s.public_id,
            title: s.title,
            slug: s.slug,
            short_description: s.short_description,
            full_description: s.full_description,
            banner_image: s.banner_image,
            thumbnail: s.thumbnail,
            video_url: s.video_url,
            meta_title: s.meta_title,
            meta_keyword: s.meta_keyword,
            meta_description: s.meta_description,
            visited: s.visited,
            category_name,
            subcategory_name,
            created_at: s.created_at,
        }
    }
}
