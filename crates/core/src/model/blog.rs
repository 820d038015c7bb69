use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{DeleteStatus, DisplayStatus, HomeStatus};

/// A blog post. Maps to the `blogs` table; the service association lives
/// in the `blog_services` join table and is loaded separately.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Blog {
    pub id: i64,
    pub public_id: String,
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub search_keyword: Option<String>,
    pub display_status: DisplayStatus,
    pub home_status: HomeStatus,
    pub delete_status: DeleteStatus,
    pub visited: i64,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    /// Snapshot of the author's display name taken at creation.
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    /// Associated service ids, loaded from the join table.
    #[sqlx(skip)]
    pub service_ids: Vec<i64>,
}

/// FAQ owned by a blog post. Lifecycle tied to the parent: lookups are
/// always scoped to the owning blog.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogFaq {
    pub id: i64,
    pub public_id: String,
    pub blog_id: i64,
    pub title: String,
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
pub struct BlogInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub search_keyword: Option<String>,
    pub display_status: Option<DisplayStatus>,
    pub home_status: Option<HomeStatus>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub service_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFaqInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub display_status: Option<DisplayStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogAdminView {
    pub id: i64,
    pub public_id: String,
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub search_keyword: Option<String>,
    pub display_status: DisplayStatus,
    pub home_status: HomeStatus,
    pub visited: i64,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub subcategory_id: Option<i64>,
    pub subcategory_name: Option<String>,
    pub service_ids: Vec<i64>,
    pub service_titles: Vec<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPublicView {
    pub public_id: String,
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub visited: i64,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub service_titles: Vec<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Display names resolved from the blog's weak references at projection
/// time; never required for the mutation itself.
#[derive(Debug, Clone, Default)]
pub struct BlogNames {
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub service_titles: Vec<String>,
}

impl BlogAdminView {
    pub fn project(b: Blog, names: BlogNames) -> Self {
        BlogAdminView {
            id: b.id,
            public_id: b.public_id,
            title: b.title,
            slug: b.slug,
            image: b.image,
            summary: b.summary,
            description: b.description,
            meta_title: b.meta_title,
            meta_keyword: b.meta_keyword,
            meta_description: b.meta_description,
            search_keyword: b.search_keyword,
            display_status: b.display_status,
            home_status: b.home_status,
            visited: b.visited,
            category_id: b.category_id,
            category_name: names.category_name,
            subcategory_id: b.subcategory_id,
            subcategory_name: names.subcategory_name,
            service_ids: b.service_ids,
            service_titles: names.service_titles,
            author_name: b.author_name,
            created_at: b.created_at,
            modified_at: b.modified_at,
            created_by: b.created_by,
            modified_by: b.modified_by,
        }
    }
}

impl BlogPublicView {
    pub fn project(b: Blog, names: BlogNames) -> Self {
        BlogPublicView {
            public_id: b.public_id,
            title: b.title,
            slug: b.slug,
            image: b.image,
            summary: b.summary,
            description: b.description,
            meta_title: b.meta_title,
            meta_keyword: b.meta_keyword,
            meta_description: b.meta_description,
            visited: b.visited,
            category_name: names.category_name,
            subcategory_name: names.subcategory_name,
            service_titles: names.service_titles,
            author_name: b.author_name,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFaqView {
    pub id: i64,
    pub public_id: String,
    pub blog_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub display_status: DisplayStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<BlogFaq> for BlogFaqView {
    fn from(f: BlogFaq) -> Self {
        BlogFaqView {
            id: f.id,
            public_id: f.public_id,
            blog_id: f.blog_id,
            title: f.title,
            description: f.description,
            display_status: f.display_status,
            created_at: f.created_at,
            modified_at: f.modified_at,
        }
    }
}
