use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{DeleteStatus, DisplayStatus};

/// Top-level service/blog grouping. Maps to the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub search_keywords: Option<String>,
    pub display_status: DisplayStatus,
    pub delete_status: DeleteStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

/// Optional second taxonomy level. Always belongs to exactly one category.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subcategory {
    pub id: i64,
    pub public_id: String,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub display_status: DisplayStatus,
    pub delete_status: DeleteStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub icon: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub search_keywords: Option<String>,
    pub display_status: Option<DisplayStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryInput {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub display_status: Option<DisplayStatus>,
}

/// Admin projection of a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub meta_title: Option<String>,
    pub meta_keyword: Option<String>,
    pub meta_description: Option<String>,
    pub search_keywords: Option<String>,
    pub display_status: DisplayStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

impl From<Category> for CategoryView {
    fn from(c: Category) -> Self {
        CategoryView {
            id: c.id,
            public_id: c.public_id,
            name: c.name,
            slug: c.slug,
            icon: c.icon,
            meta_title: c.meta_title,
            meta_keyword: c.meta_keyword,
            meta_description: c.meta_description,
            search_keywords: c.search_keywords,
            display_status: c.display_status,
            created_at: c.created_at,
            modified_at: c.modified_at,
            created_by: c.created_by,
            modified_by: c.modified_by,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryView {
    pub id: i64,
    pub public_id: String,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub display_status: DisplayStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Subcategory> for SubcategoryView {
    fn from(s: Subcategory) -> Self {
        SubcategoryView {
            id: s.id,
            public_id: s.public_id,
            category_id: s.category_id,
            name: s.name,
            slug: s.slug,
            display_status: s.display_status,
            created_at: s.created_at,
            modified_at: s.modified_at,
        }
    }
}
