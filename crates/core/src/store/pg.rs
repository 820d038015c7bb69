//! Postgres-backed store. One [`PgStore`] implements every aggregate
//! trait over a shared connection pool; queries are runtime-checked and
//! scoped to non-deleted rows unless a method says otherwise.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{CoreError, CoreResult};
use crate::model::{
    Blog, BlogFaq, Category, Client, Enquiry, Service, Subcategory, UserRef,
};
use crate::store::{
    BlogStore, CategoryStore, ClientStore, EnquiryStore, ServiceStore, SubcategoryStore,
    UserDirectory,
};

const CATEGORY_COLS: &str = "id, public_id, name, slug, icon, meta_title, meta_keyword, \
     meta_description, search_keywords, display_status, delete_status, created_at, \
     modified_at, created_by, modified_by";

const SUBCATEGORY_COLS: &str = "id, public_id, category_id, name, slug, display_status, \
     delete_status, created_at, modified_at, created_by, modified_by";

const SERVICE_COLS: &str = "id, public_id, title, slug, short_description, full_description, \
     banner_image, thumbnail, video_url, meta_title, meta_keyword, meta_description, \
     display_status, home_status, delete_status, visited, category_id, subcategory_id, \
     created_at, modified_at, created_by, modified_by";

const BLOG_COLS: &str = "id, public_id, title, slug, image, summary, description, meta_title, \
     meta_keyword, meta_description, search_keyword, display_status, home_status, \
     delete_status, visited, category_id, subcategory_id, author_name, created_at, \
     modified_at, created_by, modified_by";

const FAQ_COLS: &str = "id, public_id, blog_id, title, description, display_status, \
     delete_status, created_at, modified_at, created_by, modified_by";

const CLIENT_COLS: &str = "id, public_id, name, slug, logo, website_url, description, \
     display_status, delete_status, created_at, modified_at, created_by, modified_by";

const ENQUIRY_COLS: &str = "id, public_id, name, email, mobile, city, kind, message, \
     category_id, service_id, ip_address, url, utm_source, utm_medium, utm_campaign, \
     utm_term, utm_content, count, display_status, delete_status, created_at";

fn like_pattern(keyword: &str) -> String {
    format!("%{}%", keyword)
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn blog_service_ids(&self, blog_id: i64) -> CoreResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT service_id FROM blog_services WHERE blog_id = $1 ORDER BY service_id",
        )
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn hydrate_blog(&self, blog: Option<Blog>) -> CoreResult<Option<Blog>> {
        match blog {
            Some(mut blog) => {
                blog.service_ids = self.blog_service_ids(blog.id).await?;
                Ok(Some(blog))
            }
            None => Ok(None),
        }
    }

    async fn hydrate_blogs(&self, mut blogs: Vec<Blog>) -> CoreResult<Vec<Blog>> {
        if blogs.is_empty() {
            return Ok(blogs);
        }
        let blog_ids: Vec<i64> = blogs.iter().map(|b| b.id).collect();
        let pairs = sqlx::query_as::<_, (i64, i64)>(
            "SELECT blog_id, service_id FROM blog_services \
             WHERE blog_id = ANY($1) ORDER BY service_id",
        )
        .bind(&blog_ids)
        .fetch_all(&self.pool)
        .await?;
        for blog in &mut blogs {
            blog.service_ids = pairs
                .iter()
                .filter(|(bid, _)| *bid == blog.id)
                .map(|(_, sid)| *sid)
                .collect();
        }
        Ok(blogs)
    }

    // Runs on the caller's transaction so the blog row and its
    // associations commit or roll back together.
    async fn replace_blog_services(
        conn: &mut sqlx::PgConnection,
        blog_id: i64,
        service_ids: &[i64],
    ) -> CoreResult<()> {
        sqlx::query("DELETE FROM blog_services WHERE blog_id = $1")
            .bind(blog_id)
            .execute(&mut *conn)
            .await?;
        for service_id in service_ids {
            sqlx::query("INSERT INTO blog_services (blog_id, service_id) VALUES ($1, $2)")
                .bind(blog_id)
                .bind(service_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_active_user(&self, id: i64) -> CoreResult<Option<UserRef>> {
        let user = sqlx::query_as::<_, UserRef>(
            "SELECT id, public_id, full_name FROM users \
             WHERE id = $1 AND delete_status = 2",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn find_active_category(&self, id: i64) -> CoreResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLS} FROM categories WHERE id = $1 AND delete_status = 2"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_categories(&self) -> CoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLS} FROM categories \
             WHERE delete_status = 2 ORDER BY LOWER(name)"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn search_active_categories(&self, keyword: &str) -> CoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLS} FROM categories \
             WHERE delete_status = 2 AND (name ILIKE $1 OR search_keywords ILIKE $1) \
             ORDER BY LOWER(name)"
        ))
        .bind(like_pattern(keyword))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn category_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories \
             WHERE LOWER(name) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn category_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories \
             WHERE LOWER(slug) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn category_has_children(&self, id: i64) -> CoreResult<bool> {
        let has = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subcategories WHERE category_id = $1 AND delete_status = 2) \
             OR EXISTS(SELECT 1 FROM services WHERE category_id = $1 AND delete_status = 2)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(has)
    }

    async fn insert_category(&self, record: Category) -> CoreResult<Category> {
        let saved = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (public_id, name, slug, icon, meta_title, meta_keyword, \
             meta_description, search_keywords, display_status, delete_status, created_at, \
             modified_at, created_by, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {CATEGORY_COLS}"
        ))
        .bind(&record.public_id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.icon)
        .bind(&record.meta_title)
        .bind(&record.meta_keyword)
        .bind(&record.meta_description)
        .bind(&record.search_keywords)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.created_at)
        .bind(record.modified_at)
        .bind(&record.created_by)
        .bind(&record.modified_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update_category(&self, record: &Category) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE categories SET name = $2, slug = $3, icon = $4, meta_title = $5, \
             meta_keyword = $6, meta_description = $7, search_keywords = $8, \
             display_status = $9, delete_status = $10, modified_at = $11, modified_by = $12 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.icon)
        .bind(&record.meta_title)
        .bind(&record.meta_keyword)
        .bind(&record.meta_description)
        .bind(&record.search_keywords)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.modified_at)
        .bind(&record.modified_by)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Category"));
        }
        Ok(())
    }
}

#[async_trait]
impl SubcategoryStore for PgStore {
    async fn find_active_subcategory(&self, id: i64) -> CoreResult<Option<Subcategory>> {
        let row = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {SUBCATEGORY_COLS} FROM subcategories WHERE id = $1 AND delete_status = 2"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_subcategories(&self, category_id: Option<i64>) -> CoreResult<Vec<Subcategory>> {
        let rows = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {SUBCATEGORY_COLS} FROM subcategories \
             WHERE delete_status = 2 AND ($1::bigint IS NULL OR category_id = $1) \
             ORDER BY LOWER(name)"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn subcategory_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subcategories \
             WHERE LOWER(name) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn subcategory_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subcategories \
             WHERE LOWER(slug) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_subcategory(&self, record: Subcategory) -> CoreResult<Subcategory> {
        let saved = sqlx::query_as::<_, Subcategory>(&format!(
            "INSERT INTO subcategories (public_id, category_id, name, slug, display_status, \
             delete_status, created_at, modified_at, created_by, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {SUBCATEGORY_COLS}"
        ))
        .bind(&record.public_id)
        .bind(record.category_id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.created_at)
        .bind(record.modified_at)
        .bind(&record.created_by)
        .bind(&record.modified_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update_subcategory(&self, record: &Subcategory) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE subcategories SET category_id = $2, name = $3, slug = $4, \
             display_status = $5, delete_status = $6, modified_at = $7, modified_by = $8 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(record.category_id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.modified_at)
        .bind(&record.modified_by)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Subcategory"));
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceStore for PgStore {
    async fn find_active_service(&self, id: i64) -> CoreResult<Option<Service>> {
        let row = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services WHERE id = $1 AND delete_status = 2"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_public_service_by_slug(&self, slug: &str) -> CoreResult<Option<Service>> {
        let row = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE LOWER(slug) = LOWER($1) AND delete_status = 2 AND display_status = 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_services(&self) -> CoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE delete_status = 2 ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_public_services(&self) -> CoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE delete_status = 2 AND display_status = 1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn latest_public_services(&self, limit: i64) -> CoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE delete_status = 2 AND display_status = 1 \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn public_services_by_category(&self, category_id: i64) -> CoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE delete_status = 2 AND display_status = 1 AND category_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn public_services_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE delete_status = 2 AND display_status = 1 AND subcategory_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(subcategory_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn featured_public_services(&self) -> CoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE delete_status = 2 AND display_status = 1 AND home_status = 1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn search_active_services(&self, keyword: &str) -> CoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE delete_status = 2 AND (title ILIKE $1 OR short_description ILIKE $1) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(like_pattern(keyword))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn load_active_services(&self, ids: &[i64]) -> CoreResult<Vec<Service>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLS} FROM services \
             WHERE id = ANY($1) AND delete_status = 2 ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn service_title_taken(&self, title: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM services \
             WHERE LOWER(title) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(title)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn service_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM services \
             WHERE LOWER(slug) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_service(&self, record: Service) -> CoreResult<Service> {
        let saved = sqlx::query_as::<_, Service>(&format!(
            "INSERT INTO services (public_id, title, slug, short_description, full_description, \
             banner_image, thumbnail, video_url, meta_title, meta_keyword, meta_description, \
             display_status, home_status, delete_status, visited, category_id, subcategory_id, \
             created_at, modified_at, created_by, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21) \
             RETURNING {SERVICE_COLS}"
        ))
        .bind(&record.public_id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(&record.short_description)
        .bind(&record.full_description)
        .bind(&record.banner_image)
        .bind(&record.thumbnail)
        .bind(&record.video_url)
        .bind(&record.meta_title)
        .bind(&record.meta_keyword)
        .bind(&record.meta_description)
        .bind(record.display_status)
        .bind(record.home_status)
        .bind(record.delete_status)
        .bind(record.visited)
        .bind(record.category_id)
        .bind(record.subcategory_id)
        .bind(record.created_at)
        .bind(record.modified_at)
        .bind(&record.created_by)
        .bind(&record.modified_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update_service(&self, record: &Service) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE services SET title = $2, slug = $3, short_description = $4, \
             full_description = $5, banner_image = $6, thumbnail = $7, video_url = $8, \
             meta_title = $9, meta_keyword = $10, meta_description = $11, display_status = $12, \
             home_status = $13, delete_status = $14, category_id = $15, subcategory_id = $16, \
             modified_at = $17, modified_by = $18 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(&record.short_description)
        .bind(&record.full_description)
        .bind(&record.banner_image)
        .bind(&record.thumbnail)
        .bind(&record.video_url)
        .bind(&record.meta_title)
        .bind(&record.meta_keyword)
        .bind(&record.meta_description)
        .bind(record.display_status)
        .bind(record.home_status)
        .bind(record.delete_status)
        .bind(record.category_id)
        .bind(record.subcategory_id)
        .bind(record.modified_at)
        .bind(&record.modified_by)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Service"));
        }
        Ok(())
    }

    async fn bump_service_visits(&self, id: i64) -> CoreResult<()> {
        sqlx::query("UPDATE services SET visited = visited + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn find_active_blog(&self, id: i64) -> CoreResult<Option<Blog>> {
        let row = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs WHERE id = $1 AND delete_status = 2"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        self.hydrate_blog(row).await
    }

    async fn find_public_blog_by_slug(&self, slug: &str) -> CoreResult<Option<Blog>> {
        let row = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE LOWER(slug) = LOWER($1) AND delete_status = 2 AND display_status = 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        self.hydrate_blog(row).await
    }

    async fn list_active_blogs(&self) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn list_public_blogs(&self) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 AND display_status = 1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn latest_public_blogs(&self, limit: i64) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 AND display_status = 1 \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn public_blogs_by_category(&self, category_id: i64) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 AND display_status = 1 AND category_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn public_blogs_by_subcategory(&self, subcategory_id: i64) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 AND display_status = 1 AND subcategory_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(subcategory_id)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn public_blogs_by_service(&self, service_id: i64) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 AND display_status = 1 AND id IN \
             (SELECT blog_id FROM blog_services WHERE service_id = $1) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn featured_public_blogs(&self) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 AND display_status = 1 AND home_status = 1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn search_active_blogs(&self, keyword: &str) -> CoreResult<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLS} FROM blogs \
             WHERE delete_status = 2 AND (title ILIKE $1 OR summary ILIKE $1 \
             OR description ILIKE $1 OR search_keyword ILIKE $1) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(like_pattern(keyword))
        .fetch_all(&self.pool)
        .await?;
        self.hydrate_blogs(rows).await
    }

    async fn blog_title_taken(&self, title: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM blogs \
             WHERE LOWER(title) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(title)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn blog_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM blogs \
             WHERE LOWER(slug) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_blog(&self, record: Blog) -> CoreResult<Blog> {
        let mut tx = self.pool.begin().await?;
        let mut saved = sqlx::query_as::<_, Blog>(&format!(
            "INSERT INTO blogs (public_id, title, slug, image, summary, description, \
             meta_title, meta_keyword, meta_description, search_keyword, display_status, \
             home_status, delete_status, visited, category_id, subcategory_id, author_name, \
             created_at, modified_at, created_by, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21) \
             RETURNING {BLOG_COLS}"
        ))
        .bind(&record.public_id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(&record.image)
        .bind(&record.summary)
        .bind(&record.description)
        .bind(&record.meta_title)
        .bind(&record.meta_keyword)
        .bind(&record.meta_description)
        .bind(&record.search_keyword)
        .bind(record.display_status)
        .bind(record.home_status)
        .bind(record.delete_status)
        .bind(record.visited)
        .bind(record.category_id)
        .bind(record.subcategory_id)
        .bind(&record.author_name)
        .bind(record.created_at)
        .bind(record.modified_at)
        .bind(&record.created_by)
        .bind(&record.modified_by)
        .fetch_one(&mut *tx)
        .await?;
        Self::replace_blog_services(&mut *tx, saved.id, &record.service_ids).await?;
        tx.commit().await?;
        saved.service_ids = record.service_ids;
        Ok(saved)
    }

    async fn update_blog(&self, record: &Blog) -> CoreResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE blogs SET title = $2, slug = $3, image = $4, summary = $5, \
             description = $6, meta_title = $7, meta_keyword = $8, meta_description = $9, \
             search_keyword = $10, display_status = $11, home_status = $12, \
             delete_status = $13, category_id = $14, subcategory_id = $15, \
             modified_at = $16, modified_by = $17 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(&record.image)
        .bind(&record.summary)
        .bind(&record.description)
        .bind(&record.meta_title)
        .bind(&record.meta_keyword)
        .bind(&record.meta_description)
        .bind(&record.search_keyword)
        .bind(record.display_status)
        .bind(record.home_status)
        .bind(record.delete_status)
        .bind(record.category_id)
        .bind(record.subcategory_id)
        .bind(record.modified_at)
        .bind(&record.modified_by)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Blog"));
        }
        Self::replace_blog_services(&mut *tx, record.id, &record.service_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn bump_blog_visits(&self, id: i64) -> CoreResult<()> {
        sqlx::query("UPDATE blogs SET visited = visited + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_active_faq(&self, blog_id: i64, faq_id: i64) -> CoreResult<Option<BlogFaq>> {
        let row = sqlx::query_as::<_, BlogFaq>(&format!(
            "SELECT {FAQ_COLS} FROM blog_faqs \
             WHERE id = $1 AND blog_id = $2 AND delete_status = 2"
        ))
        .bind(faq_id)
        .bind(blog_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_faqs(&self, blog_id: i64) -> CoreResult<Vec<BlogFaq>> {
        let rows = sqlx::query_as::<_, BlogFaq>(&format!(
            "SELECT {FAQ_COLS} FROM blog_faqs \
             WHERE blog_id = $1 AND delete_status = 2 ORDER BY id"
        ))
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_faq(&self, record: BlogFaq) -> CoreResult<BlogFaq> {
        let saved = sqlx::query_as::<_, BlogFaq>(&format!(
            "INSERT INTO blog_faqs (public_id, blog_id, title, description, display_status, \
             delete_status, created_at, modified_at, created_by, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {FAQ_COLS}"
        ))
        .bind(&record.public_id)
        .bind(record.blog_id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.created_at)
        .bind(record.modified_at)
        .bind(&record.created_by)
        .bind(&record.modified_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update_faq(&self, record: &BlogFaq) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE blog_faqs SET title = $2, description = $3, display_status = $4, \
             delete_status = $5, modified_at = $6, modified_by = $7 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.modified_at)
        .bind(&record.modified_by)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("FAQ"));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientStore for PgStore {
    async fn find_active_client(&self, id: i64) -> CoreResult<Option<Client>> {
        let row = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLS} FROM clients WHERE id = $1 AND delete_status = 2"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_clients(&self) -> CoreResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLS} FROM clients \
             WHERE delete_status = 2 ORDER BY LOWER(name)"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_public_clients(&self) -> CoreResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLS} FROM clients \
             WHERE delete_status = 2 AND display_status = 1 ORDER BY LOWER(name)"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn search_active_clients(&self, keyword: &str) -> CoreResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLS} FROM clients \
             WHERE delete_status = 2 AND (name ILIKE $1 OR website_url ILIKE $1) \
             ORDER BY LOWER(name)"
        ))
        .bind(like_pattern(keyword))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn client_name_taken(&self, name: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM clients \
             WHERE LOWER(name) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn client_slug_taken(&self, slug: &str, exclude: Option<i64>) -> CoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM clients \
             WHERE LOWER(slug) = LOWER($1) AND delete_status = 2 AND id <> COALESCE($2, 0))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_client(&self, record: Client) -> CoreResult<Client> {
        let saved = sqlx::query_as::<_, Client>(&format!(
            "INSERT INTO clients (public_id, name, slug, logo, website_url, description, \
             display_status, delete_status, created_at, modified_at, created_by, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {CLIENT_COLS}"
        ))
        .bind(&record.public_id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.logo)
        .bind(&record.website_url)
        .bind(&record.description)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.created_at)
        .bind(record.modified_at)
        .bind(&record.created_by)
        .bind(&record.modified_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update_client(&self, record: &Client) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE clients SET name = $2, slug = $3, logo = $4, website_url = $5, \
             description = $6, display_status = $7, delete_status = $8, \
             modified_at = $9, modified_by = $10 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.logo)
        .bind(&record.website_url)
        .bind(&record.description)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.modified_at)
        .bind(&record.modified_by)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Client"));
        }
        Ok(())
    }
}

#[async_trait]
impl EnquiryStore for PgStore {
    async fn find_active_enquiry(&self, id: i64) -> CoreResult<Option<Enquiry>> {
        let row = sqlx::query_as::<_, Enquiry>(&format!(
            "SELECT {ENQUIRY_COLS} FROM enquiries WHERE id = $1 AND delete_status = 2"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_active_enquiry_by_email(&self, email: &str) -> CoreResult<Option<Enquiry>> {
        let row = sqlx::query_as::<_, Enquiry>(&format!(
            "SELECT {ENQUIRY_COLS} FROM enquiries \
             WHERE LOWER(email) = LOWER($1) AND delete_status = 2 \
             ORDER BY id LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_active_enquiry_by_mobile(&self, mobile: &str) -> CoreResult<Option<Enquiry>> {
        let row = sqlx::query_as::<_, Enquiry>(&format!(
            "SELECT {ENQUIRY_COLS} FROM enquiries \
             WHERE mobile = $1 AND delete_status = 2 \
             ORDER BY id LIMIT 1"
        ))
        .bind(mobile)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_enquiries(&self) -> CoreResult<Vec<Enquiry>> {
        let rows = sqlx::query_as::<_, Enquiry>(&format!(
            "SELECT {ENQUIRY_COLS} FROM enquiries \
             WHERE delete_status = 2 ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_enquiry(&self, record: Enquiry) -> CoreResult<Enquiry> {
        let saved = sqlx::query_as::<_, Enquiry>(&format!(
            "INSERT INTO enquiries (public_id, name, email, mobile, city, kind, message, \
             category_id, service_id, ip_address, url, utm_source, utm_medium, utm_campaign, \
             utm_term, utm_content, count, display_status, delete_status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20) \
             RETURNING {ENQUIRY_COLS}"
        ))
        .bind(&record.public_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.mobile)
        .bind(&record.city)
        .bind(&record.kind)
        .bind(&record.message)
        .bind(record.category_id)
        .bind(record.service_id)
        .bind(&record.ip_address)
        .bind(&record.url)
        .bind(&record.utm_source)
        .bind(&record.utm_medium)
        .bind(&record.utm_campaign)
        .bind(&record.utm_term)
        .bind(&record.utm_content)
        .bind(record.count)
        .bind(record.display_status)
        .bind(record.delete_status)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update_enquiry(&self, record: &Enquiry) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE enquiries SET name = $2, email = $3, mobile = $4, city = $5, kind = $6, \
             message = $7, category_id = $8, service_id = $9, ip_address = $10, url = $11, \
             utm_source = $12, utm_medium = $13, utm_campaign = $14, utm_term = $15, \
             utm_content = $16, count = $17, display_status = $18, delete_status = $19 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.mobile)
        .bind(&record.city)
        .bind(&record.kind)
        .bind(&record.message)
        .bind(record.category_id)
        .bind(record.service_id)
        .bind(&record.ip_address)
        .bind(&record.url)
        .bind(&record.utm_source)
        .bind(&record.utm_medium)
        .bind(&record.utm_campaign)
        .bind(&record.utm_term)
        .bind(&record.utm_content)
        .bind(record.count)
        .bind(record.display_status)
        .bind(record.delete_status)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Enquiry"));
        }
        Ok(())
    }
}
