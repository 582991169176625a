use compact_str::CompactString;
use kanau::processor::Processor;

use crate::framework::DatabaseProcessor;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: time::PrimitiveDateTime,
}

/// List every category in menu order.
#[derive(Debug, Clone, Copy)]
pub struct ListCategories;

impl Processor<ListCategories> for DatabaseProcessor {
    type Output = Vec<Category>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListCategories")]
    async fn process(&self, _query: ListCategories) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, slug, name, description, position, created_at
            FROM categories
            ORDER BY position, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

/// Look a category up by its URL slug.
#[derive(Debug, Clone)]
pub struct GetCategoryBySlug {
    pub slug: String,
}

impl Processor<GetCategoryBySlug> for DatabaseProcessor {
    type Output = Option<Category>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetCategoryBySlug")]
    async fn process(&self, query: GetCategoryBySlug) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, slug, name, description, position, created_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(query.slug)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Look a category up by its numeric id (the listing fallback path).
#[derive(Debug, Clone, Copy)]
pub struct GetCategoryById {
    pub id: i64,
}

impl Processor<GetCategoryById> for DatabaseProcessor {
    type Output = Option<Category>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetCategoryById")]
    async fn process(&self, query: GetCategoryById) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, slug, name, description, position, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(query.id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Insert a new category.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
}

impl Processor<CreateCategory> for DatabaseProcessor {
    type Output = Category;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CreateCategory")]
    async fn process(&self, query: CreateCategory) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (slug, name, description, position)
            VALUES ($1, $2, $3, $4)
            RETURNING id, slug, name, description, position, created_at
            "#,
        )
        .bind(query.slug)
        .bind(query.name)
        .bind(query.description)
        .bind(query.position)
        .fetch_one(&self.pool)
        .await
    }
}
