use compact_str::CompactString;
use kanau::processor::Processor;

use crate::framework::DatabaseProcessor;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub price: rust_decimal::Decimal,
    pub stock: i32,
    pub published: bool,
    pub created_at: time::PrimitiveDateTime,
}

const PRODUCT_COLUMNS: &str =
    "id, category_id, slug, name, description, price, stock, published, created_at";

/// List published products, newest first, optionally scoped to a category.
#[derive(Debug, Clone, Copy)]
pub struct ListPublishedProducts {
    pub category_id: Option<i64>,
    pub limit: i64,
    pub offset: i64,
}

impl Processor<ListPublishedProducts> for DatabaseProcessor {
    type Output = Vec<Product>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListPublishedProducts")]
    async fn process(&self, query: ListPublishedProducts) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE published AND ($1::bigint IS NULL OR category_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(query.category_id)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
    }
}

/// Look a published product up by its URL slug.
#[derive(Debug, Clone)]
pub struct GetPublishedProductBySlug {
    pub slug: String,
}

impl Processor<GetPublishedProductBySlug> for DatabaseProcessor {
    type Output = Option<Product>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetPublishedProductBySlug")]
    async fn process(
        &self,
        query: GetPublishedProductBySlug,
    ) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE published AND slug = $1
            "#
        ))
        .bind(query.slug)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Look a product up by id regardless of publication state (admin paths).
#[derive(Debug, Clone, Copy)]
pub struct GetProductById {
    pub id: i64,
}

impl Processor<GetProductById> for DatabaseProcessor {
    type Output = Option<Product>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetProductById")]
    async fn process(&self, query: GetProductById) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = $1
            "#
        ))
        .bind(query.id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Insert a new product.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub category_id: i64,
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub price: rust_decimal::Decimal,
    pub stock: i32,
    pub published: bool,
}

impl Processor<CreateProduct> for DatabaseProcessor {
    type Output = Product;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CreateProduct")]
    async fn process(&self, query: CreateProduct) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (category_id, slug, name, description, price, stock, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(query.category_id)
        .bind(query.slug)
        .bind(query.name)
        .bind(query.description)
        .bind(query.price)
        .bind(query.stock)
        .bind(query.published)
        .fetch_one(&self.pool)
        .await
    }
}

/// Overwrite a product with fully merged field values.
///
/// Partial-update merging happens in the handler; this message always
/// carries every column.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub id: i64,
    pub category_id: i64,
    pub slug: CompactString,
    pub name: String,
    pub description: Option<String>,
    pub price: rust_decimal::Decimal,
    pub stock: i32,
    pub published: bool,
}

impl Processor<UpdateProduct> for DatabaseProcessor {
    type Output = Option<Product>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateProduct")]
    async fn process(&self, query: UpdateProduct) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET category_id = $2,
                slug = $3,
                name = $4,
                description = $5,
                price = $6,
                stock = $7,
                published = $8
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(query.id)
        .bind(query.category_id)
        .bind(query.slug)
        .bind(query.name)
        .bind(query.description)
        .bind(query.price)
        .bind(query.stock)
        .bind(query.published)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Delete a product.
#[derive(Debug, Clone, Copy)]
pub struct DeleteProduct {
    pub id: i64,
}

impl Processor<DeleteProduct> for DatabaseProcessor {
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteProduct")]
    async fn process(&self, query: DeleteProduct) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(query.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl Product {
    /// Decrement stock within a transaction, refusing to go negative.
    ///
    /// Returns `false` when the product has less stock than requested (no
    /// row is touched), which aborts the surrounding checkout.
    pub async fn decrement_stock_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: i64,
        quantity: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2
            WHERE id = $1 AND stock >= $2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
