use compact_str::CompactString;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Cart {
    pub id: Uuid,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

/// One cart line joined with its product, as the cart endpoints render it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CartLine {
    pub product_id: i64,
    pub slug: CompactString,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A cart with its lines and running total.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub cart_id: Uuid,
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub updated_at: time::PrimitiveDateTime,
}

/// One cart line joined with the product columns checkout validates.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CheckoutLine {
    pub product_id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub stock: i32,
    pub published: bool,
}

impl Cart {
    /// Insert an empty cart.
    pub async fn insert(pool: &PgPool) -> Result<Cart, sqlx::Error> {
        sqlx::query_as::<_, Cart>(
            r#"
            INSERT INTO carts DEFAULT VALUES
            RETURNING id, created_at, updated_at
            "#,
        )
        .fetch_one(pool)
        .await
    }

    pub async fn get(pool: &PgPool, cart_id: Uuid) -> Result<Option<Cart>, sqlx::Error> {
        sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, created_at, updated_at
            FROM carts
            WHERE id = $1
            "#,
        )
        .bind(cart_id)
        .fetch_optional(pool)
        .await
    }

    /// Bump `updated_at`, returning the new value.
    pub async fn touch(pool: &PgPool, cart_id: Uuid) -> Result<Option<Cart>, sqlx::Error> {
        sqlx::query_as::<_, Cart>(
            r#"
            UPDATE carts
            SET updated_at = (now() AT TIME ZONE 'utc')
            WHERE id = $1
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(cart_id)
        .fetch_optional(pool)
        .await
    }

    /// Lock the cart row for the duration of a checkout transaction.
    pub async fn get_for_update_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        cart_id: Uuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, created_at, updated_at
            FROM carts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(cart_id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Delete a consumed cart (lines cascade) within a transaction.
    pub async fn delete_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        cart_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(cart_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

impl CartLine {
    /// Fetch the lines of a cart, joined with their products.
    pub async fn for_cart(pool: &PgPool, cart_id: Uuid) -> Result<Vec<CartLine>, sqlx::Error> {
        sqlx::query_as::<_, CartLine>(
            r#"
            SELECT ci.product_id, p.slug, p.name, p.price AS unit_price, ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY p.name, p.id
            "#,
        )
        .bind(cart_id)
        .fetch_all(pool)
        .await
    }
}

impl CheckoutLine {
    /// Fetch cart lines with the product columns checkout validates,
    /// locking the product rows against concurrent checkouts.
    pub async fn for_cart_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        cart_id: Uuid,
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        sqlx::query_as::<_, CheckoutLine>(
            r#"
            SELECT ci.product_id, p.name, p.price AS unit_price, ci.quantity,
                   p.stock, p.published
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY p.name, p.id
            FOR UPDATE OF p
            "#,
        )
        .bind(cart_id)
        .fetch_all(&mut **tx)
        .await
    }
}

// ---------------------------------------------------------------------------
// Cart item writes
// ---------------------------------------------------------------------------

pub struct CartItem;

impl CartItem {
    /// Insert or overwrite one line's quantity.
    pub async fn upsert(
        pool: &PgPool,
        cart_id: Uuid,
        product_id: i64,
        quantity: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove one line.  Removing an absent line is not an error.
    pub async fn remove(pool: &PgPool, cart_id: Uuid, product_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove every line, keeping the cart itself.
    pub async fn clear(pool: &PgPool, cart_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
