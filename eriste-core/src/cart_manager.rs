//! The cart manager seam.
//!
//! The HTTP cart endpoints never touch storage directly; they delegate every
//! operation to a [`CartManager`], so the storage backing carts can change
//! without touching the API layer.  [`PgCartManager`] is the Postgres
//! implementation used in production.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::carts::{Cart, CartItem, CartLine, CartSnapshot};

/// Hard ceiling for one cart line; larger requests clamp down to it.
pub const MAX_LINE_QUANTITY: i32 = 99;

/// Errors produced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart with that id.
    #[error("cart not found")]
    CartNotFound,

    /// The product does not exist or is not published.
    #[error("product {0} is not available")]
    ProductUnavailable(i64),

    /// The product has less stock than the requested quantity.
    #[error("insufficient stock: {available} available")]
    InsufficientStock { available: i32 },

    /// Negative quantity.
    #[error("quantity out of range")]
    QuantityOutOfRange,

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage-agnostic interface for the cart endpoints.
#[async_trait]
pub trait CartManager: Send + Sync {
    /// Create an empty cart and return its snapshot.
    async fn create(&self) -> Result<CartSnapshot, CartError>;

    /// Fetch a cart with its lines and total.
    async fn fetch(&self, cart_id: Uuid) -> Result<CartSnapshot, CartError>;

    /// Set one line's quantity.  Zero removes the line; values above
    /// [`MAX_LINE_QUANTITY`] clamp down to it.
    async fn set_item(
        &self,
        cart_id: Uuid,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartSnapshot, CartError>;

    /// Remove one line.
    async fn remove_item(
        &self,
        cart_id: Uuid,
        product_id: i64,
    ) -> Result<CartSnapshot, CartError>;

    /// Remove every line, keeping the cart usable.
    async fn clear(&self, cart_id: Uuid) -> Result<CartSnapshot, CartError>;
}

/// Postgres-backed [`CartManager`].
pub struct PgCartManager {
    pool: PgPool,
}

impl PgCartManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn snapshot(&self, cart: Cart) -> Result<CartSnapshot, CartError> {
        let lines = CartLine::for_cart(&self.pool, cart.id).await?;
        let total: Decimal = lines.iter().map(CartLine::line_total).sum();
        Ok(CartSnapshot {
            cart_id: cart.id,
            lines,
            total,
            updated_at: cart.updated_at,
        })
    }

    async fn require_cart(&self, cart_id: Uuid) -> Result<Cart, CartError> {
        Cart::get(&self.pool, cart_id)
            .await?
            .ok_or(CartError::CartNotFound)
    }

    /// Fetch the columns `set_item` validates against.
    async fn product_gate(&self, product_id: i64) -> Result<(bool, i32), CartError> {
        sqlx::query_as::<_, (bool, i32)>("SELECT published, stock FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(CartError::ProductUnavailable(product_id))
    }
}

#[async_trait]
impl CartManager for PgCartManager {
    async fn create(&self) -> Result<CartSnapshot, CartError> {
        let cart = Cart::insert(&self.pool).await?;
        self.snapshot(cart).await
    }

    async fn fetch(&self, cart_id: Uuid) -> Result<CartSnapshot, CartError> {
        let cart = self.require_cart(cart_id).await?;
        self.snapshot(cart).await
    }

    async fn set_item(
        &self,
        cart_id: Uuid,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartSnapshot, CartError> {
        if quantity < 0 {
            return Err(CartError::QuantityOutOfRange);
        }
        self.require_cart(cart_id).await?;

        if quantity == 0 {
            CartItem::remove(&self.pool, cart_id, product_id).await?;
        } else {
            let quantity = quantity.min(MAX_LINE_QUANTITY);
            let (published, stock) = self.product_gate(product_id).await?;
            if !published {
                return Err(CartError::ProductUnavailable(product_id));
            }
            if stock < quantity {
                return Err(CartError::InsufficientStock { available: stock });
            }
            CartItem::upsert(&self.pool, cart_id, product_id, quantity).await?;
        }

        let cart = Cart::touch(&self.pool, cart_id)
            .await?
            .ok_or(CartError::CartNotFound)?;
        self.snapshot(cart).await
    }

    async fn remove_item(
        &self,
        cart_id: Uuid,
        product_id: i64,
    ) -> Result<CartSnapshot, CartError> {
        self.require_cart(cart_id).await?;
        CartItem::remove(&self.pool, cart_id, product_id).await?;
        let cart = Cart::touch(&self.pool, cart_id)
            .await?
            .ok_or(CartError::CartNotFound)?;
        self.snapshot(cart).await
    }

    async fn clear(&self, cart_id: Uuid) -> Result<CartSnapshot, CartError> {
        self.require_cart(cart_id).await?;
        CartItem::clear(&self.pool, cart_id).await?;
        let cart = Cart::touch(&self.pool, cart_id)
            .await?
            .ok_or(CartError::CartNotFound)?;
        self.snapshot(cart).await
    }
}
