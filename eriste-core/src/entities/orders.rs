use compact_str::CompactString;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::entities::OrderStatus;
use crate::framework::DatabaseProcessor;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_ref: String,
    pub status: OrderStatus,
    pub amount: Decimal,
    pub currency: CompactString,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub created_at: time::PrimitiveDateTime,
    pub paid_at: Option<time::PrimitiveDateTime>,
}

/// One order line, snapshotted from the product at checkout time.
///
/// `product_id` goes NULL when the product is later deleted; the snapshot
/// keeps the name and price the customer bought at.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: Uuid,
    pub product_id: Option<i64>,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

const ORDER_COLUMNS: &str = "id, order_ref, status, amount, currency, customer_name, \
     customer_email, customer_phone, shipping_address, created_at, paid_at";

/// Look an order up by its public reference (the gateway's `orderid`).
#[derive(Debug, Clone)]
pub struct GetOrderByRef {
    pub order_ref: String,
}

impl Processor<GetOrderByRef> for DatabaseProcessor {
    type Output = Option<Order>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrderByRef")]
    async fn process(&self, query: GetOrderByRef) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE order_ref = $1
            "#
        ))
        .bind(query.order_ref)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Look an order up by its internal id (admin paths).
#[derive(Debug, Clone, Copy)]
pub struct GetOrderById {
    pub order_id: Uuid,
}

impl Processor<GetOrderById> for DatabaseProcessor {
    type Output = Option<Order>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrderById")]
    async fn process(&self, query: GetOrderById) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE id = $1
            "#
        ))
        .bind(query.order_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Fetch the line items of an order.
#[derive(Debug, Clone, Copy)]
pub struct GetOrderItems {
    pub order_id: Uuid,
}

impl Processor<GetOrderItems> for DatabaseProcessor {
    type Output = Vec<OrderItem>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrderItems")]
    async fn process(&self, query: GetOrderItems) -> Result<Vec<OrderItem>, sqlx::Error> {
        sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, name, unit_price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(query.order_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// List orders with pagination and optional filters, newest first.
#[derive(Debug, Clone)]
pub struct ListOrders {
    pub limit: i64,
    pub offset: i64,
    pub status: Option<OrderStatus>,
    pub order_ref: Option<String>,
}

impl Processor<ListOrders> for DatabaseProcessor {
    type Output = Vec<Order>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListOrders")]
    async fn process(&self, query: ListOrders) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE ($3::order_status IS NULL OR status = $3)
              AND ($4::text IS NULL OR order_ref = $4)
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(query.limit)
        .bind(query.offset)
        .bind(query.status)
        .bind(query.order_ref)
        .fetch_all(&self.pool)
        .await
    }
}

/// Flip an order to `paid` and stamp `paid_at`.
///
/// Matches nothing when the order is already paid, so redelivered
/// callbacks and repeated admin clicks cannot double-settle.
#[derive(Debug, Clone, Copy)]
pub struct MarkOrderPaid {
    pub order_id: Uuid,
}

impl Processor<MarkOrderPaid> for DatabaseProcessor {
    type Output = Option<Order>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:MarkOrderPaid")]
    async fn process(&self, query: MarkOrderPaid) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = 'paid', paid_at = (now() AT TIME ZONE 'utc')
            WHERE id = $1 AND status <> 'paid'
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(query.order_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Expire every pending order created before the cutoff.
#[derive(Debug, Clone, Copy)]
pub struct ExpireStaleOrders {
    pub cutoff: time::PrimitiveDateTime,
}

impl Processor<ExpireStaleOrders> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ExpireStaleOrders")]
    async fn process(&self, query: ExpireStaleOrders) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'expired'
            WHERE status = 'pending' AND created_at < $1
            "#,
        )
        .bind(query.cutoff)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// Transactional inserts (checkout)
// ---------------------------------------------------------------------------

/// Column values for a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_ref: String,
    pub amount: Decimal,
    pub currency: CompactString,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
}

/// Column values for a new order line.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl Order {
    /// Insert a pending order within a transaction.
    pub async fn insert_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order: NewOrder,
    ) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders
                (order_ref, status, amount, currency, customer_name,
                 customer_email, customer_phone, shipping_address)
            VALUES ($1, 'pending', $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.order_ref)
        .bind(order.amount)
        .bind(order.currency)
        .bind(order.customer_name)
        .bind(order.customer_email)
        .bind(order.customer_phone)
        .bind(order.shipping_address)
        .fetch_one(&mut **tx)
        .await
    }
}

impl OrderItem {
    /// Insert the line items of an order within a transaction.
    pub async fn insert_many_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order_id: Uuid,
        items: &[NewOrderItem],
    ) -> Result<(), sqlx::Error> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, name, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(&item.name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
