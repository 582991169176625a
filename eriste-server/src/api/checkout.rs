//! Checkout: turn a cart into a pending order.
//!
//! The whole conversion runs in one transaction: the cart row is locked,
//! every line is re-validated against the live catalog (prices are always
//! recomputed, the cart stores only quantities), stock is decremented, and
//! the cart is consumed. The customer walks away with a ten-digit order
//! reference to quote to the payment gateway.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use eriste_api::objects::orders::CheckoutRequest;
use eriste_core::entities::carts::{Cart, CheckoutLine};
use eriste_core::entities::orders::{GetOrderItems, NewOrder, NewOrderItem, Order, OrderItem};
use eriste_core::entities::products::Product;
use eriste_core::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rand::Rng;
use rust_decimal::Decimal;

use crate::api::orders::order_to_response;
use crate::state::AppState;

/// Length of the public order reference quoted to the gateway as `orderid`.
const ORDER_REF_LEN: usize = 10;

/// `POST /api/checkout` — place an order from a cart.
///
/// Returns 201 with the created order. The cart is consumed on success.
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    validate_customer(&request).map_err(CheckoutApiError::InvalidCustomer)?;

    let currency = { state.config.store().await.currency.clone() };
    let order_ref = new_order_ref();

    let mut tx = state.db.begin().await.map_err(CheckoutApiError::Database)?;

    let cart = Cart::get_for_update_tx(&mut tx, request.cart_id)
        .await
        .map_err(CheckoutApiError::Database)?
        .ok_or(CheckoutApiError::CartNotFound)?;

    let lines = CheckoutLine::for_cart_tx(&mut tx, cart.id)
        .await
        .map_err(CheckoutApiError::Database)?;
    if lines.is_empty() {
        return Err(CheckoutApiError::EmptyCart);
    }

    for line in &lines {
        if !line.published {
            return Err(CheckoutApiError::ProductUnavailable(line.product_id));
        }
        if line.stock < line.quantity {
            return Err(CheckoutApiError::InsufficientStock {
                product_id: line.product_id,
                available: line.stock,
            });
        }
    }

    let amount: Decimal = lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum();

    let order = Order::insert_tx(
        &mut tx,
        NewOrder {
            order_ref,
            amount,
            currency,
            customer_name: request.customer_name.trim().to_string(),
            customer_email: request.customer_email.trim().to_string(),
            customer_phone: request
                .customer_phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            shipping_address: request.shipping_address.trim().to_string(),
        },
    )
    .await
    .map_err(CheckoutApiError::Database)?;

    let items: Vec<NewOrderItem> = lines
        .iter()
        .map(|line| NewOrderItem {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        })
        .collect();
    OrderItem::insert_many_tx(&mut tx, order.id, &items)
        .await
        .map_err(CheckoutApiError::Database)?;

    for line in &lines {
        let decremented = Product::decrement_stock_tx(&mut tx, line.product_id, line.quantity)
            .await
            .map_err(CheckoutApiError::Database)?;
        if !decremented {
            return Err(CheckoutApiError::InsufficientStock {
                product_id: line.product_id,
                available: line.stock,
            });
        }
    }

    Cart::delete_tx(&mut tx, cart.id)
        .await
        .map_err(CheckoutApiError::Database)?;

    tx.commit().await.map_err(CheckoutApiError::Database)?;

    tracing::info!(
        order_ref = %order.order_ref,
        amount = %order.amount,
        lines = items.len(),
        "Order placed"
    );

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };
    let order_items = processor
        .process(GetOrderItems { order_id: order.id })
        .await
        .map_err(CheckoutApiError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(order_to_response(&order, &order_items)),
    ))
}

/// Generate a fresh order reference: ten random decimal digits.
///
/// Uniqueness is enforced by the database; a collision fails the insert.
fn new_order_ref() -> String {
    let mut rng = rand::rng();
    (0..ORDER_REF_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10)))
        .collect()
}

fn validate_customer(request: &CheckoutRequest) -> Result<(), &'static str> {
    if request.customer_name.trim().is_empty() {
        return Err("customer name must not be empty");
    }
    let email = request.customer_email.trim();
    if email.is_empty() {
        return Err("customer email must not be empty");
    }
    if !email.contains('@') {
        return Err("customer email is not valid");
    }
    if request.shipping_address.trim().is_empty() {
        return Err("shipping address must not be empty");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur while placing an order.
#[derive(Debug)]
pub enum CheckoutApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// No cart with that id.
    CartNotFound,
    /// The cart has no lines.
    EmptyCart,
    /// A cart line references an unpublished or deleted product.
    ProductUnavailable(i64),
    /// A cart line wants more units than are in stock.
    InsufficientStock { product_id: i64, available: i32 },
    /// A customer field failed validation.
    InvalidCustomer(&'static str),
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CheckoutApiError::Database(e) => {
                tracing::error!(error = %e, "Checkout database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            CheckoutApiError::CartNotFound => {
                (StatusCode::NOT_FOUND, "cart not found").into_response()
            }
            CheckoutApiError::EmptyCart => (StatusCode::CONFLICT, "cart is empty").into_response(),
            CheckoutApiError::ProductUnavailable(product_id) => (
                StatusCode::CONFLICT,
                format!("product {product_id} is no longer available"),
            )
                .into_response(),
            CheckoutApiError::InsufficientStock {
                product_id,
                available,
            } => (
                StatusCode::CONFLICT,
                format!("product {product_id} has only {available} left in stock"),
            )
                .into_response(),
            CheckoutApiError::InvalidCustomer(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn order_refs_are_ten_decimal_digits() {
        for _ in 0..50 {
            let order_ref = new_order_ref();
            assert_eq!(order_ref.len(), 10);
            assert!(order_ref.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn order_refs_vary() {
        let refs: std::collections::HashSet<String> = (0..20).map(|_| new_order_ref()).collect();
        assert!(refs.len() > 1);
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            cart_id: Uuid::nil(),
            customer_name: "Ayşe Yılmaz".to_string(),
            customer_email: "ayse@example.com".to_string(),
            customer_phone: None,
            shipping_address: "Çankaya, Ankara".to_string(),
        }
    }

    #[test]
    fn complete_customer_passes_validation() {
        assert!(validate_customer(&request()).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut req = request();
        req.customer_name = "   ".to_string();
        assert!(validate_customer(&req).is_err());
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut req = request();
        req.customer_email = "ayse.example.com".to_string();
        assert!(validate_customer(&req).is_err());
    }

    #[test]
    fn blank_address_is_rejected() {
        let mut req = request();
        req.shipping_address = String::new();
        assert!(validate_customer(&req).is_err());
    }
}
