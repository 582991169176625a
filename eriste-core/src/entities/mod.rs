pub mod carts;
pub mod categories;
pub mod orders;
pub mod products;
pub mod seller_applications;

use eriste_api::objects::orders::OrderStatus as ApiOrderStatus;
use eriste_api::objects::sellers::SellerApplicationStatus as ApiSellerApplicationStatus;

/// Order status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see
/// `eriste_api::objects::orders::OrderStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "order_status")]
pub enum OrderStatus {
    Pending,
    Paid,
    Expired,
    Cancelled,
}

impl From<OrderStatus> for ApiOrderStatus {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Pending => ApiOrderStatus::Pending,
            OrderStatus::Paid => ApiOrderStatus::Paid,
            OrderStatus::Expired => ApiOrderStatus::Expired,
            OrderStatus::Cancelled => ApiOrderStatus::Cancelled,
        }
    }
}

impl From<ApiOrderStatus> for OrderStatus {
    fn from(value: ApiOrderStatus) -> Self {
        match value {
            ApiOrderStatus::Pending => OrderStatus::Pending,
            ApiOrderStatus::Paid => OrderStatus::Paid,
            ApiOrderStatus::Expired => OrderStatus::Expired,
            ApiOrderStatus::Cancelled => OrderStatus::Cancelled,
        }
    }
}

/// Seller application status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see
/// `eriste_api::objects::sellers::SellerApplicationStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "seller_application_status")]
pub enum SellerApplicationStatus {
    Received,
    Approved,
    Rejected,
}

impl From<SellerApplicationStatus> for ApiSellerApplicationStatus {
    fn from(value: SellerApplicationStatus) -> Self {
        match value {
            SellerApplicationStatus::Received => ApiSellerApplicationStatus::Received,
            SellerApplicationStatus::Approved => ApiSellerApplicationStatus::Approved,
            SellerApplicationStatus::Rejected => ApiSellerApplicationStatus::Rejected,
        }
    }
}

impl From<ApiSellerApplicationStatus> for SellerApplicationStatus {
    fn from(value: ApiSellerApplicationStatus) -> Self {
        match value {
            ApiSellerApplicationStatus::Received => SellerApplicationStatus::Received,
            ApiSellerApplicationStatus::Approved => SellerApplicationStatus::Approved,
            ApiSellerApplicationStatus::Rejected => SellerApplicationStatus::Rejected,
        }
    }
}
