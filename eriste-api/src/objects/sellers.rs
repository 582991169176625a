//! Seller onboarding wire types.

use serde::{Deserialize, Serialize};

/// Review state of a seller application on the wire.
///
/// The sqlx-aware twin lives in `eriste-core::entities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerApplicationStatus {
    Received,
    Approved,
    Rejected,
}

impl std::fmt::Display for SellerApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SellerApplicationStatus::Received => write!(f, "received"),
            SellerApplicationStatus::Approved => write!(f, "approved"),
            SellerApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Body of `POST /api/sellers/apply`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerApplicationRequest {
    pub shop_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub message: Option<String>,
}

/// A seller application as the admin panel lists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerApplicationResponse {
    pub id: i64,
    pub shop_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub message: Option<String>,
    pub status: SellerApplicationStatus,
    pub created_at: i64,
    pub reviewed_at: Option<i64>,
}
