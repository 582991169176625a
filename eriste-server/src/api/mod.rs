//! HTTP API handlers.
//!
//! The storefront API is split by audience:
//!
//! - `catalog`, `cart`, `checkout`, `orders`, `sellers` — public endpoints
//!   called by the storefront frontend.
//! - `payment` — the payment gateway's server-to-server callback.
//! - `admin` — the admin panel API, authenticated via the
//!   `Eriste-Admin-Authorization` header.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod extractors;
pub mod orders;
pub mod payment;
pub mod sellers;
