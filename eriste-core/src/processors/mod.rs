//! Background processors.
//!
//! - `OrderExpiryWatcher`: periodically expires pending orders that were
//!   never paid, so abandoned checkouts release their order references.

pub mod order_expiry;

pub use order_expiry::OrderExpiryWatcher;
