use sqlx::PgPool;

/// Carrier for database-backed [`kanau::processor::Processor`] impls.
///
/// Query messages live next to their entity; each one is implemented as
/// `Processor<Message> for DatabaseProcessor`.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
