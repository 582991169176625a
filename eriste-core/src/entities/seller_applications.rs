use kanau::processor::Processor;

use crate::entities::SellerApplicationStatus;
use crate::framework::DatabaseProcessor;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SellerApplication {
    pub id: i64,
    pub shop_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub message: Option<String>,
    pub status: SellerApplicationStatus,
    pub created_at: time::PrimitiveDateTime,
    pub reviewed_at: Option<time::PrimitiveDateTime>,
}

const APPLICATION_COLUMNS: &str = "id, shop_name, contact_name, email, phone, website, \
     message, status, created_at, reviewed_at";

/// Insert a new application in the `received` state.
#[derive(Debug, Clone)]
pub struct CreateSellerApplication {
    pub shop_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub message: Option<String>,
}

impl Processor<CreateSellerApplication> for DatabaseProcessor {
    type Output = SellerApplication;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CreateSellerApplication")]
    async fn process(
        &self,
        query: CreateSellerApplication,
    ) -> Result<SellerApplication, sqlx::Error> {
        sqlx::query_as::<_, SellerApplication>(&format!(
            r#"
            INSERT INTO seller_applications
                (shop_name, contact_name, email, phone, website, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(query.shop_name)
        .bind(query.contact_name)
        .bind(query.email)
        .bind(query.phone)
        .bind(query.website)
        .bind(query.message)
        .fetch_one(&self.pool)
        .await
    }
}

/// Does this email already have an application awaiting review?
#[derive(Debug, Clone)]
pub struct HasPendingApplication {
    pub email: String,
}

impl Processor<HasPendingApplication> for DatabaseProcessor {
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:HasPendingApplication")]
    async fn process(&self, query: HasPendingApplication) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM seller_applications
                WHERE lower(email) = lower($1) AND status = 'received'
            )
            "#,
        )
        .bind(query.email)
        .fetch_one(&self.pool)
        .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetSellerApplicationById {
    pub id: i64,
}

impl Processor<GetSellerApplicationById> for DatabaseProcessor {
    type Output = Option<SellerApplication>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetSellerApplicationById")]
    async fn process(
        &self,
        query: GetSellerApplicationById,
    ) -> Result<Option<SellerApplication>, sqlx::Error> {
        sqlx::query_as::<_, SellerApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM seller_applications
            WHERE id = $1
            "#
        ))
        .bind(query.id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// List applications with pagination and an optional status filter,
/// oldest unreviewed first.
#[derive(Debug, Clone)]
pub struct ListSellerApplications {
    pub limit: i64,
    pub offset: i64,
    pub status: Option<SellerApplicationStatus>,
}

impl Processor<ListSellerApplications> for DatabaseProcessor {
    type Output = Vec<SellerApplication>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListSellerApplications")]
    async fn process(
        &self,
        query: ListSellerApplications,
    ) -> Result<Vec<SellerApplication>, sqlx::Error> {
        sqlx::query_as::<_, SellerApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM seller_applications
            WHERE ($3::seller_application_status IS NULL OR status = $3)
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(query.limit)
        .bind(query.offset)
        .bind(query.status)
        .fetch_all(&self.pool)
        .await
    }
}

/// Settle a `received` application, stamping `reviewed_at`.
///
/// Matches nothing when the application was already reviewed.
#[derive(Debug, Clone, Copy)]
pub struct ReviewSellerApplication {
    pub id: i64,
    pub status: SellerApplicationStatus,
}

impl Processor<ReviewSellerApplication> for DatabaseProcessor {
    type Output = Option<SellerApplication>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ReviewSellerApplication")]
    async fn process(
        &self,
        query: ReviewSellerApplication,
    ) -> Result<Option<SellerApplication>, sqlx::Error> {
        sqlx::query_as::<_, SellerApplication>(&format!(
            r#"
            UPDATE seller_applications
            SET status = $2, reviewed_at = (now() AT TIME ZONE 'utc')
            WHERE id = $1 AND status = 'received'
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(query.id)
        .bind(query.status)
        .fetch_optional(&self.pool)
        .await
    }
}
