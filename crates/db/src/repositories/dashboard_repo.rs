//! Aggregate counts for the admin dashboard. Guest counts live on
//! [`GuestRepo::count_for_date`](super::GuestRepo::count_for_date).

use sqlx::PgPool;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Active accounts.
    pub async fn total_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles WHERE is_active")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Tickets not yet resolved.
    pub async fn pending_requests(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM service_requests WHERE status <> 'resolved'")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
