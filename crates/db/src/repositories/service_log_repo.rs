//! Repository for the `service_logs` table.

use site_core::status::ServiceLogStatus;
use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::service_log::{CreateServiceLog, ServiceLog, ServiceLogTask};

const COLUMNS: &str = "id, resident_id, staff_id, type, status, latitude, longitude, \
                        created_at, updated_at";

pub struct ServiceLogRepo;

impl ServiceLogRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateServiceLog,
    ) -> Result<ServiceLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_logs (resident_id, type, latitude, longitude)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceLog>(&query)
            .bind(input.resident_id)
            .bind(input.kind.as_str())
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ServiceLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_logs WHERE id = $1");
        sqlx::query_as::<_, ServiceLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Pending logs with the resident's name and address, oldest first.
    pub async fn list_pending_tasks(pool: &PgPool) -> Result<Vec<ServiceLogTask>, sqlx::Error> {
        sqlx::query_as::<_, ServiceLogTask>(
            "SELECT l.id, l.resident_id, l.staff_id, l.type, l.status, l.latitude, l.longitude,
                    l.created_at, l.updated_at,
                    p.full_name AS resident_name, p.block_no, p.apartment_no
             FROM service_logs l
             JOIN profiles p ON p.id = l.resident_id
             WHERE l.status = 'pending'
             ORDER BY l.created_at ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Mark a pending log completed by `staff_id`. `None` when the log is
    /// missing or already completed.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        staff_id: DbId,
    ) -> Result<Option<ServiceLog>, sqlx::Error> {
        let query = format!(
            "UPDATE service_logs SET status = $3, staff_id = $2
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceLog>(&query)
            .bind(id)
            .bind(staff_id)
            .bind(ServiceLogStatus::Completed.as_str())
            .bind(ServiceLogStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }
}
