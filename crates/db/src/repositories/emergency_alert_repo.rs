//! Repository for the `emergency_alerts` table.

use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::emergency_alert::EmergencyAlert;

const COLUMNS: &str = "id, type, message, active, created_at";

pub struct EmergencyAlertRepo;

impl EmergencyAlertRepo {
    /// Raise a new active alert.
    pub async fn create(
        pool: &PgPool,
        alert_type: &str,
        message: &str,
    ) -> Result<EmergencyAlert, sqlx::Error> {
        let query = format!(
            "INSERT INTO emergency_alerts (type, message) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyAlert>(&query)
            .bind(alert_type)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Active alerts, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<EmergencyAlert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emergency_alerts WHERE active = TRUE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, EmergencyAlert>(&query)
            .fetch_all(pool)
            .await
    }

    /// Clear an active alert. `None` if it is missing or already cleared.
    pub async fn deactivate(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EmergencyAlert>, sqlx::Error> {
        let query = format!(
            "UPDATE emergency_alerts SET active = FALSE
             WHERE id = $1 AND active = TRUE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyAlert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
