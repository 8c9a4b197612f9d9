//! Repository for the `service_requests` table.

use site_core::status::ServiceRequestStatus;
use site_core::types::DbId;
use sqlx::PgPool;

use crate::models::service_request::{CreateServiceRequest, ServiceRequest, ServiceRequestFilter};

const COLUMNS: &str = "id, user_id, category, description, status, created_at, updated_at";

pub struct ServiceRequestRepo;

impl ServiceRequestRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateServiceRequest,
    ) -> Result<ServiceRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_requests (user_id, category, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(input.user_id)
            .bind(input.category.as_str())
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ServiceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_requests WHERE id = $1");
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A resident's own tickets, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_requests WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Staff work queue. Empty status list means any status.
    pub async fn list(
        pool: &PgPool,
        filter: &ServiceRequestFilter,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        let statuses: Vec<&str> = filter.statuses.iter().map(|s| s.as_str()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM service_requests
             WHERE (cardinality($1::text[]) = 0 OR status = ANY($1))
               AND ($2::text IS NULL OR category = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(&statuses)
            .bind(filter.category.map(|c| c.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Move a ticket to `next` if it is still in `current`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        current: ServiceRequestStatus,
        next: ServiceRequestStatus,
    ) -> Result<Option<ServiceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE service_requests SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(current.as_str())
            .bind(next.as_str())
            .fetch_optional(pool)
            .await
    }
}
