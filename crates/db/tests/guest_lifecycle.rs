//! Guest pass lifecycle against a real database.

use chrono::NaiveDate;
use site_core::status::{GuestStatus, UserRole};
use site_db::models::guest::CreateGuest;
use site_db::models::profile::CreateProfile;
use site_db::repositories::{GuestRepo, ProfileRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn resident(pool: &PgPool, email: &str) -> i64 {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            full_name: "Ayşe Demir".to_string(),
            role: UserRole::Resident,
            phone: None,
            block_no: Some("A".to_string()),
            apartment_no: Some("12".to_string()),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_guest(user_id: i64, token: &str) -> CreateGuest {
    CreateGuest {
        user_id,
        full_name: "Mehmet Yılmaz".to_string(),
        plate_number: Some("34 ABC 123".to_string()),
        visit_date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
        qr_token: token.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_guest_starts_expected(pool: PgPool) {
    let user_id = resident(&pool, "ayse@example.com").await;
    let guest = GuestRepo::create(&pool, &new_guest(user_id, "ABCDEFGH23"))
        .await
        .unwrap();

    assert_eq!(guest.status, GuestStatus::Expected);
    assert_eq!(guest.user_id, user_id);

    let found = GuestRepo::find_by_token(&pool, "ABCDEFGH23").await.unwrap();
    assert_eq!(found.map(|g| g.id), Some(guest.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_token_is_a_unique_violation(pool: PgPool) {
    let user_id = resident(&pool, "ayse@example.com").await;
    GuestRepo::create(&pool, &new_guest(user_id, "SAMETOKEN2"))
        .await
        .unwrap();

    let err = GuestRepo::create(&pool, &new_guest(user_id, "SAMETOKEN2"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_guests_qr_token"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_check_in_does_not_apply(pool: PgPool) {
    let user_id = resident(&pool, "ayse@example.com").await;
    let guest = GuestRepo::create(&pool, &new_guest(user_id, "SCANTWICE2"))
        .await
        .unwrap();

    let first =
        GuestRepo::advance_status(&pool, guest.id, GuestStatus::Expected, GuestStatus::Arrived)
            .await
            .unwrap();
    assert_eq!(first.map(|g| g.status), Some(GuestStatus::Arrived));

    let second =
        GuestRepo::advance_status(&pool, guest.id, GuestStatus::Expected, GuestStatus::Arrived)
            .await
            .unwrap();
    assert!(second.is_none());

    let departed =
        GuestRepo::advance_status(&pool, guest.id, GuestStatus::Arrived, GuestStatus::Departed)
            .await
            .unwrap();
    assert_eq!(departed.map(|g| g.status), Some(GuestStatus::Departed));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gate_queue_lists_only_requested_statuses(pool: PgPool) {
    let user_id = resident(&pool, "ayse@example.com").await;
    let waiting = GuestRepo::create(&pool, &new_guest(user_id, "WAITING222"))
        .await
        .unwrap();
    let done = GuestRepo::create(&pool, &new_guest(user_id, "DONEDONE22"))
        .await
        .unwrap();
    GuestRepo::advance_status(&pool, done.id, GuestStatus::Expected, GuestStatus::Arrived)
        .await
        .unwrap();
    GuestRepo::advance_status(&pool, done.id, GuestStatus::Arrived, GuestStatus::Departed)
        .await
        .unwrap();

    let queue = GuestRepo::list_by_statuses(&pool, &[GuestStatus::Expected, GuestStatus::Arrived])
        .await
        .unwrap();
    let ids: Vec<i64> = queue.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![waiting.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn residents_see_only_their_guests(pool: PgPool) {
    let ayse = resident(&pool, "ayse@example.com").await;
    let ali = resident(&pool, "ali@example.com").await;
    GuestRepo::create(&pool, &new_guest(ayse, "AYSEGUEST2"))
        .await
        .unwrap();
    GuestRepo::create(&pool, &new_guest(ali, "ALIGUEST22"))
        .await
        .unwrap();

    let mine = GuestRepo::list_for_user(&pool, ayse).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].qr_token, "AYSEGUEST2");

    assert_eq!(GuestRepo::list_all(&pool).await.unwrap().len(), 2);
}
