use bildir_db::models::session::{CreateSession, KIND_STAFF};
use bildir_db::models::user::CreateUser;
use bildir_db::repositories::{SessionRepo, UserRepo};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

fn account(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "$argon2id$fake".to_string(),
        is_admin: false,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_dedupes_floor_assignments(pool: SqlitePool) {
    let user = UserRepo::create_with_floors(&pool, &account("temizlik1"), &[1, 2, 2, 3, 1])
        .await
        .unwrap();

    let floors = UserRepo::floors_for(&pool, user.id).await.unwrap();
    assert_eq!(floors.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_violates_unique_constraint(pool: SqlitePool) {
    UserRepo::create_with_floors(&pool, &account("temizlik1"), &[])
        .await
        .unwrap();
    let err = UserRepo::create_with_floors(&pool, &account("temizlik1"), &[])
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_floors_and_sessions(pool: SqlitePool) {
    let user = UserRepo::create_with_floors(&pool, &account("temizlik1"), &[1, 2])
        .await
        .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            jti: "tok-1".to_string(),
            kind: KIND_STAFF,
            user_id: Some(user.id),
            expires_at: Utc::now() + Duration::hours(12),
        },
    )
    .await
    .unwrap();

    assert!(UserRepo::delete_by_username(&pool, "temizlik1").await.unwrap());
    assert!(!UserRepo::delete_by_username(&pool, "temizlik1").await.unwrap());

    let floors: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_floors")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(floors.0, 0);

    let session = SessionRepo::find_active(&pool, "tok-1", Utc::now())
        .await
        .unwrap();
    assert!(session.is_none(), "deleted account must not keep live sessions");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn directory_listing_includes_floor_sets(pool: SqlitePool) {
    UserRepo::create_with_floors(&pool, &account("temizlik1"), &[1, 2, 3])
        .await
        .unwrap();
    UserRepo::create_with_floors(&pool, &account("temizlik2"), &[])
        .await
        .unwrap();

    let accounts = UserRepo::list_with_floors(&pool).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].username, "temizlik1");
    assert_eq!(accounts[0].floors, [1, 2, 3]);
    assert!(accounts[1].floors.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoked_and_expired_sessions_are_not_live(pool: SqlitePool) {
    let user = UserRepo::create_with_floors(&pool, &account("temizlik1"), &[1])
        .await
        .unwrap();

    SessionRepo::create(
        &pool,
        &CreateSession {
            jti: "tok-live".to_string(),
            kind: KIND_STAFF,
            user_id: Some(user.id),
            expires_at: Utc::now() + Duration::hours(1),
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            jti: "tok-stale".to_string(),
            kind: KIND_STAFF,
            user_id: Some(user.id),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active(&pool, "tok-live", Utc::now())
        .await
        .unwrap()
        .is_some());
    assert!(SessionRepo::find_active(&pool, "tok-stale", Utc::now())
        .await
        .unwrap()
        .is_none());

    assert!(SessionRepo::revoke(&pool, "tok-live").await.unwrap());
    assert!(!SessionRepo::revoke(&pool, "tok-live").await.unwrap());
    assert!(SessionRepo::find_active(&pool, "tok-live", Utc::now())
        .await
        .unwrap()
        .is_none());
}
