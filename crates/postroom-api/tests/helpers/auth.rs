//! Seeds users with provisioned access keys, the way ops tooling would.

use postroom_api::auth::access_key::{extract_key_prefix, generate_access_key, hash_access_key};
use postroom_db::UserRepository;
use uuid::Uuid;

/// Test user data: DB row id plus the raw access key used as bearer token.
#[allow(dead_code)] // Not every test binary reads every field
pub struct TestUser {
    pub user_id: Uuid,
    pub name: String,
    pub token: String,
}

/// Insert a user with a freshly generated access key; returns the raw key for requests.
pub async fn seed_user(pool: &sqlx::PgPool, name: &str, email: &str) -> TestUser {
    let key = generate_access_key();
    let key_hash = hash_access_key(&key).expect("Failed to hash access key");
    let key_prefix = extract_key_prefix(&key);

    let repo = UserRepository::new(pool.clone());
    let user = repo
        .create_user(name, email, &key_prefix, &key_hash)
        .await
        .expect("Failed to create test user");

    TestUser {
        user_id: user.id,
        name: user.name,
        token: key,
    }
}
