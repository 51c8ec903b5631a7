use postroom_core::{models::User, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing users
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            r#"
            SELECT id, name, email, key_prefix, key_hash, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List active users whose access key starts with the given prefix.
    ///
    /// Prefixes are not unique by construction, so authentication verifies
    /// the presented key against every candidate hash.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn list_by_key_prefix(&self, key_prefix: &str) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<Postgres, User>(
            r#"
            SELECT id, name, email, key_prefix, key_hash, is_active, created_at, updated_at
            FROM users
            WHERE key_prefix = $1 AND is_active = true
            "#,
        )
        .bind(key_prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Insert a new user with a provisioned access key hash
    #[tracing::instrument(skip(self, key_hash), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        key_prefix: &str,
        key_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (name, email, key_prefix, key_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, key_prefix, key_hash, is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(key_prefix)
        .bind(key_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
