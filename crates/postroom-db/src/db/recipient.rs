use postroom_core::{
    models::{FinishType, Paginated, PublishedRecipient, Recipient, RecipientInput},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing recipients
#[derive(Clone)]
pub struct RecipientRepository {
    pool: PgPool,
}

impl RecipientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new recipient with its stored document metadata
    #[tracing::instrument(skip(self, input), fields(db.table = "recipients", db.operation = "insert"))]
    pub async fn create_recipient(
        &self,
        user_id: Uuid,
        input: &RecipientInput,
        file_path: &str,
        file_size: i64,
        file_pages: Option<i32>,
        finish_type: FinishType,
    ) -> Result<Recipient, AppError> {
        let recipient = sqlx::query_as::<Postgres, Recipient>(
            r#"
            INSERT INTO recipients (
                name, street, number, complement, neighborhood, city, state, postal_code,
                file_path, file_size, file_pages, finish_type, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, name, street, number, complement, neighborhood, city, state,
                      postal_code, file_path, file_size, file_pages, finish_type, in_batch,
                      user_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.street)
        .bind(&input.number)
        .bind(&input.complement)
        .bind(&input.neighborhood)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.postal_code)
        .bind(file_path)
        .bind(file_size)
        .bind(file_pages)
        .bind(finish_type)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(recipient)
    }

    /// Get recipient by ID
    #[tracing::instrument(skip(self), fields(db.table = "recipients", db.operation = "select", db.record_id = %id))]
    pub async fn get_recipient(&self, id: Uuid) -> Result<Option<Recipient>, AppError> {
        let recipient = sqlx::query_as::<Postgres, Recipient>(
            r#"
            SELECT id, name, street, number, complement, neighborhood, city, state,
                   postal_code, file_path, file_size, file_pages, finish_type, in_batch,
                   user_id, created_at, updated_at
            FROM recipients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(recipient)
    }

    /// List one page of a user's recipients, oldest first
    #[tracing::instrument(skip(self), fields(db.table = "recipients", db.operation = "select"))]
    pub async fn list_recipients(
        &self,
        user_id: Uuid,
        page: i64,
        per_page: i64,
    ) -> Result<Paginated<Recipient>, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipients WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let recipients = sqlx::query_as::<Postgres, Recipient>(
            r#"
            SELECT id, name, street, number, complement, neighborhood, city, state,
                   postal_code, file_path, file_size, file_pages, finish_type, in_batch,
                   user_id, created_at, updated_at
            FROM recipients
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        Ok(Paginated::new(recipients, total, page, per_page))
    }

    /// Update address fields only; file metadata is left untouched
    #[tracing::instrument(skip(self, input), fields(db.table = "recipients", db.operation = "update", db.record_id = %id))]
    pub async fn update_recipient(
        &self,
        id: Uuid,
        input: &RecipientInput,
    ) -> Result<Recipient, AppError> {
        let recipient = sqlx::query_as::<Postgres, Recipient>(
            r#"
            UPDATE recipients
            SET name = $1, street = $2, number = $3, complement = $4, neighborhood = $5,
                city = $6, state = $7, postal_code = $8, updated_at = NOW()
            WHERE id = $9
            RETURNING id, name, street, number, complement, neighborhood, city, state,
                      postal_code, file_path, file_size, file_pages, finish_type, in_batch,
                      user_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.street)
        .bind(&input.number)
        .bind(&input.complement)
        .bind(&input.neighborhood)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.postal_code)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        Ok(recipient)
    }

    /// Update address fields together with replaced document metadata
    #[tracing::instrument(skip(self, input), fields(db.table = "recipients", db.operation = "update", db.record_id = %id))]
    #[allow(clippy::too_many_arguments)]
    pub async fn update_recipient_with_file(
        &self,
        id: Uuid,
        input: &RecipientInput,
        file_path: &str,
        file_size: i64,
        file_pages: Option<i32>,
        finish_type: FinishType,
    ) -> Result<Recipient, AppError> {
        let recipient = sqlx::query_as::<Postgres, Recipient>(
            r#"
            UPDATE recipients
            SET name = $1, street = $2, number = $3, complement = $4, neighborhood = $5,
                city = $6, state = $7, postal_code = $8,
                file_path = $9, file_size = $10, file_pages = $11, finish_type = $12,
                updated_at = NOW()
            WHERE id = $13
            RETURNING id, name, street, number, complement, neighborhood, city, state,
                      postal_code, file_path, file_size, file_pages, finish_type, in_batch,
                      user_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.street)
        .bind(&input.number)
        .bind(&input.complement)
        .bind(&input.neighborhood)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.postal_code)
        .bind(file_path)
        .bind(file_size)
        .bind(file_pages)
        .bind(finish_type)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        Ok(recipient)
    }

    /// Delete recipient row. Returns false when the id did not exist.
    #[tracing::instrument(skip(self), fields(db.table = "recipients", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_recipient(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM recipients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// List one page of not-yet-batched recipients for a finish type, with
    /// the owner's display name joined in. Oldest first for stable paging.
    #[tracing::instrument(skip(self), fields(db.table = "recipients", db.operation = "select"))]
    pub async fn list_published(
        &self,
        finish_type: FinishType,
        page: i64,
        per_page: i64,
    ) -> Result<Paginated<PublishedRecipient>, AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM recipients WHERE finish_type = $1 AND in_batch = false",
        )
        .bind(finish_type)
        .fetch_one(&self.pool)
        .await?;

        let recipients = sqlx::query_as::<Postgres, PublishedRecipient>(
            r#"
            SELECT r.id, r.name, r.street, r.number, r.complement, r.neighborhood, r.city,
                   r.state, r.postal_code, r.file_path, r.file_size, r.file_pages,
                   r.finish_type, r.in_batch, r.user_id, r.created_at, r.updated_at,
                   u.name AS user_name
            FROM recipients r
            INNER JOIN users u ON u.id = r.user_id
            WHERE r.finish_type = $1 AND r.in_batch = false
            ORDER BY r.created_at ASC, r.id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(finish_type)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        Ok(Paginated::new(recipients, total, page, per_page))
    }

    /// Mark recipients as included in a mailing batch.
    ///
    /// Ids that are unknown or already batched are skipped; the returned
    /// count covers newly marked rows only.
    #[tracing::instrument(skip(self, recipient_ids), fields(db.table = "recipients", db.operation = "update"))]
    pub async fn mark_in_batch(&self, recipient_ids: &[Uuid]) -> Result<u64, AppError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE recipients
            SET in_batch = true, updated_at = NOW()
            WHERE id = ANY($1) AND in_batch = false
            "#,
        )
        .bind(recipient_ids)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected)
    }
}
