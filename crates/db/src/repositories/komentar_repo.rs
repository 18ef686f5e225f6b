//! Repository for the `tugas_komentar` table.

use sqlx::PgPool;
use tugas_core::types::DbId;

use crate::models::komentar::{CreateKomentar, KomentarDetail};

/// Provides insert and listing for tugas comments.
pub struct KomentarRepo;

impl KomentarRepo {
    /// Insert a comment and return it joined with its author.
    pub async fn create(
        pool: &PgPool,
        input: &CreateKomentar,
    ) -> Result<KomentarDetail, sqlx::Error> {
        sqlx::query_as::<_, KomentarDetail>(
            "WITH inserted AS (
                 INSERT INTO tugas_komentar (tugas_id, user_id, komentar)
                 VALUES ($1, $2, $3)
                 RETURNING id, tugas_id, user_id, komentar, created_at
             )
             SELECT i.id, i.tugas_id, i.user_id, i.komentar, i.created_at,
                    u.name AS user_nama, u.email AS user_email
             FROM inserted i
             JOIN users u ON u.id = i.user_id",
        )
        .bind(input.tugas_id)
        .bind(input.user_id)
        .bind(&input.komentar)
        .fetch_one(pool)
        .await
    }

    /// List comments on a tugas, oldest first.
    pub async fn list_for_tugas(
        pool: &PgPool,
        tugas_id: DbId,
    ) -> Result<Vec<KomentarDetail>, sqlx::Error> {
        sqlx::query_as::<_, KomentarDetail>(
            "SELECT c.id, c.tugas_id, c.user_id, c.komentar, c.created_at,
                    u.name AS user_nama, u.email AS user_email
             FROM tugas_komentar c
             JOIN users u ON u.id = c.user_id
             WHERE c.tugas_id = $1
             ORDER BY c.created_at ASC",
        )
        .bind(tugas_id)
        .fetch_all(pool)
        .await
    }
}
