//! Repository for the `tugas_riwayat` table.
//!
//! Entries are only written by [`TugasRepo::update_status`](super::TugasRepo::update_status).

use sqlx::PgPool;
use tugas_core::types::DbId;

use crate::models::riwayat::Riwayat;

/// Provides read access to tugas status history.
pub struct RiwayatRepo;

impl RiwayatRepo {
    /// List history entries for a tugas, newest first.
    pub async fn list_for_tugas(pool: &PgPool, tugas_id: DbId) -> Result<Vec<Riwayat>, sqlx::Error> {
        sqlx::query_as::<_, Riwayat>(
            "SELECT id, tugas_id, user_id, status_lama, status_baru, keterangan, created_at
             FROM tugas_riwayat
             WHERE tugas_id = $1
             ORDER BY created_at DESC",
        )
        .bind(tugas_id)
        .fetch_all(pool)
        .await
    }
}
