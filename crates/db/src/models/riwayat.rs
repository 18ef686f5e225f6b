//! Tugas status history model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tugas_core::types::{DbId, Timestamp};

/// A row from the `tugas_riwayat` table. Written only alongside a status change.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Riwayat {
    pub id: DbId,
    pub tugas_id: DbId,
    pub user_id: DbId,
    pub status_lama: String,
    pub status_baru: String,
    pub keterangan: String,
    pub created_at: Timestamp,
}
