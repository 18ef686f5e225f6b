//! Tugas comment model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tugas_core::types::{DbId, Timestamp};

/// A comment joined with its author's display fields.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct KomentarDetail {
    pub id: DbId,
    pub tugas_id: DbId,
    pub user_id: DbId,
    pub komentar: String,
    pub created_at: Timestamp,
    pub user_nama: String,
    pub user_email: String,
}

/// DTO for inserting a comment. `komentar` is already trimmed.
#[derive(Debug, Clone)]
pub struct CreateKomentar {
    pub tugas_id: DbId,
    pub user_id: DbId,
    pub komentar: String,
}
