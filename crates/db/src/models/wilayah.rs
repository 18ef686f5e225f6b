//! Field-officer region assignments.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tugas_core::types::{DbId, Timestamp};

/// A row from the `wilayah_penyuluh` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WilayahPenyuluh {
    pub id: DbId,
    pub penyuluh_id: DbId,
    pub wilayah: String,
    pub created_at: Timestamp,
}

/// DTO for assigning a region to a field officer. `wilayah` is already trimmed.
#[derive(Debug, Clone)]
pub struct CreateWilayahPenyuluh {
    pub penyuluh_id: DbId,
    pub wilayah: String,
}

/// Contact fields of a field officer covering a region.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PenyuluhInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// One field officer found by region lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenyuluhWilayah {
    pub penyuluh_id: DbId,
    pub penyuluh: PenyuluhInfo,
}
