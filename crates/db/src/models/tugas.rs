//! Tugas (task) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tugas_core::types::{Date, DbId, Timestamp};

/// A row from the `tugas` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tugas {
    pub id: DbId,
    pub judul: String,
    pub deskripsi: Option<String>,
    pub jenis: String,
    pub penyuluh_id: DbId,
    pub konsultan_id: DbId,
    pub tanggal_dibuat: Date,
    pub tanggal_mulai: Option<Date>,
    pub deadline: Date,
    pub status: String,
    pub lampiran_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A tugas joined with the display fields of its creator and assignee.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TugasDetail {
    pub id: DbId,
    pub judul: String,
    pub deskripsi: Option<String>,
    pub jenis: String,
    pub penyuluh_id: DbId,
    pub penyuluh_nama: String,
    pub konsultan_id: DbId,
    pub konsultan_nama: String,
    pub konsultan_wilayah: Option<String>,
    pub tanggal_dibuat: Date,
    pub tanggal_mulai: Option<Date>,
    pub deadline: Date,
    pub status: String,
    pub lampiran_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TugasDetail {
    /// Combine a tugas row with the names looked up for its two users.
    pub fn from_parts(
        tugas: Tugas,
        penyuluh_nama: String,
        konsultan_nama: String,
        konsultan_wilayah: Option<String>,
    ) -> Self {
        Self {
            id: tugas.id,
            judul: tugas.judul,
            deskripsi: tugas.deskripsi,
            jenis: tugas.jenis,
            penyuluh_id: tugas.penyuluh_id,
            penyuluh_nama,
            konsultan_id: tugas.konsultan_id,
            konsultan_nama,
            konsultan_wilayah,
            tanggal_dibuat: tugas.tanggal_dibuat,
            tanggal_mulai: tugas.tanggal_mulai,
            deadline: tugas.deadline,
            status: tugas.status,
            lampiran_url: tugas.lampiran_url,
            created_at: tugas.created_at,
            updated_at: tugas.updated_at,
        }
    }
}

/// DTO for inserting a tugas.
///
/// `penyuluh_id` and `tanggal_dibuat` are filled in by the server; the status
/// is always the initial one and is not part of this DTO.
#[derive(Debug, Clone)]
pub struct CreateTugas {
    pub judul: String,
    pub deskripsi: Option<String>,
    pub jenis: String,
    pub penyuluh_id: DbId,
    pub konsultan_id: DbId,
    pub tanggal_dibuat: Date,
    pub tanggal_mulai: Option<Date>,
    pub deadline: Date,
    pub lampiran_url: Option<String>,
}

/// DTO for editing a tugas. Only `Some` fields are applied; an empty string
/// is a value like any other and is written as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTugas {
    pub judul: Option<String>,
    pub deskripsi: Option<String>,
    pub jenis: Option<String>,
    pub konsultan_id: Option<DbId>,
    pub tanggal_mulai: Option<Date>,
    pub deadline: Option<Date>,
    pub lampiran_url: Option<String>,
}
