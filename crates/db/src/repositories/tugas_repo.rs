//! Repository for the `tugas` table.

use sqlx::PgPool;
use tugas_core::tugas::{status_change_note, INITIAL_STATUS};
use tugas_core::types::DbId;

use crate::models::tugas::{CreateTugas, Tugas, TugasDetail, UpdateTugas};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, judul, deskripsi, jenis, penyuluh_id, konsultan_id, tanggal_dibuat, \
                       tanggal_mulai, deadline, status, lampiran_url, created_at, updated_at";

/// Select list for [`TugasDetail`], joining creator and assignee names.
const DETAIL_SELECT: &str = "SELECT t.id, t.judul, t.deskripsi, t.jenis,
        t.penyuluh_id, p.name AS penyuluh_nama,
        t.konsultan_id, k.name AS konsultan_nama, k.wilayah AS konsultan_wilayah,
        t.tanggal_dibuat, t.tanggal_mulai, t.deadline, t.status, t.lampiran_url,
        t.created_at, t.updated_at
     FROM tugas t
     JOIN users p ON p.id = t.penyuluh_id
     JOIN users k ON k.id = t.konsultan_id";

/// Provides CRUD operations for tugas.
pub struct TugasRepo;

impl TugasRepo {
    /// Insert a new tugas with the initial status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTugas) -> Result<Tugas, sqlx::Error> {
        let query = format!(
            "INSERT INTO tugas
                (judul, deskripsi, jenis, penyuluh_id, konsultan_id,
                 tanggal_dibuat, tanggal_mulai, deadline, status, lampiran_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tugas>(&query)
            .bind(&input.judul)
            .bind(&input.deskripsi)
            .bind(&input.jenis)
            .bind(input.penyuluh_id)
            .bind(input.konsultan_id)
            .bind(input.tanggal_dibuat)
            .bind(input.tanggal_mulai)
            .bind(input.deadline)
            .bind(INITIAL_STATUS)
            .bind(&input.lampiran_url)
            .fetch_one(pool)
            .await
    }

    /// Find a tugas row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tugas>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tugas WHERE id = $1");
        sqlx::query_as::<_, Tugas>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tugas by ID with creator and assignee display fields.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<TugasDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE t.id = $1");
        sqlx::query_as::<_, TugasDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tugas created by a field officer, newest first.
    pub async fn list_by_penyuluh(
        pool: &PgPool,
        penyuluh_id: DbId,
    ) -> Result<Vec<TugasDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE t.penyuluh_id = $1 ORDER BY t.created_at DESC");
        sqlx::query_as::<_, TugasDetail>(&query)
            .bind(penyuluh_id)
            .fetch_all(pool)
            .await
    }

    /// List tugas assigned to a consultant, newest first.
    pub async fn list_by_konsultan(
        pool: &PgPool,
        konsultan_id: DbId,
    ) -> Result<Vec<TugasDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE t.konsultan_id = $1 ORDER BY t.created_at DESC");
        sqlx::query_as::<_, TugasDetail>(&query)
            .bind(konsultan_id)
            .fetch_all(pool)
            .await
    }

    /// Update a tugas. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTugas,
    ) -> Result<Option<Tugas>, sqlx::Error> {
        let query = format!(
            "UPDATE tugas SET
                judul = COALESCE($2, judul),
                deskripsi = COALESCE($3, deskripsi),
                jenis = COALESCE($4, jenis),
                konsultan_id = COALESCE($5, konsultan_id),
                tanggal_mulai = COALESCE($6, tanggal_mulai),
                deadline = COALESCE($7, deadline),
                lampiran_url = COALESCE($8, lampiran_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tugas>(&query)
            .bind(id)
            .bind(&input.judul)
            .bind(&input.deskripsi)
            .bind(&input.jenis)
            .bind(input.konsultan_id)
            .bind(input.tanggal_mulai)
            .bind(input.deadline)
            .bind(&input.lampiran_url)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a tugas and append a history entry.
    ///
    /// Runs in a transaction: the row is locked, the status written, and the
    /// `tugas_riwayat` entry inserted, or nothing is. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        user_id: DbId,
    ) -> Result<Option<Tugas>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<(String,)> =
            sqlx::query_as("SELECT status FROM tugas WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((status_lama,)) = previous else {
            return Ok(None);
        };

        let query = format!("UPDATE tugas SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let tugas = sqlx::query_as::<_, Tugas>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO tugas_riwayat (tugas_id, user_id, status_lama, status_baru, keterangan)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(user_id)
        .bind(&status_lama)
        .bind(status)
        .bind(status_change_note(&status_lama, status))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(tugas_id = %id, from = %status_lama, to = %status, "Status history recorded");
        Ok(Some(tugas))
    }

    /// Delete a tugas. Comments and history go with it via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tugas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
