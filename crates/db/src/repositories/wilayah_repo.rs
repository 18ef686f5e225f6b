//! Repository for the `wilayah_penyuluh` table.

use sqlx::PgPool;
use tugas_core::types::DbId;

use crate::models::wilayah::{CreateWilayahPenyuluh, PenyuluhInfo, PenyuluhWilayah, WilayahPenyuluh};

/// Provides region assignment operations for field officers.
pub struct WilayahRepo;

impl WilayahRepo {
    /// Record a region for a field officer.
    ///
    /// A duplicate pair violates `uq_wilayah_penyuluh_pair`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWilayahPenyuluh,
    ) -> Result<WilayahPenyuluh, sqlx::Error> {
        sqlx::query_as::<_, WilayahPenyuluh>(
            "INSERT INTO wilayah_penyuluh (penyuluh_id, wilayah)
             VALUES ($1, $2)
             RETURNING id, penyuluh_id, wilayah, created_at",
        )
        .bind(input.penyuluh_id)
        .bind(&input.wilayah)
        .fetch_one(pool)
        .await
    }

    /// List the regions recorded for a field officer, ordered by label.
    pub async fn list_for_penyuluh(
        pool: &PgPool,
        penyuluh_id: DbId,
    ) -> Result<Vec<WilayahPenyuluh>, sqlx::Error> {
        sqlx::query_as::<_, WilayahPenyuluh>(
            "SELECT id, penyuluh_id, wilayah, created_at
             FROM wilayah_penyuluh
             WHERE penyuluh_id = $1
             ORDER BY wilayah",
        )
        .bind(penyuluh_id)
        .fetch_all(pool)
        .await
    }

    /// Remove a region from a field officer. Absent pairs are not an error.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_pair(
        pool: &PgPool,
        penyuluh_id: DbId,
        wilayah: &str,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM wilayah_penyuluh WHERE penyuluh_id = $1 AND wilayah = $2")
                .bind(penyuluh_id)
                .bind(wilayah)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// List the field officers covering a region.
    pub async fn list_penyuluh_for_wilayah(
        pool: &PgPool,
        wilayah: &str,
    ) -> Result<Vec<PenyuluhWilayah>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PenyuluhInfo>(
            "SELECT u.id, u.name, u.email
             FROM wilayah_penyuluh w
             JOIN users u ON u.id = w.penyuluh_id
             WHERE w.wilayah = $1
             ORDER BY u.name",
        )
        .bind(wilayah)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|penyuluh| PenyuluhWilayah {
                penyuluh_id: penyuluh.id,
                penyuluh,
            })
            .collect())
    }
}
