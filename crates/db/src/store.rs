//! Persistence port used by the HTTP layer.
//!
//! [`Store`] is the read/write contract the handlers depend on. [`PgStore`]
//! implements it over the SQL repositories; [`MemoryStore`](crate::MemoryStore)
//! implements the same contract in-process for tests.

use async_trait::async_trait;
use tugas_core::types::DbId;

use crate::models::komentar::{CreateKomentar, KomentarDetail};
use crate::models::riwayat::Riwayat;
use crate::models::tugas::{CreateTugas, Tugas, TugasDetail, UpdateTugas};
use crate::models::user::{CreateUser, UpdateUser, User, UserSummary};
use crate::models::wilayah::{CreateWilayahPenyuluh, PenyuluhWilayah, WilayahPenyuluh};
use crate::repositories::{KomentarRepo, RiwayatRepo, TugasRepo, UserRepo, WilayahRepo};
use crate::DbPool;

/// Errors surfaced by a [`Store`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated (reported by stores without SQL constraints).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store could not serve the request at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write contract over users, tugas, comments, history, and regions.
///
/// Lookups return `Ok(None)` for absent rows; deciding whether that is an
/// error is up to the caller.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> StoreResult<()>;

    // -- users --

    /// Insert a user. Fails with a conflict if the email is taken.
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// All users, most recently created first.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Users with `role` in `wilayah`, ordered by name.
    async fn list_users_by_role_and_wilayah(
        &self,
        role: &str,
        wilayah: &str,
    ) -> StoreResult<Vec<UserSummary>>;

    /// Consultants in any region the field officer covers, ordered by name.
    async fn list_konsultan_for_penyuluh(&self, penyuluh_id: DbId)
        -> StoreResult<Vec<UserSummary>>;

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>>;

    /// Delete a user, returning the removed row.
    async fn delete_user(&self, id: DbId) -> StoreResult<Option<User>>;

    // -- tugas --

    /// Insert a tugas with the initial status.
    async fn create_tugas(&self, input: &CreateTugas) -> StoreResult<Tugas>;

    async fn find_tugas(&self, id: DbId) -> StoreResult<Option<Tugas>>;

    async fn find_tugas_detail(&self, id: DbId) -> StoreResult<Option<TugasDetail>>;

    /// Tugas created by `penyuluh_id`, newest first.
    async fn list_tugas_by_penyuluh(&self, penyuluh_id: DbId) -> StoreResult<Vec<TugasDetail>>;

    /// Tugas assigned to `konsultan_id`, newest first.
    async fn list_tugas_by_konsultan(&self, konsultan_id: DbId) -> StoreResult<Vec<TugasDetail>>;

    async fn update_tugas(&self, id: DbId, input: &UpdateTugas) -> StoreResult<Option<Tugas>>;

    /// Write a new status and its history entry atomically.
    async fn update_tugas_status(
        &self,
        id: DbId,
        status: &str,
        user_id: DbId,
    ) -> StoreResult<Option<Tugas>>;

    /// Delete a tugas with its comments and history. Returns `true` if it existed.
    async fn delete_tugas(&self, id: DbId) -> StoreResult<bool>;

    // -- comments & history --

    async fn create_komentar(&self, input: &CreateKomentar) -> StoreResult<KomentarDetail>;

    /// Comments on a tugas, oldest first.
    async fn list_komentar(&self, tugas_id: DbId) -> StoreResult<Vec<KomentarDetail>>;

    /// History of a tugas, newest first.
    async fn list_riwayat(&self, tugas_id: DbId) -> StoreResult<Vec<Riwayat>>;

    // -- regions --

    /// Record a region for a field officer. Fails with a conflict on a duplicate pair.
    async fn add_wilayah(&self, input: &CreateWilayahPenyuluh) -> StoreResult<WilayahPenyuluh>;

    /// Remove a region from a field officer; returns the number of rows removed.
    async fn remove_wilayah(&self, penyuluh_id: DbId, wilayah: &str) -> StoreResult<u64>;

    /// Regions recorded for a field officer, ordered by label.
    async fn list_wilayah_for_penyuluh(&self, penyuluh_id: DbId)
        -> StoreResult<Vec<WilayahPenyuluh>>;

    /// Field officers covering a region.
    async fn list_penyuluh_for_wilayah(&self, wilayah: &str) -> StoreResult<Vec<PenyuluhWilayah>>;
}

/// [`Store`] backed by PostgreSQL through the `*Repo` query sets.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for health checks.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn list_users_by_role_and_wilayah(
        &self,
        role: &str,
        wilayah: &str,
    ) -> StoreResult<Vec<UserSummary>> {
        Ok(UserRepo::list_by_role_and_wilayah(&self.pool, role, wilayah).await?)
    }

    async fn list_konsultan_for_penyuluh(
        &self,
        penyuluh_id: DbId,
    ) -> StoreResult<Vec<UserSummary>> {
        Ok(UserRepo::list_konsultan_for_penyuluh(&self.pool, penyuluh_id).await?)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        Ok(UserRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }

    async fn create_tugas(&self, input: &CreateTugas) -> StoreResult<Tugas> {
        Ok(TugasRepo::create(&self.pool, input).await?)
    }

    async fn find_tugas(&self, id: DbId) -> StoreResult<Option<Tugas>> {
        Ok(TugasRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_tugas_detail(&self, id: DbId) -> StoreResult<Option<TugasDetail>> {
        Ok(TugasRepo::find_detail(&self.pool, id).await?)
    }

    async fn list_tugas_by_penyuluh(&self, penyuluh_id: DbId) -> StoreResult<Vec<TugasDetail>> {
        Ok(TugasRepo::list_by_penyuluh(&self.pool, penyuluh_id).await?)
    }

    async fn list_tugas_by_konsultan(&self, konsultan_id: DbId) -> StoreResult<Vec<TugasDetail>> {
        Ok(TugasRepo::list_by_konsultan(&self.pool, konsultan_id).await?)
    }

    async fn update_tugas(&self, id: DbId, input: &UpdateTugas) -> StoreResult<Option<Tugas>> {
        Ok(TugasRepo::update(&self.pool, id, input).await?)
    }

    async fn update_tugas_status(
        &self,
        id: DbId,
        status: &str,
        user_id: DbId,
    ) -> StoreResult<Option<Tugas>> {
        Ok(TugasRepo::update_status(&self.pool, id, status, user_id).await?)
    }

    async fn delete_tugas(&self, id: DbId) -> StoreResult<bool> {
        Ok(TugasRepo::delete(&self.pool, id).await?)
    }

    async fn create_komentar(&self, input: &CreateKomentar) -> StoreResult<KomentarDetail> {
        Ok(KomentarRepo::create(&self.pool, input).await?)
    }

    async fn list_komentar(&self, tugas_id: DbId) -> StoreResult<Vec<KomentarDetail>> {
        Ok(KomentarRepo::list_for_tugas(&self.pool, tugas_id).await?)
    }

    async fn list_riwayat(&self, tugas_id: DbId) -> StoreResult<Vec<Riwayat>> {
        Ok(RiwayatRepo::list_for_tugas(&self.pool, tugas_id).await?)
    }

    async fn add_wilayah(&self, input: &CreateWilayahPenyuluh) -> StoreResult<WilayahPenyuluh> {
        Ok(WilayahRepo::create(&self.pool, input).await?)
    }

    async fn remove_wilayah(&self, penyuluh_id: DbId, wilayah: &str) -> StoreResult<u64> {
        Ok(WilayahRepo::delete_pair(&self.pool, penyuluh_id, wilayah).await?)
    }

    async fn list_wilayah_for_penyuluh(
        &self,
        penyuluh_id: DbId,
    ) -> StoreResult<Vec<WilayahPenyuluh>> {
        Ok(WilayahRepo::list_for_penyuluh(&self.pool, penyuluh_id).await?)
    }

    async fn list_penyuluh_for_wilayah(&self, wilayah: &str) -> StoreResult<Vec<PenyuluhWilayah>> {
        Ok(WilayahRepo::list_penyuluh_for_wilayah(&self.pool, wilayah).await?)
    }
}
