//! In-process [`Store`] for tests and local experiments.
//!
//! Mirrors the SQL schema's behaviour: unique email and unique
//! (field officer, region) pairs, newest-first / oldest-first orderings,
//! cascading deletes, and an atomic status write + history append.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use tugas_core::roles::ROLE_KONSULTAN;
use tugas_core::tugas::{status_change_note, INITIAL_STATUS};
use tugas_core::types::{DbId, Timestamp};
use uuid::Uuid;

use crate::models::komentar::{CreateKomentar, KomentarDetail};
use crate::models::riwayat::Riwayat;
use crate::models::tugas::{CreateTugas, Tugas, TugasDetail, UpdateTugas};
use crate::models::user::{CreateUser, UpdateUser, User, UserSummary};
use crate::models::wilayah::{
    CreateWilayahPenyuluh, PenyuluhInfo, PenyuluhWilayah, WilayahPenyuluh,
};
use crate::store::{Store, StoreError, StoreResult};

/// Thread-safe in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Clone)]
struct KomentarRow {
    id: DbId,
    tugas_id: DbId,
    user_id: DbId,
    komentar: String,
    created_at: Timestamp,
}

/// Rows are kept in insertion order so equal timestamps still sort stably.
#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    tugas: Vec<Tugas>,
    komentar: Vec<KomentarRow>,
    riwayat: Vec<Riwayat>,
    wilayah: Vec<WilayahPenyuluh>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, MemoryState>> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state.write().map_err(poisoned)
    }
}

/// A writer panicked while holding the lock; refuse further access.
fn poisoned<E: std::fmt::Display>(err: E) -> StoreError {
    tracing::error!(error = %err, "Memory store lock poisoned");
    StoreError::Unavailable(err.to_string())
}

impl MemoryState {
    fn user(&self, id: DbId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Inner-join a tugas with its two users; `None` if either is gone.
    fn detail(&self, tugas: &Tugas) -> Option<TugasDetail> {
        let penyuluh = self.user(tugas.penyuluh_id)?;
        let konsultan = self.user(tugas.konsultan_id)?;
        Some(TugasDetail::from_parts(
            tugas.clone(),
            penyuluh.name.clone(),
            konsultan.name.clone(),
            konsultan.wilayah.clone(),
        ))
    }

    fn komentar_detail(&self, row: &KomentarRow) -> Option<KomentarDetail> {
        let author = self.user(row.user_id)?;
        Some(KomentarDetail {
            id: row.id,
            tugas_id: row.tugas_id,
            user_id: row.user_id,
            komentar: row.komentar.clone(),
            created_at: row.created_at,
            user_nama: author.name.clone(),
            user_email: author.email.clone(),
        })
    }

    fn newest_first<F>(&self, keep: F) -> Vec<TugasDetail>
    where
        F: Fn(&Tugas) -> bool,
    {
        let mut rows: Vec<TugasDetail> = self
            .tugas
            .iter()
            .rev()
            .filter(|&t| keep(t))
            .filter_map(|t| self.detail(t))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    fn remove_tugas(&mut self, id: DbId) -> bool {
        let before = self.tugas.len();
        self.tugas.retain(|t| t.id != id);
        self.komentar.retain(|c| c.tugas_id != id);
        self.riwayat.retain(|r| r.tugas_id != id);
        self.tugas.len() != before
    }
}

fn summaries<'a>(users: impl Iterator<Item = &'a User>) -> Vec<UserSummary> {
    let mut out: Vec<UserSummary> = users.map(UserSummary::from).collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.read().map(|_| ())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut state = self.write()?;
        if state.users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::Conflict(format!(
                "email '{}' already exists",
                input.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            wilayah: input.wilayah.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.read()?.user(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.users.iter().rev().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn list_users_by_role_and_wilayah(
        &self,
        role: &str,
        wilayah: &str,
    ) -> StoreResult<Vec<UserSummary>> {
        let state = self.read()?;
        Ok(summaries(state.users.iter().filter(|u| {
            u.role == role && u.wilayah.as_deref() == Some(wilayah)
        })))
    }

    async fn list_konsultan_for_penyuluh(
        &self,
        penyuluh_id: DbId,
    ) -> StoreResult<Vec<UserSummary>> {
        let state = self.read()?;

        let mut regions: Vec<&str> = state
            .wilayah
            .iter()
            .filter(|w| w.penyuluh_id == penyuluh_id)
            .map(|w| w.wilayah.as_str())
            .collect();
        if let Some(own) = state.user(penyuluh_id).and_then(|u| u.wilayah.as_deref()) {
            regions.push(own);
        }

        Ok(summaries(state.users.iter().filter(|u| {
            u.role == ROLE_KONSULTAN
                && u.wilayah
                    .as_deref()
                    .is_some_and(|w| regions.contains(&w))
        })))
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        let mut state = self.write()?;
        if let Some(email) = &input.email {
            if state.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict(format!("email '{email}' already exists")));
            }
        }

        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            user.name = name.clone();
        }
        if let Some(email) = &input.email {
            user.email = email.clone();
        }
        if let Some(hash) = &input.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(role) = &input.role {
            user.role = role.clone();
        }
        if let Some(wilayah) = &input.wilayah {
            user.wilayah = Some(wilayah.clone());
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: DbId) -> StoreResult<Option<User>> {
        let mut state = self.write()?;
        let Some(pos) = state.users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        let user = state.users.remove(pos);

        let owned: Vec<DbId> = state
            .tugas
            .iter()
            .filter(|t| t.penyuluh_id == id || t.konsultan_id == id)
            .map(|t| t.id)
            .collect();
        for tugas_id in owned {
            state.remove_tugas(tugas_id);
        }
        state.komentar.retain(|c| c.user_id != id);
        state.riwayat.retain(|r| r.user_id != id);
        state.wilayah.retain(|w| w.penyuluh_id != id);

        Ok(Some(user))
    }

    async fn create_tugas(&self, input: &CreateTugas) -> StoreResult<Tugas> {
        let mut state = self.write()?;
        let now = Utc::now();
        let tugas = Tugas {
            id: Uuid::now_v7(),
            judul: input.judul.clone(),
            deskripsi: input.deskripsi.clone(),
            jenis: input.jenis.clone(),
            penyuluh_id: input.penyuluh_id,
            konsultan_id: input.konsultan_id,
            tanggal_dibuat: input.tanggal_dibuat,
            tanggal_mulai: input.tanggal_mulai,
            deadline: input.deadline,
            status: INITIAL_STATUS.to_string(),
            lampiran_url: input.lampiran_url.clone(),
            created_at: now,
            updated_at: now,
        };
        state.tugas.push(tugas.clone());
        Ok(tugas)
    }

    async fn find_tugas(&self, id: DbId) -> StoreResult<Option<Tugas>> {
        Ok(self.read()?.tugas.iter().find(|t| t.id == id).cloned())
    }

    async fn find_tugas_detail(&self, id: DbId) -> StoreResult<Option<TugasDetail>> {
        let state = self.read()?;
        Ok(state
            .tugas
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| state.detail(t)))
    }

    async fn list_tugas_by_penyuluh(&self, penyuluh_id: DbId) -> StoreResult<Vec<TugasDetail>> {
        Ok(self.read()?.newest_first(|t| t.penyuluh_id == penyuluh_id))
    }

    async fn list_tugas_by_konsultan(&self, konsultan_id: DbId) -> StoreResult<Vec<TugasDetail>> {
        Ok(self.read()?.newest_first(|t| t.konsultan_id == konsultan_id))
    }

    async fn update_tugas(&self, id: DbId, input: &UpdateTugas) -> StoreResult<Option<Tugas>> {
        let mut state = self.write()?;
        let Some(tugas) = state.tugas.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(judul) = &input.judul {
            tugas.judul = judul.clone();
        }
        if let Some(deskripsi) = &input.deskripsi {
            tugas.deskripsi = Some(deskripsi.clone());
        }
        if let Some(jenis) = &input.jenis {
            tugas.jenis = jenis.clone();
        }
        if let Some(konsultan_id) = input.konsultan_id {
            tugas.konsultan_id = konsultan_id;
        }
        if let Some(tanggal_mulai) = input.tanggal_mulai {
            tugas.tanggal_mulai = Some(tanggal_mulai);
        }
        if let Some(deadline) = input.deadline {
            tugas.deadline = deadline;
        }
        if let Some(lampiran_url) = &input.lampiran_url {
            tugas.lampiran_url = Some(lampiran_url.clone());
        }
        tugas.updated_at = Utc::now();
        Ok(Some(tugas.clone()))
    }

    async fn update_tugas_status(
        &self,
        id: DbId,
        status: &str,
        user_id: DbId,
    ) -> StoreResult<Option<Tugas>> {
        let mut state = self.write()?;
        let now = Utc::now();
        let Some(tugas) = state.tugas.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        let status_lama = std::mem::replace(&mut tugas.status, status.to_string());
        tugas.updated_at = now;
        let updated = tugas.clone();

        state.riwayat.push(Riwayat {
            id: Uuid::now_v7(),
            tugas_id: id,
            user_id,
            keterangan: status_change_note(&status_lama, status),
            status_lama,
            status_baru: status.to_string(),
            created_at: now,
        });
        Ok(Some(updated))
    }

    async fn delete_tugas(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.write()?.remove_tugas(id))
    }

    async fn create_komentar(&self, input: &CreateKomentar) -> StoreResult<KomentarDetail> {
        let mut state = self.write()?;
        let row = KomentarRow {
            id: Uuid::now_v7(),
            tugas_id: input.tugas_id,
            user_id: input.user_id,
            komentar: input.komentar.clone(),
            created_at: Utc::now(),
        };
        let detail = state
            .komentar_detail(&row)
            .ok_or_else(|| StoreError::Conflict(format!("user {} does not exist", input.user_id)))?;
        state.komentar.push(row);
        Ok(detail)
    }

    async fn list_komentar(&self, tugas_id: DbId) -> StoreResult<Vec<KomentarDetail>> {
        let state = self.read()?;
        let mut rows: Vec<KomentarDetail> = state
            .komentar
            .iter()
            .filter(|c| c.tugas_id == tugas_id)
            .filter_map(|c| state.komentar_detail(c))
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn list_riwayat(&self, tugas_id: DbId) -> StoreResult<Vec<Riwayat>> {
        let mut rows: Vec<Riwayat> = self
            .read()?
            .riwayat
            .iter()
            .rev()
            .filter(|r| r.tugas_id == tugas_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn add_wilayah(&self, input: &CreateWilayahPenyuluh) -> StoreResult<WilayahPenyuluh> {
        let mut state = self.write()?;
        if state
            .wilayah
            .iter()
            .any(|w| w.penyuluh_id == input.penyuluh_id && w.wilayah == input.wilayah)
        {
            return Err(StoreError::Conflict(format!(
                "wilayah '{}' is already recorded for this penyuluh",
                input.wilayah
            )));
        }

        let row = WilayahPenyuluh {
            id: Uuid::now_v7(),
            penyuluh_id: input.penyuluh_id,
            wilayah: input.wilayah.clone(),
            created_at: Utc::now(),
        };
        state.wilayah.push(row.clone());
        Ok(row)
    }

    async fn remove_wilayah(&self, penyuluh_id: DbId, wilayah: &str) -> StoreResult<u64> {
        let mut state = self.write()?;
        let before = state.wilayah.len();
        state
            .wilayah
            .retain(|w| !(w.penyuluh_id == penyuluh_id && w.wilayah == wilayah));
        Ok((before - state.wilayah.len()) as u64)
    }

    async fn list_wilayah_for_penyuluh(
        &self,
        penyuluh_id: DbId,
    ) -> StoreResult<Vec<WilayahPenyuluh>> {
        let mut rows: Vec<WilayahPenyuluh> = self
            .read()?
            .wilayah
            .iter()
            .filter(|w| w.penyuluh_id == penyuluh_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.wilayah.cmp(&b.wilayah));
        Ok(rows)
    }

    async fn list_penyuluh_for_wilayah(&self, wilayah: &str) -> StoreResult<Vec<PenyuluhWilayah>> {
        let state = self.read()?;
        let mut rows: Vec<PenyuluhWilayah> = state
            .wilayah
            .iter()
            .filter(|w| w.wilayah == wilayah)
            .filter_map(|w| state.user(w.penyuluh_id))
            .map(|u| PenyuluhWilayah {
                penyuluh_id: u.id,
                penyuluh: PenyuluhInfo {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                },
            })
            .collect();
        rows.sort_by(|a, b| a.penyuluh.name.cmp(&b.penyuluh.name));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use tugas_core::roles::{ROLE_GAPOKTAN, ROLE_PENYULUH};
    use tugas_core::tugas::STATUS_SELESAI;

    async fn user(store: &MemoryStore, name: &str, role: &str, wilayah: Option<&str>) -> User {
        store
            .create_user(&CreateUser {
                name: name.to_string(),
                email: format!("{name}@test.com"),
                password_hash: "hash".to_string(),
                role: role.to_string(),
                wilayah: wilayah.map(str::to_string),
            })
            .await
            .expect("user creation should succeed")
    }

    fn new_tugas(judul: &str, penyuluh_id: DbId, konsultan_id: DbId) -> CreateTugas {
        CreateTugas {
            judul: judul.to_string(),
            deskripsi: None,
            jenis: "Umum".to_string(),
            penyuluh_id,
            konsultan_id,
            tanggal_dibuat: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            tanggal_mulai: None,
            deadline: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            lampiran_url: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        user(&store, "ani", ROLE_PENYULUH, None).await;

        let result = store
            .create_user(&CreateUser {
                name: "other".to_string(),
                email: "ani@test.com".to_string(),
                password_hash: "hash".to_string(),
                role: ROLE_PENYULUH.to_string(),
                wilayah: None,
            })
            .await;
        assert_matches!(result, Err(StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_new_tugas_starts_not_started() {
        let store = MemoryStore::new();
        let p = user(&store, "p", ROLE_PENYULUH, None).await;
        let k = user(&store, "k", ROLE_KONSULTAN, Some("East")).await;

        let tugas = store.create_tugas(&new_tugas("a", p.id, k.id)).await.unwrap();
        assert_eq!(tugas.status, INITIAL_STATUS);
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let store = MemoryStore::new();
        let p = user(&store, "p", ROLE_PENYULUH, None).await;
        let k = user(&store, "k", ROLE_KONSULTAN, Some("East")).await;

        for judul in ["first", "second", "third"] {
            store.create_tugas(&new_tugas(judul, p.id, k.id)).await.unwrap();
        }

        let listed = store.list_tugas_by_penyuluh(p.id).await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|t| t.judul.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
        assert_eq!(listed[0].konsultan_nama, "k");
        assert_eq!(listed[0].konsultan_wilayah.as_deref(), Some("East"));
    }

    #[tokio::test]
    async fn test_status_update_appends_history() {
        let store = MemoryStore::new();
        let p = user(&store, "p", ROLE_PENYULUH, None).await;
        let k = user(&store, "k", ROLE_KONSULTAN, Some("East")).await;
        let tugas = store.create_tugas(&new_tugas("a", p.id, k.id)).await.unwrap();

        let updated = store
            .update_tugas_status(tugas.id, STATUS_SELESAI, k.id)
            .await
            .unwrap()
            .expect("tugas exists");
        assert_eq!(updated.status, STATUS_SELESAI);

        let history = store.list_riwayat(tugas.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status_lama, INITIAL_STATUS);
        assert_eq!(history[0].status_baru, STATUS_SELESAI);
        assert_eq!(history[0].user_id, k.id);
    }

    #[tokio::test]
    async fn test_status_update_on_missing_tugas_writes_nothing() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();
        let result = store
            .update_tugas_status(missing, STATUS_SELESAI, Uuid::new_v4())
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(store.list_riwayat(missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_tugas_cascades() {
        let store = MemoryStore::new();
        let p = user(&store, "p", ROLE_PENYULUH, None).await;
        let k = user(&store, "k", ROLE_KONSULTAN, Some("East")).await;
        let tugas = store.create_tugas(&new_tugas("a", p.id, k.id)).await.unwrap();
        store
            .create_komentar(&CreateKomentar {
                tugas_id: tugas.id,
                user_id: p.id,
                komentar: "ok".to_string(),
            })
            .await
            .unwrap();

        assert!(store.delete_tugas(tugas.id).await.unwrap());
        assert!(!store.delete_tugas(tugas.id).await.unwrap());
        assert!(store.list_komentar(tugas.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wilayah_pairs_are_unique_and_removal_is_idempotent() {
        let store = MemoryStore::new();
        let p = user(&store, "p", ROLE_PENYULUH, None).await;
        let input = CreateWilayahPenyuluh {
            penyuluh_id: p.id,
            wilayah: "East".to_string(),
        };

        store.add_wilayah(&input).await.unwrap();
        assert_matches!(store.add_wilayah(&input).await, Err(StoreError::Conflict(_)));

        assert_eq!(store.remove_wilayah(p.id, "East").await.unwrap(), 1);
        assert_eq!(store.remove_wilayah(p.id, "East").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_konsultan_for_penyuluh_uses_all_regions() {
        let store = MemoryStore::new();
        let p = user(&store, "p", ROLE_PENYULUH, Some("North")).await;
        user(&store, "zed", ROLE_KONSULTAN, Some("North")).await;
        user(&store, "amir", ROLE_KONSULTAN, Some("East")).await;
        user(&store, "far", ROLE_KONSULTAN, Some("West")).await;
        user(&store, "group", ROLE_GAPOKTAN, Some("East")).await;
        store
            .add_wilayah(&CreateWilayahPenyuluh {
                penyuluh_id: p.id,
                wilayah: "East".to_string(),
            })
            .await
            .unwrap();

        let found = store.list_konsultan_for_penyuluh(p.id).await.unwrap();
        let names: Vec<&str> = found.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["amir", "zed"]);
    }
}
