//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod komentar_repo;
pub mod riwayat_repo;
pub mod tugas_repo;
pub mod user_repo;
pub mod wilayah_repo;

pub use komentar_repo::KomentarRepo;
pub use riwayat_repo::RiwayatRepo;
pub use tugas_repo::TugasRepo;
pub use user_repo::UserRepo;
pub use wilayah_repo::WilayahRepo;
