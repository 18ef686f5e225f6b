pub mod auth;
pub mod komentar;
pub mod tugas;
pub mod users;
pub mod wilayah;
