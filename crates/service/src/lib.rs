//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod seed;
pub mod firma;
pub mod personel;
pub mod rol;
pub mod tedarikci;
pub mod siparis;
pub mod stok;
pub mod report;
pub mod bildirim;
