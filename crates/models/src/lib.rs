//! Document models for the warehouse API.
//!
//! Each module defines the wire shape of one collection plus the
//! field-level validation its constructors enforce. Uniqueness and
//! cross-collection checks live in the `service` crate.

pub mod errors;
pub mod validators;
pub mod firma;
pub mod personel;
pub mod tedarikci;
pub mod urun;
pub mod siparis;
pub mod stok;
pub mod rol;
pub mod bildirim;
