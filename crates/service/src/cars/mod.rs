//! Car records: wire-level candidate type, validation and the in-memory store.

pub mod domain;
pub mod repository;
pub mod store;

pub use domain::{Car, CarCandidate, CarInput, Place, PlaceInput};
pub use repository::CarRepository;
pub use store::CarStore;
