//! Service layer providing the car CRUD contract.
//! - Separates record validation and storage from the HTTP adapter.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod storage;
pub mod cars;
