//! Storage abstractions for service layer
//!
//! Process-local stores only; nothing here outlives the process.

pub mod memory_map_store;
