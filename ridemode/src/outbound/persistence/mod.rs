//! User record store adapters.

mod file_store;
mod memory_store;

pub use file_store::{FileUserRecordStore, USER_DATA_KEY};
pub use memory_store::InMemoryUserRecordStore;
