//! Academy player registry: library with models, registration logic, record
//! stores, and view rendering.

pub mod config;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod store;
pub mod views;

pub use config::{Config, StoreBackend};
pub use logic::{find_duplicates, DuplicateFlags, IdAllocator, PhotoStore};
pub use models::{Gender, PlayerId, PlayerRecord, BELT_DEGREES, DEFAULT_SPORT, NO_PHOTO};
pub use store::{CsvStore, RecordStore, SqliteStore, StoreError};
