pub mod cache;
pub mod database;
pub mod impls;
#[cfg(feature = "memory")]
pub mod memory;
pub mod model;
pub mod store;

pub use cache::CacheService;
pub use database::{Database, MIGRATOR};
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use store::{EconomyStore, LevelStore, ModerationStore, RoleStore, SettingsStore, Store};
