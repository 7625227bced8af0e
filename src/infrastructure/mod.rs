//! 基础设施层

pub mod database;
pub mod logger;
pub mod memory;

pub use database::SqliteStorage;
pub use logger::Logger;
pub use memory::MemoryStorage;
