pub mod errors;
pub mod manager;
pub mod models;
pub mod persist;
pub mod reducer;
pub mod shuffle;
pub mod store;
pub mod transfer;

pub use errors::*;
pub use manager::*;
pub use models::*;
pub use persist::*;
pub use reducer::*;
pub use shuffle::*;
pub use store::memory::MemoryStore;
pub use store::*;
