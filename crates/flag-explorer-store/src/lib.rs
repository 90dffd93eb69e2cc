pub mod store;

pub use store::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL, MokaStore, StoreConfig};
