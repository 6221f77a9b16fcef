pub mod kv;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub mod session_store;
pub use session_store::{SessionStore, StoredSession};
