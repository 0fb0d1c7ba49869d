//! Session state and durable record storage.

pub mod session;
pub mod vault;

pub use session::{Session, SessionStore};
pub use vault::{JsonFileVault, RecordVault};
