// SQLite record store
// Papers plus the store's own search audit log; one file per working session

mod codec;
mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use records::SearchAuditRecord;
pub use schema::validate_schema;
