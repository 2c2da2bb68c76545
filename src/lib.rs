pub mod birthdays;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;

pub use config::Config;
pub use error::{ApiError, StoreError};
pub use models::{Contact, CreateContact, UpdateContact};
pub use routes::{router, AppState};
pub use store::ContactStore;
