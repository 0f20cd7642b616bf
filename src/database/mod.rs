pub mod manager;
pub mod memory;
pub mod models;
pub mod phone_number_types;
pub mod query_builder;
pub mod repository;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{InMemoryPhoneNumberTypeStore, InMemoryUserStore};
pub use phone_number_types::{PgPhoneNumberTypeStore, PhoneNumberTypeStore};
pub use users::{MongoUserStore, UserStore, UserStoreError};
