//! Account service: registration, credential checks and balance mutations

pub mod service;
pub mod repository;
pub mod password;
pub mod config;

pub use service::AccountService;
pub use repository::{StoreType, UserStore, InMemoryUserStore, PostgresUserStore};
pub use config::AccountServiceConfig;
