pub mod repository;
pub mod service;

pub use repository::{AccountRepository, SeaOrmAccountRepository};
pub use service::AccountService;
