pub mod models;
pub mod scenarios;
pub mod services;

pub use models::*;
pub use scenarios::scenarios;
pub use services::*;
