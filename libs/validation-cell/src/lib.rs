pub mod field_specs;
pub mod models;
pub mod services;

pub use field_specs::{field_spec, FIELD_SPECS};
pub use models::*;
pub use services::*;
