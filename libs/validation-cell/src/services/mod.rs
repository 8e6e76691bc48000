pub mod assertions;
pub mod validator;

pub use assertions::*;
pub use validator::{discrepancies, validate, validate_fields};
