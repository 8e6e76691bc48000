pub mod capability;
pub mod error;
pub mod response;

pub use capability::{Capability, PayloadShape, ResultPath, UnknownCapability};
pub use error::{ApiError, ApiResult};
pub use response::{json_type, lookup_path, NormalizedResponse, Payload, RawResponse, Record};
