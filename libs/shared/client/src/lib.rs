pub mod auth;
pub mod client;
pub mod recording;
pub mod transport;

pub use auth::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
pub use client::HospitalApiClient;
pub use recording::{CallLog, CallRecord, RecordingTransport};
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport};
