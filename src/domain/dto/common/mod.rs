pub mod api_response;

pub use api_response::{to_utc, ApiResponse};
