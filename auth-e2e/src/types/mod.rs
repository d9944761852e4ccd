pub mod opaque_id;
pub mod response;

pub use response::{ApiEnvelope, ApiReply, ErrorDetail};
