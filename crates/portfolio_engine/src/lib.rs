//! Portfolio engine: relay client and the async contact controller.
mod controller;
mod payload;
mod relay;
mod response;
mod types;

pub use controller::{ContactController, ViewSink};
pub use payload::RelayPayload;
pub use relay::{into_outcome, Relay, RelaySettings, ReqwestRelay, DEFAULT_ENDPOINT};
pub use response::classify_response;
pub use types::{FailureKind, RelayError, RelayReply};
