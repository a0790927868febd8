mod config;
mod connection;
mod error;
mod event;
mod sender;

pub use config::{ClientConfig, GatewayEnvironment, PRODUCTION_GATEWAY, SANDBOX_GATEWAY};
pub use connection::{Connection, TlsConnection, DEFAULT_POLL_WINDOW};
pub use error::{ConnectionError, SendError};
pub use event::{EventSink, SendEvent};
pub use sender::{FrameEncoder, Sender, WireFrameEncoder};
