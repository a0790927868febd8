use std::path::Path;
use std::sync::Arc;

use apns_wire::{decode_response, encode_frame, Message, WireError, RESPONSE_LEN};

use crate::config::{ClientConfig, GatewayEnvironment};
use crate::connection::{Connection, TlsConnection};
use crate::error::{ConnectionError, SendError};
use crate::event::{EventSink, SendEvent};

/// Seam between the send pipeline and frame encoding, so the encoder can be
/// absent (precondition failure) or replaced in tests.
pub trait FrameEncoder: Send + Sync {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, WireError>;
}

/// Default encoder producing the gateway's binary frame layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct WireFrameEncoder;

impl FrameEncoder for WireFrameEncoder {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, WireError> {
        encode_frame(message)
    }
}

/// The send pipeline: validates preconditions, lazily opens the connection,
/// encodes and writes the frame, and interprets an optional error response.
///
/// One `Sender` owns one connection; `send` takes `&mut self`, so a shared
/// instance needs external serialization, mirroring the one-socket model of
/// the gateway protocol.
pub struct Sender {
    encoder: Option<Arc<dyn FrameEncoder>>,
    connection: Option<Box<dyn Connection>>,
    event_sink: Option<Arc<dyn EventSink>>,
    check_for_errors: bool,
}

impl Default for Sender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender {
    /// A bare sender. `send` fails fast until an encoder and a connection
    /// are attached.
    pub fn new() -> Self {
        Self { encoder: None, connection: None, event_sink: None, check_for_errors: true }
    }

    /// Wires the default stack for `certificate` against the chosen gateway
    /// environment.
    pub fn with_certificate(
        certificate: impl AsRef<Path>,
        environment: GatewayEnvironment,
    ) -> Result<Self, ConnectionError> {
        let connection = TlsConnection::new(environment.endpoint(), certificate, None)?;
        Ok(Self::new().with_encoder(Arc::new(WireFrameEncoder)).with_connection(Box::new(connection)))
    }

    /// Wires the default stack from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConnectionError> {
        let mut sender = Self::new()
            .with_encoder(Arc::new(WireFrameEncoder))
            .with_connection(Box::new(TlsConnection::from_config(config)?));
        sender.check_for_errors = config.check_for_errors;
        Ok(sender)
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn FrameEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn with_connection(mut self, connection: Box<dyn Connection>) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(event_sink);
        self
    }

    /// Toggles the post-write check for a gateway error response. When
    /// disabled the sender never polls or reads, and the outcome tracks
    /// write completeness alone.
    pub fn set_check_for_errors(&mut self, enabled: bool) {
        self.check_for_errors = enabled;
    }

    pub fn check_for_errors(&self) -> bool {
        self.check_for_errors
    }

    /// Sends one notification. `Ok(true)` means the gateway accepted the
    /// full frame at the transport level; absence of an error response is
    /// not a delivery guarantee, only absence of an immediately observed
    /// rejection.
    ///
    /// At most one write and one read attempt happen per call; there is no
    /// automatic retry. On [`SendError::Rejected`] the connection has been
    /// closed and the caller decides whether to send again.
    pub fn send(&mut self, message: &Message) -> Result<bool, SendError> {
        let encoder = self.encoder.as_ref().ok_or(SendError::EncoderUndefined)?;
        let connection = self.connection.as_mut().ok_or(SendError::ConnectionUndefined)?;
        if message.device_token.is_empty() {
            return Err(SendError::DeviceTokenMissing);
        }

        let frame = encoder.encode(message)?;

        if !connection.is_open() {
            log::debug!("opening gateway connection");
            connection.open()?;
        }

        let written = connection.write(&frame)?;
        let accepted = written == frame.len();
        if !accepted {
            log::warn!("partial write: {written} of {} frame bytes accepted", frame.len());
        }

        if self.check_for_errors && connection.poll_readable() {
            let raw = connection.read(RESPONSE_LEN)?;
            let bytes: [u8; RESPONSE_LEN] = raw.as_slice().try_into().map_err(|_| {
                SendError::Connection(ConnectionError::Io {
                    message: format!("short error response: {} bytes", raw.len()),
                })
            })?;
            let response = decode_response(bytes);
            if let Some(sink) = &self.event_sink {
                sink.publish(&SendEvent::Failed { message: message.clone(), response });
            }
            log::error!(
                "gateway rejected notification {}: {}",
                response.identifier,
                response.status
            );
            log::debug!("closing gateway connection");
            connection.close();
            return Err(SendError::Rejected { response, message: message.clone() });
        }

        if let Some(sink) = &self.event_sink {
            sink.publish(&SendEvent::Completed { message: message.clone() });
        }
        log::info!("notification {} sent to {}", message.identifier, message.device_token);
        Ok(accepted)
    }

    /// Convenience wrapper: builds a [`Message`] from the two required
    /// fields and delegates to [`Sender::send`]. Auxiliary attributes go
    /// through the `Message` builder methods.
    pub fn send_message(
        &mut self,
        device_token: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<bool, SendError> {
        self.send(&Message::new(device_token, body))
    }
}
