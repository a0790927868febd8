use std::fs;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName};
use rustls::{ClientConnection, RootCertStore, StreamOwned};

use crate::config::ClientConfig;
use crate::error::ConnectionError;

/// Default bounded wait for a gateway error response after a write.
pub const DEFAULT_POLL_WINDOW: Duration = Duration::from_millis(200);

/// One persistent encrypted socket to the gateway.
///
/// The send pipeline consumes connections through this contract; test
/// doubles and alternative transports implement the same surface.
pub trait Connection {
    fn is_open(&self) -> bool;

    /// Opens the transport. Fails with [`ConnectionError`] on connect or
    /// handshake failure. Opening an already-open connection is a no-op.
    fn open(&mut self) -> Result<(), ConnectionError>;

    /// Releases the transport. Idempotent.
    fn close(&mut self);

    /// Writes `frame`, returning how many bytes the transport accepted.
    fn write(&mut self, frame: &[u8]) -> Result<usize, ConnectionError>;

    /// Bounded check for available response bytes. The wait window is the
    /// implementation's configuration concern, not the caller's.
    fn poll_readable(&mut self) -> bool;

    /// Blocks until exactly `len` bytes arrive or the transport errors.
    fn read(&mut self, len: usize) -> Result<Vec<u8>, ConnectionError>;
}

/// rustls-backed [`Connection`] over a blocking TCP socket, authenticating
/// with the provider certificate.
#[derive(Debug)]
pub struct TlsConnection {
    endpoint: String,
    tls: Arc<rustls::ClientConfig>,
    poll_window: Duration,
    stream: Option<StreamOwned<ClientConnection, TcpStream>>,
}

impl TlsConnection {
    /// Builds a connection for `endpoint` (`host:port`) using the PEM
    /// identity at `certificate` for client authentication. Server trust
    /// comes from `ca_bundle` when given, the bundled web roots otherwise.
    pub fn new(
        endpoint: impl Into<String>,
        certificate: impl AsRef<Path>,
        ca_bundle: Option<&Path>,
    ) -> Result<Self, ConnectionError> {
        let (certs, key) = load_identity(certificate.as_ref())?;
        let roots = load_roots(ca_bundle)?;
        let tls = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_client_auth_cert(certs, key)
            .map_err(|err| ConnectionError::Identity { message: err.to_string() })?;
        Ok(Self {
            endpoint: endpoint.into(),
            tls: Arc::new(tls),
            poll_window: DEFAULT_POLL_WINDOW,
            stream: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConnectionError> {
        Ok(Self::new(config.gateway.clone(), &config.certificate, config.ca_bundle.as_deref())?
            .with_poll_window(config.poll_window()))
    }

    pub fn with_poll_window(mut self, window: Duration) -> Self {
        self.poll_window = window;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn server_name(&self) -> Result<ServerName<'static>, ConnectionError> {
        let host = self.endpoint.rsplit_once(':').map(|(host, _)| host).unwrap_or(&self.endpoint);
        ServerName::try_from(host.to_string()).map_err(|err| ConnectionError::Endpoint {
            endpoint: self.endpoint.clone(),
            reason: err.to_string(),
        })
    }
}

impl Connection for TlsConnection {
    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn open(&mut self) -> Result<(), ConnectionError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let server_name = self.server_name()?;
        let mut sock = TcpStream::connect(&self.endpoint)
            .map_err(|err| ConnectionError::Io { message: err.to_string() })?;
        sock.set_nodelay(true).map_err(|err| ConnectionError::Io { message: err.to_string() })?;
        let mut conn = ClientConnection::new(Arc::clone(&self.tls), server_name)
            .map_err(|err| ConnectionError::Tls { message: err.to_string() })?;
        // Handshake failures must surface here, not on the first write.
        while conn.is_handshaking() {
            conn.complete_io(&mut sock)
                .map_err(|err| ConnectionError::Tls { message: err.to_string() })?;
        }
        log::info!("connected to <{}>", self.endpoint);
        self.stream = Some(StreamOwned::new(conn, sock));
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.conn.send_close_notify();
            let _ = stream.flush();
            log::debug!("connection to <{}> closed", self.endpoint);
        }
    }

    fn write(&mut self, frame: &[u8]) -> Result<usize, ConnectionError> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotOpen)?;
        let written =
            stream.write(frame).map_err(|err| ConnectionError::Io { message: err.to_string() })?;
        stream.flush().map_err(|err| ConnectionError::Io { message: err.to_string() })?;
        Ok(written)
    }

    fn poll_readable(&mut self) -> bool {
        let Some(stream) = self.stream.as_mut() else {
            return false;
        };
        // A response may already sit decrypted in the session buffer.
        if let Ok(state) = stream.conn.process_new_packets() {
            if state.plaintext_bytes_to_read() > 0 {
                return true;
            }
        }
        if stream.sock.set_read_timeout(Some(self.poll_window)).is_err() {
            return false;
        }
        let mut probe = [0u8; 1];
        let readable = matches!(stream.sock.peek(&mut probe), Ok(n) if n > 0);
        let _ = stream.sock.set_read_timeout(None);
        readable
    }

    fn read(&mut self, len: usize) -> Result<Vec<u8>, ConnectionError> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotOpen)?;
        let mut buf = vec![0u8; len];
        stream
            .read_exact(&mut buf)
            .map_err(|err| ConnectionError::Io { message: err.to_string() })?;
        Ok(buf)
    }
}

fn load_identity(
    path: &Path,
) -> Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>), ConnectionError> {
    let pem = fs::read(path).map_err(|err| ConnectionError::Identity {
        message: format!("{}: {err}", path.display()),
    })?;
    let certs = rustls_pemfile::certs(&mut pem.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ConnectionError::Identity {
            message: format!("{}: {err}", path.display()),
        })?;
    if certs.is_empty() {
        return Err(ConnectionError::Identity {
            message: format!("{}: no certificates found", path.display()),
        });
    }
    let key = rustls_pemfile::private_key(&mut pem.as_slice())
        .map_err(|err| ConnectionError::Identity {
            message: format!("{}: {err}", path.display()),
        })?
        .ok_or_else(|| ConnectionError::Identity {
            message: format!("{}: no private key found", path.display()),
        })?;
    Ok((certs, key))
}

fn load_roots(ca_bundle: Option<&Path>) -> Result<RootCertStore, ConnectionError> {
    let mut roots = RootCertStore::empty();
    match ca_bundle {
        Some(path) => {
            let pem = fs::read(path).map_err(|err| ConnectionError::Identity {
                message: format!("{}: {err}", path.display()),
            })?;
            for cert in rustls_pemfile::certs(&mut pem.as_slice()) {
                let cert = cert.map_err(|err| ConnectionError::Identity {
                    message: format!("{}: {err}", path.display()),
                })?;
                roots.add(cert).map_err(|err| ConnectionError::Identity {
                    message: format!("{}: {err}", path.display()),
                })?;
            }
            if roots.is_empty() {
                return Err(ConnectionError::Identity {
                    message: format!("{}: no trust anchors found", path.display()),
                });
            }
        }
        None => {
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }
    }
    Ok(roots)
}
