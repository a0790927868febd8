use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Production gateway endpoint for the legacy binary interface.
pub const PRODUCTION_GATEWAY: &str = "gateway.push.apple.com:2195";
/// Sandbox gateway endpoint for development-provisioned devices.
pub const SANDBOX_GATEWAY: &str = "gateway.sandbox.push.apple.com:2195";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    Production,
    Sandbox,
}

impl GatewayEnvironment {
    pub fn endpoint(self) -> &'static str {
        match self {
            GatewayEnvironment::Production => PRODUCTION_GATEWAY,
            GatewayEnvironment::Sandbox => SANDBOX_GATEWAY,
        }
    }
}

/// Client settings, loadable from TOML.
///
/// `certificate` points at a PEM file holding the provider certificate and
/// its private key. `ca_bundle` optionally replaces the built-in web trust
/// anchors when the gateway chain is pinned.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_gateway")]
    pub gateway: String,
    pub certificate: PathBuf,
    #[serde(default)]
    pub ca_bundle: Option<PathBuf>,
    #[serde(default = "default_poll_window_ms")]
    pub poll_window_ms: u64,
    #[serde(default = "default_check_for_errors")]
    pub check_for_errors: bool,
}

fn default_gateway() -> String {
    SANDBOX_GATEWAY.to_string()
}

fn default_poll_window_ms() -> u64 {
    200
}

fn default_check_for_errors() -> bool {
    true
}

impl ClientConfig {
    pub fn for_environment(
        environment: GatewayEnvironment,
        certificate: impl Into<PathBuf>,
    ) -> Self {
        Self {
            gateway: environment.endpoint().to_string(),
            certificate: certificate.into(),
            ca_bundle: None,
            poll_window_ms: default_poll_window_ms(),
            check_for_errors: default_check_for_errors(),
        }
    }

    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    pub fn poll_window(&self) -> Duration {
        Duration::from_millis(self.poll_window_ms)
    }
}
