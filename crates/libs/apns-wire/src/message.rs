use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One push notification, immutable once handed to the frame encoder.
///
/// `device_token` is the hex form of the 32-byte device identifier. The
/// token is validated at encode time, not here, so a `Message` can be
/// constructed and inspected before any protocol work happens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub device_token: String,
    pub body: String,
    #[serde(default)]
    pub identifier: u32,
    #[serde(default)]
    pub expiry: u32,
    #[serde(default)]
    pub badge: Option<u32>,
    #[serde(default)]
    pub sound: Option<String>,
    #[serde(default)]
    pub extras: BTreeMap<String, JsonValue>,
}

impl Message {
    pub fn new(device_token: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            device_token: device_token.into(),
            body: body.into(),
            identifier: 0,
            expiry: 0,
            badge: None,
            sound: None,
            extras: BTreeMap::new(),
        }
    }

    /// Caller-chosen correlation id echoed back in gateway error responses.
    pub fn with_identifier(mut self, identifier: u32) -> Self {
        self.identifier = identifier;
        self
    }

    /// UNIX timestamp after which the gateway discards the notification.
    /// Zero means the gateway does not store it at all.
    pub fn with_expiry(mut self, expiry: u32) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn with_badge(mut self, badge: u32) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// Adds a custom top-level payload key alongside the `aps` dictionary.
    pub fn with_extra(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.extras.insert(key.into(), value);
        self
    }
}
