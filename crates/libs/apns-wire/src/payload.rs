use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::WireError;
use crate::message::Message;

/// The JSON document carried in a request frame's payload section.
///
/// Built fresh for every send and discarded after framing. Absent optional
/// attributes are omitted entirely; custom keys sit next to `aps` at the top
/// level.
#[derive(Debug, Serialize)]
pub struct NotificationPayload {
    aps: Aps,
    #[serde(flatten)]
    extras: BTreeMap<String, JsonValue>,
}

#[derive(Debug, Serialize)]
struct Aps {
    alert: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    badge: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<String>,
}

impl NotificationPayload {
    pub fn from_message(message: &Message) -> Self {
        Self {
            aps: Aps {
                alert: message.body.clone(),
                badge: message.badge,
                sound: message.sound.clone(),
            },
            extras: message.extras.clone(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        serde_json::to_vec(self).map_err(|err| WireError::Encode { message: err.to_string() })
    }
}
