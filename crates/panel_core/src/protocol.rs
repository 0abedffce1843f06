//! Wire shapes exchanged with the host page.
//!
//! Inbound messages are parsed leniently: anything without a recognised
//! `type` is dropped, and malformed `limits`/`settings` payloads degrade to
//! defaults instead of rejecting the whole message.

use panel_logging::{panel_debug, panel_warn};
use serde::Serialize;
use serde_json::Value;

use crate::Limits;

pub const SAVE_SETTINGS_EVENT: &str = "saveSettings";
pub const CLOSE_EVENT: &str = "close";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    Open {
        /// `None` keeps the limits already in effect.
        limits: Option<Limits>,
        settings: OpenSettings,
    },
    Close,
}

/// Settings as delivered with `open`, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenSettings {
    pub enabled: bool,
    pub rotation_seconds: Option<i64>,
    pub urls: Vec<String>,
}

impl OpenSettings {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        Self {
            enabled: value.get("enabled").and_then(Value::as_bool) == Some(true),
            rotation_seconds: value.get("rotationSeconds").and_then(Value::as_i64),
            urls: value
                .get("urls")
                .and_then(Value::as_array)
                .map(|urls| {
                    urls.iter()
                        .filter_map(Value::as_str)
                        .map(ToOwned::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Body of the outbound `saveSettings` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub enabled: bool,
    pub rotation_seconds: u32,
    pub urls: Vec<String>,
}

/// Parses one raw host message. Returns `None` for anything the panel does
/// not understand.
pub fn parse_host_message(text: &str) -> Option<HostMessage> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => host_message_from_value(&value),
        Err(err) => {
            panel_debug!("Ignoring non-JSON host message: {}", err);
            None
        }
    }
}

pub fn host_message_from_value(value: &Value) -> Option<HostMessage> {
    let kind = value.get("type").and_then(Value::as_str)?;
    match kind {
        "open" => Some(HostMessage::Open {
            limits: limits_from_value(value.get("limits")),
            settings: OpenSettings::from_value(value.get("settings")),
        }),
        "close" => Some(HostMessage::Close),
        other => {
            panel_debug!("Ignoring host message with unknown type {:?}", other);
            None
        }
    }
}

fn limits_from_value(value: Option<&Value>) -> Option<Limits> {
    let value = value.filter(|value| !value.is_null())?;
    match serde_json::from_value::<Limits>(value.clone()) {
        Ok(limits) if limits.is_usable() => Some(limits),
        Ok(limits) => {
            panel_warn!("Keeping previous limits; received unusable {:?}", limits);
            None
        }
        Err(err) => {
            panel_warn!("Keeping previous limits; could not read payload: {}", err);
            None
        }
    }
}
