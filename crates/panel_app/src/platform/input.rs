//! Line-oriented input: each stdin line is one JSON object.
//!
//! Objects with a `type` field are host messages; objects with a `ui` field
//! are user or rendering-surface events.

use panel_core::{host_message_from_value, utf16_len, CaretTrigger, Key, Msg};
use panel_logging::panel_debug;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(tag = "ui", rename_all = "camelCase")]
enum UiEvent {
    UrlsInput {
        text: String,
        /// Defaults to the end of the text, as after typing.
        #[serde(default)]
        cursor: Option<usize>,
    },
    Caret {
        cursor: usize,
        trigger: Trigger,
    },
    Toggle {
        enabled: bool,
    },
    Rotation {
        text: String,
    },
    Save,
    CloseClicked,
    Key {
        key: String,
    },
    ImageLoaded {
        url: String,
        width: u32,
        height: u32,
    },
    ImageFailed {
        url: String,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Trigger {
    KeyUp,
    Click,
    Focus,
}

impl From<Trigger> for CaretTrigger {
    fn from(trigger: Trigger) -> Self {
        match trigger {
            Trigger::KeyUp => CaretTrigger::KeyUp,
            Trigger::Click => CaretTrigger::Click,
            Trigger::Focus => CaretTrigger::Focus,
        }
    }
}

impl UiEvent {
    fn into_msg(self) -> Msg {
        match self {
            UiEvent::UrlsInput { text, cursor } => {
                let cursor = cursor.unwrap_or_else(|| utf16_len(&text));
                Msg::UrlsEdited { text, cursor }
            }
            UiEvent::Caret { cursor, trigger } => Msg::UrlsCaret {
                cursor,
                trigger: trigger.into(),
            },
            UiEvent::Toggle { enabled } => Msg::EnabledToggled(enabled),
            UiEvent::Rotation { text } => Msg::RotationEdited(text),
            UiEvent::Save => Msg::SaveClicked,
            UiEvent::CloseClicked => Msg::CloseClicked,
            UiEvent::Key { key } => Msg::KeyPressed(Key::from_name(&key)),
            UiEvent::ImageLoaded { url, width, height } => Msg::PreviewImageLoaded {
                url,
                natural_width: width,
                natural_height: height,
            },
            UiEvent::ImageFailed { url } => Msg::PreviewImageFailed { url },
        }
    }
}

/// Turns one input line into a panel message, or `None` if it is not one.
pub fn parse_line(line: &str) -> Option<Msg> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            panel_debug!("Ignoring non-JSON input line: {}", err);
            return None;
        }
    };

    if value.get("type").is_some() {
        return host_message_from_value(&value).map(Msg::Host);
    }
    if value.get("ui").is_some() {
        return match serde_json::from_value::<UiEvent>(value) {
            Ok(event) => Some(event.into_msg()),
            Err(err) => {
                panel_debug!("Ignoring malformed ui event: {}", err);
                None
            }
        };
    }
    None
}
