use crate::HostMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Message posted by the host page.
    Host(HostMessage),
    /// User flipped the enabled toggle.
    EnabledToggled(bool),
    /// User edited the rotation field (raw text).
    RotationEdited(String),
    /// URL field text changed. `cursor` is the caret offset in UTF-16
    /// code units.
    UrlsEdited { text: String, cursor: usize },
    /// Caret moved or the URL field gained focus without a text change.
    UrlsCaret { cursor: usize, trigger: CaretTrigger },
    /// User clicked Save.
    SaveClicked,
    /// User clicked Close.
    CloseClicked,
    /// Key pressed anywhere in the panel document.
    KeyPressed(Key),
    /// Debounce timer for the preview fired.
    PreviewRefreshDue { generation: u64 },
    /// Rendering surface finished decoding the preview image.
    PreviewImageLoaded {
        url: String,
        natural_width: u32,
        natural_height: u32,
    },
    /// Rendering surface could not load the preview image.
    PreviewImageFailed { url: String },
    /// Host acknowledged `saveSettings`.
    SaveAccepted,
    /// `saveSettings` request failed at the transport level.
    SaveFailed,
    /// `close` request failed at the transport level.
    CloseFailed,
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretTrigger {
    KeyUp,
    Click,
    Focus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM-style key name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}
