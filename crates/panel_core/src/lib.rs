//! Settings panel core: pure state machine, validation and view-model helpers.
mod effect;
mod msg;
mod preview;
mod protocol;
mod state;
mod update;
mod urls;
mod view_model;

pub use effect::{Effect, PREVIEW_DEBOUNCE};
pub use msg::{CaretTrigger, Key, Msg};
pub use preview::{current_line, select_preview_url, ImageSurface, PreviewState, PreviewStatus};
pub use protocol::{
    host_message_from_value, parse_host_message, HostMessage, OpenSettings, SaveRequest,
    CLOSE_EVENT, SAVE_SETTINGS_EVENT,
};
pub use state::{Hint, Limits, PanelState, SavingState, Visibility};
pub use update::update;
pub use urls::{
    clamp_rotation, is_valid_http_url, parse_urls, serialize_urls, utf16_len, validate_urls,
    ValidationError,
};
pub use view_model::{ButtonView, PanelViewModel, PreviewView, RotationFieldView};
