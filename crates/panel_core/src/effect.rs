use std::time::Duration;

use crate::SaveRequest;

/// Quiet period before the preview follows the caret.
pub const PREVIEW_DEBOUNCE: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST `saveSettings` to the host.
    PostSaveSettings(SaveRequest),
    /// POST `close` to the host.
    PostClose,
    /// Replace any pending preview timer with one firing after `delay`.
    SchedulePreviewRefresh { generation: u64, delay: Duration },
    /// Point the preview image surface at `url`.
    LoadPreviewImage { url: String },
}
