use serde::Deserialize;

use crate::view_model::PanelViewModel;
use crate::{utf16_len, OpenSettings, PreviewState};

/// Bounds supplied by the host on every `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub min_rotation_seconds: u32,
    pub max_rotation_seconds: u32,
    pub max_urls: usize,
    pub max_url_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_rotation_seconds: 5,
            max_rotation_seconds: 600,
            max_urls: 20,
            max_url_length: 512,
        }
    }
}

impl Limits {
    /// All bounds positive and the rotation range non-empty.
    pub fn is_usable(&self) -> bool {
        self.min_rotation_seconds > 0
            && self.max_rotation_seconds >= self.min_rotation_seconds
            && self.max_urls > 0
            && self.max_url_length > 0
    }

    pub(crate) fn rotation_hint(&self) -> String {
        format!(
            "Allowed: {}s to {}s",
            self.min_rotation_seconds, self.max_rotation_seconds
        )
    }

    pub(crate) fn url_hint(&self) -> String {
        format!(
            "Up to {} URLs, each at most {} characters.",
            self.max_urls, self.max_url_length
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavingState {
    #[default]
    Idle,
    Saving,
}

/// Inline hint text; error hints are rendered highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hint {
    pub text: String,
    pub is_error: bool,
}

impl Hint {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Everything the panel knows. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    limits: Limits,
    visibility: Visibility,
    saving: SavingState,
    enabled: bool,
    rotation_text: String,
    urls_text: String,
    cursor: usize,
    rotation_hint: String,
    url_hint: Hint,
    preview: PreviewState,
    preview_generation: u64,
    dirty: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            limits,
            visibility: Visibility::Hidden,
            saving: SavingState::Idle,
            enabled: false,
            rotation_text: limits.min_rotation_seconds.to_string(),
            urls_text: String::new(),
            cursor: 0,
            rotation_hint: limits.rotation_hint(),
            url_hint: Hint::info(limits.url_hint()),
            preview: PreviewState::default(),
            preview_generation: 0,
            dirty: false,
        }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel::from_state(self)
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn saving(&self) -> SavingState {
        self.saving
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn rotation_text(&self) -> &str {
        &self.rotation_text
    }

    pub fn urls_text(&self) -> &str {
        &self.urls_text
    }

    /// Caret offset in the URL field, in UTF-16 code units.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn rotation_hint(&self) -> &str {
        &self.rotation_hint
    }

    pub fn url_hint(&self) -> &Hint {
        &self.url_hint
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn preview_generation(&self) -> u64 {
        self.preview_generation
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn apply_open(&mut self, limits: Option<Limits>, settings: OpenSettings) {
        if let Some(limits) = limits {
            self.limits = limits;
        }
        self.enabled = settings.enabled;
        self.rotation_text = settings
            .rotation_seconds
            .map(|value| value.to_string())
            .unwrap_or_else(|| self.limits.min_rotation_seconds.to_string());
        self.urls_text = settings.urls.join("\n");
        self.cursor = utf16_len(&self.urls_text);
        self.rotation_hint = self.limits.rotation_hint();
        self.url_hint = Hint::info(self.limits.url_hint());
        self.saving = SavingState::Idle;
        self.visibility = Visibility::Visible;
        self.mark_dirty();
    }

    pub(crate) fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
        self.saving = SavingState::Idle;
        self.mark_dirty();
    }

    pub(crate) fn set_saving(&mut self, saving: SavingState) {
        self.saving = saving;
        self.mark_dirty();
    }

    pub(crate) fn set_url_hint(&mut self, hint: Hint) {
        self.url_hint = hint;
        self.mark_dirty();
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.mark_dirty();
    }

    pub(crate) fn set_rotation_text(&mut self, text: String) {
        self.rotation_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_urls(&mut self, text: String, cursor: usize) {
        self.urls_text = text;
        self.set_cursor(cursor);
        self.mark_dirty();
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(utf16_len(&self.urls_text));
    }

    pub(crate) fn next_preview_generation(&mut self) -> u64 {
        self.preview_generation += 1;
        self.preview_generation
    }

    pub(crate) fn preview_mut(&mut self) -> &mut PreviewState {
        self.mark_dirty();
        &mut self.preview
    }
}
