use crate::{Hint, PanelState, PreviewStatus, SavingState, Visibility};

const NO_SELECTION_LABEL: &str = "No URL selected";
const NO_SELECTION_PLACEHOLDER: &str = "No valid image URL on the current line.";
const LOADING_PLACEHOLDER: &str = "Loading preview...";
const ERROR_PLACEHOLDER: &str = "Preview could not be loaded (not a direct image or blocked URL).";
const SAVE_LABEL: &str = "Save";
const SAVING_LABEL: &str = "Saving...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelViewModel {
    pub visibility: Visibility,
    pub enabled: bool,
    pub rotation: RotationFieldView,
    pub urls_text: String,
    pub url_hint: Hint,
    pub save_button: ButtonView,
    pub preview: PreviewView,
}

/// Rotation input with its native min/max/step attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationFieldView {
    pub text: String,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub status: PreviewStatus,
    pub label: String,
    /// `None` when the image itself is shown.
    pub placeholder: Option<&'static str>,
    pub image_source: Option<String>,
    pub image_visible: bool,
}

impl PanelViewModel {
    pub(crate) fn from_state(state: &PanelState) -> Self {
        let limits = state.limits();
        let saving = state.saving() == SavingState::Saving;
        Self {
            visibility: state.visibility(),
            enabled: state.enabled(),
            rotation: RotationFieldView {
                text: state.rotation_text().to_string(),
                min: limits.min_rotation_seconds,
                max: limits.max_rotation_seconds,
                step: 1,
                hint: state.rotation_hint().to_string(),
            },
            urls_text: state.urls_text().to_string(),
            url_hint: state.url_hint().clone(),
            save_button: ButtonView {
                label: if saving { SAVING_LABEL } else { SAVE_LABEL },
                enabled: !saving,
            },
            preview: preview_view(state),
        }
    }
}

fn preview_view(state: &PanelState) -> PreviewView {
    let preview = state.preview();
    let label = preview
        .selected_url()
        .unwrap_or(NO_SELECTION_LABEL)
        .to_string();
    let placeholder = match preview.status() {
        PreviewStatus::None => Some(NO_SELECTION_PLACEHOLDER),
        PreviewStatus::Loading => Some(LOADING_PLACEHOLDER),
        PreviewStatus::Loaded => None,
        PreviewStatus::Error => Some(ERROR_PLACEHOLDER),
    };
    PreviewView {
        status: preview.status(),
        label,
        placeholder,
        image_source: preview.image().source.clone(),
        image_visible: placeholder.is_none(),
    }
}
