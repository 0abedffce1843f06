use panel_logging::{panel_debug, panel_info};

use crate::preview::select_preview_url;
use crate::{
    clamp_rotation, parse_urls, validate_urls, Effect, Hint, HostMessage, Key, Msg, PanelState,
    SaveRequest, SavingState, PREVIEW_DEBOUNCE,
};

const SAVE_FAILED_HINT: &str = "Saving failed. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::Host(HostMessage::Open { limits, settings }) => {
            state.apply_open(limits, settings);
            refresh_preview(&mut state)
        }
        Msg::Host(HostMessage::Close) => {
            state.hide();
            Vec::new()
        }
        Msg::EnabledToggled(enabled) => {
            state.set_enabled(enabled);
            Vec::new()
        }
        Msg::RotationEdited(text) => {
            state.set_rotation_text(text);
            Vec::new()
        }
        Msg::UrlsEdited { text, cursor } => {
            state.set_urls(text, cursor);
            vec![schedule_preview(&mut state)]
        }
        Msg::UrlsCaret { cursor, trigger } => {
            panel_debug!("URL field caret at {} ({:?})", cursor, trigger);
            state.set_cursor(cursor);
            vec![schedule_preview(&mut state)]
        }
        Msg::PreviewRefreshDue { generation } => {
            if generation == state.preview_generation() {
                refresh_preview(&mut state)
            } else {
                panel_debug!(
                    "Dropping stale preview timer {} (current {})",
                    generation,
                    state.preview_generation()
                );
                Vec::new()
            }
        }
        Msg::PreviewImageLoaded {
            url,
            natural_width,
            natural_height,
        } => {
            if !state
                .preview_mut()
                .image_loaded(&url, natural_width, natural_height)
            {
                panel_debug!("Ignoring load report for stale preview {}", url);
            }
            Vec::new()
        }
        Msg::PreviewImageFailed { url } => {
            if !state.preview_mut().image_failed(&url) {
                panel_debug!("Ignoring failure report for stale preview {}", url);
            }
            Vec::new()
        }
        Msg::SaveClicked => save(&mut state),
        Msg::SaveAccepted => {
            // The host decides when to close; stay in Saving until it does.
            panel_debug!("saveSettings accepted by host");
            Vec::new()
        }
        Msg::SaveFailed => {
            state.set_saving(SavingState::Idle);
            state.set_url_hint(Hint::error(SAVE_FAILED_HINT));
            Vec::new()
        }
        Msg::CloseClicked => vec![Effect::PostClose],
        Msg::KeyPressed(Key::Escape) if state.is_visible() => vec![Effect::PostClose],
        Msg::KeyPressed(_) => Vec::new(),
        Msg::CloseFailed => {
            state.hide();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn save(state: &mut PanelState) -> Vec<Effect> {
    if state.saving() == SavingState::Saving {
        panel_debug!("Save already in flight; ignoring click");
        return Vec::new();
    }

    let urls = parse_urls(state.urls_text());
    if let Err(err) = validate_urls(&urls, state.limits()) {
        panel_info!("Save rejected: {:?}", err);
        state.set_url_hint(Hint::error(err.to_string()));
        return Vec::new();
    }

    let rotation_seconds = clamp_rotation(state.rotation_text(), state.limits());
    state.set_saving(SavingState::Saving);
    vec![Effect::PostSaveSettings(SaveRequest {
        enabled: state.enabled(),
        rotation_seconds,
        urls,
    })]
}

fn schedule_preview(state: &mut PanelState) -> Effect {
    Effect::SchedulePreviewRefresh {
        generation: state.next_preview_generation(),
        delay: PREVIEW_DEBOUNCE,
    }
}

fn refresh_preview(state: &mut PanelState) -> Vec<Effect> {
    let selection = select_preview_url(state.urls_text(), state.cursor());
    match state.preview_mut().refresh(selection) {
        Some(url) => vec![Effect::LoadPreviewImage { url }],
        None => Vec::new(),
    }
}
