use std::sync::Arc;

use panel_core::{
    parse_host_message, update, Effect, Msg, PanelState, PanelViewModel, CLOSE_EVENT,
    SAVE_SETTINGS_EVENT,
};
use panel_logging::{panel_debug, panel_error, panel_info, panel_warn};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{Debouncer, HostTransport, ImageLoadReporter, PreviewSurface};

/// Cloneable entry point for feeding messages to a [`PanelController`].
#[derive(Debug, Clone)]
pub struct PanelSender {
    tx: mpsc::UnboundedSender<Msg>,
}

impl PanelSender {
    /// Returns false once the controller is gone.
    pub fn send(&self, msg: Msg) -> bool {
        self.tx.send(msg).is_ok()
    }

    /// Forwards a raw host message. Anything unrecognised is dropped.
    pub fn post_host_message(&self, raw: &str) -> bool {
        match parse_host_message(raw) {
            Some(message) => self.send(Msg::Host(message)),
            None => false,
        }
    }
}

/// Owns the panel state and executes the effects produced by
/// [`panel_core::update`]. Messages are applied strictly one at a time.
///
/// `dispatch` spawns Tokio tasks and must run inside a Tokio runtime.
pub struct PanelController {
    state: PanelState,
    transport: Arc<dyn HostTransport>,
    surface: Arc<dyn PreviewSurface>,
    debouncer: Debouncer,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
}

impl PanelController {
    pub fn new(transport: Arc<dyn HostTransport>, surface: Arc<dyn PreviewSurface>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            state: PanelState::new(),
            transport,
            surface,
            debouncer: Debouncer::new(),
            msg_tx,
            msg_rx,
        }
    }

    pub fn sender(&self) -> PanelSender {
        PanelSender {
            tx: self.msg_tx.clone(),
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn view(&self) -> PanelViewModel {
        self.state.view()
    }

    /// Waits for the next queued message (user input, host message, timer
    /// or request outcome).
    pub async fn next_msg(&mut self) -> Option<Msg> {
        self.msg_rx.recv().await
    }

    /// Applies one message and starts its effects. Returns the new view when
    /// anything visible changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<PanelViewModel> {
        panel_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
        if self.state.consume_dirty() {
            Some(self.state.view())
        } else {
            None
        }
    }

    /// Processes messages until `shutdown` is cancelled, calling `render`
    /// after every visible change. Messages already queued when shutdown
    /// fires are still applied.
    pub async fn run<F>(mut self, shutdown: CancellationToken, mut render: F)
    where
        F: FnMut(&PanelViewModel),
    {
        render(&self.state.view());
        loop {
            let msg = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                msg = self.msg_rx.recv() => msg,
            };
            let Some(msg) = msg else {
                break;
            };
            if let Some(view) = self.dispatch(msg) {
                render(&view);
            }
        }

        let mut drained = 0usize;
        while let Ok(msg) = self.msg_rx.try_recv() {
            drained += 1;
            if let Some(view) = self.dispatch(msg) {
                render(&view);
            }
        }
        panel_info!("Panel controller stopped ({} queued messages drained)", drained);
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PostSaveSettings(request) => {
                let body = match serde_json::to_value(&request) {
                    Ok(body) => body,
                    Err(err) => {
                        panel_error!("Could not encode saveSettings body: {}", err);
                        let _ = self.msg_tx.send(Msg::SaveFailed);
                        return;
                    }
                };
                panel_info!(
                    "saveSettings enabled={} rotation={} url_count={}",
                    request.enabled,
                    request.rotation_seconds,
                    request.urls.len()
                );
                self.post(SAVE_SETTINGS_EVENT, body, Some(Msg::SaveAccepted), Msg::SaveFailed);
            }
            Effect::PostClose => {
                self.post(CLOSE_EVENT, json!({}), None, Msg::CloseFailed);
            }
            Effect::SchedulePreviewRefresh { generation, delay } => {
                self.debouncer.schedule(
                    delay,
                    Msg::PreviewRefreshDue { generation },
                    self.msg_tx.clone(),
                );
            }
            Effect::LoadPreviewImage { url } => {
                panel_debug!("Loading preview image {}", url);
                let reporter = ImageLoadReporter::new(url.as_str(), self.msg_tx.clone());
                self.surface.load_image(&url, reporter);
            }
        }
    }

    fn post(&self, event: &'static str, body: Value, on_success: Option<Msg>, on_failure: Msg) {
        let transport = self.transport.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let outcome = match transport.post_event(event, &body).await {
                Ok(()) => on_success,
                Err(err) => {
                    panel_warn!("{} request failed: {}", event, err);
                    Some(on_failure)
                }
            };
            if let Some(msg) = outcome {
                let _ = tx.send(msg);
            }
        });
    }
}
