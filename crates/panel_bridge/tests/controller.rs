use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use panel_bridge::{
    HostTransport, ImageLoadReporter, PanelController, PreviewSurface, TransportError,
};
use panel_core::{CaretTrigger, Msg, PreviewStatus, SavingState, Visibility};
use serde_json::{json, Value};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

#[derive(Default)]
struct MockTransport {
    calls: Mutex<Vec<(String, Value)>>,
    gate: Option<Arc<Notify>>,
    fail_with: Option<TransportError>,
}

impl MockTransport {
    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn failing(err: TransportError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    fn calls_to(&self, event: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl HostTransport for MockTransport {
    async fn post_event(&self, event: &str, body: &Value) -> Result<(), TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((event.to_string(), body.clone()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct RecordingSurface {
    requests: Mutex<Vec<ImageLoadReporter>>,
}

impl RecordingSurface {
    fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|reporter| reporter.url().to_string())
            .collect()
    }

    fn take_last(&self) -> ImageLoadReporter {
        self.requests.lock().unwrap().pop().expect("a load request")
    }
}

impl PreviewSurface for RecordingSurface {
    fn load_image(&self, _url: &str, reporter: ImageLoadReporter) {
        self.requests.lock().unwrap().push(reporter);
    }
}

const OPEN: &str = r#"{
    "type": "open",
    "limits": {"minRotationSeconds": 5, "maxRotationSeconds": 600, "maxUrls": 20, "maxUrlLength": 512},
    "settings": {"enabled": true, "rotationSeconds": 30, "urls": ["https://img.example/a.png"]}
}"#;

fn controller(
    transport: Arc<MockTransport>,
    surface: Arc<RecordingSurface>,
) -> PanelController {
    PanelController::new(transport, surface)
}

async fn open(controller: &mut PanelController) {
    assert!(controller.sender().post_host_message(OPEN));
    let msg = controller.next_msg().await.expect("open message");
    controller.dispatch(msg);
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn rapid_double_save_posts_once() {
    init_logging();
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(MockTransport::gated(gate.clone()));
    let mut controller = controller(transport.clone(), Arc::default());
    open(&mut controller).await;

    controller.dispatch(Msg::SaveClicked);
    controller.dispatch(Msg::SaveClicked);
    settle().await;

    let saves = transport.calls_to("saveSettings");
    assert_eq!(saves.len(), 1);
    assert_eq!(
        saves[0],
        json!({"enabled": true, "rotationSeconds": 30, "urls": ["https://img.example/a.png"]})
    );

    gate.notify_one();
    let msg = controller.next_msg().await.expect("save outcome");
    assert_eq!(msg, Msg::SaveAccepted);
    controller.dispatch(msg);
    assert_eq!(controller.state().saving(), SavingState::Saving);
    assert_eq!(controller.state().visibility(), Visibility::Visible);
}

#[tokio::test(start_paused = true)]
async fn failed_save_reverts_to_idle_with_hint() {
    init_logging();
    let transport = Arc::new(MockTransport::failing(TransportError::Status(500)));
    let mut controller = controller(transport, Arc::default());
    open(&mut controller).await;

    controller.dispatch(Msg::SaveClicked);
    let msg = controller.next_msg().await.expect("save outcome");
    assert_eq!(msg, Msg::SaveFailed);

    let view = controller.dispatch(msg).expect("view changed");
    assert_eq!(view.save_button.label, "Save");
    assert!(view.save_button.enabled);
    assert!(view.url_hint.is_error);
    assert_eq!(view.visibility, Visibility::Visible);
}

#[tokio::test(start_paused = true)]
async fn failed_close_hides_locally() {
    init_logging();
    let transport = Arc::new(MockTransport::failing(TransportError::Network(
        "refused".to_string(),
    )));
    let mut controller = controller(transport.clone(), Arc::default());
    open(&mut controller).await;

    controller.dispatch(Msg::CloseClicked);
    let msg = controller.next_msg().await.expect("close outcome");
    assert_eq!(msg, Msg::CloseFailed);
    controller.dispatch(msg);

    assert_eq!(controller.state().visibility(), Visibility::Hidden);
    assert_eq!(transport.calls_to("close"), vec![json!({})]);
}

#[tokio::test(start_paused = true)]
async fn successful_close_waits_for_host() {
    init_logging();
    let transport = Arc::new(MockTransport::default());
    let mut controller = controller(transport.clone(), Arc::default());
    open(&mut controller).await;

    controller.dispatch(Msg::CloseClicked);
    settle().await;
    assert_eq!(transport.calls_to("close").len(), 1);
    assert_eq!(controller.state().visibility(), Visibility::Visible);

    assert!(controller.sender().post_host_message(r#"{"type":"close"}"#));
    let msg = controller.next_msg().await.expect("close message");
    controller.dispatch(msg);
    assert_eq!(controller.state().visibility(), Visibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_recomputes_preview_once() {
    init_logging();
    let surface = Arc::new(RecordingSurface::default());
    let mut controller = controller(Arc::default(), surface.clone());
    open(&mut controller).await;
    assert_eq!(surface.urls(), vec!["https://img.example/a.png"]);

    for i in 0..10 {
        controller.dispatch(Msg::UrlsEdited {
            text: format!("https://img.example/{i}.png"),
            cursor: 3,
        });
        tokio::time::advance(Duration::from_millis(10)).await;
    }

    let msg = controller.next_msg().await.expect("timer");
    assert!(matches!(msg, Msg::PreviewRefreshDue { .. }), "got {msg:?}");
    controller.dispatch(msg);

    assert_eq!(
        surface.urls(),
        vec!["https://img.example/a.png", "https://img.example/9.png"]
    );
    let quiet = tokio::time::timeout(Duration::from_secs(1), controller.next_msg()).await;
    assert!(quiet.is_err(), "unexpected extra message");
}

#[tokio::test(start_paused = true)]
async fn surface_reports_drive_preview_status() {
    init_logging();
    let surface = Arc::new(RecordingSurface::default());
    let mut controller = controller(Arc::default(), surface.clone());
    open(&mut controller).await;
    assert_eq!(controller.state().preview().status(), PreviewStatus::Loading);

    surface.take_last().loaded(320, 200);
    let msg = controller.next_msg().await.expect("load report");
    let view = controller.dispatch(msg).expect("view changed");
    assert_eq!(view.preview.status, PreviewStatus::Loaded);
    assert!(view.preview.image_visible);
}

#[tokio::test(start_paused = true)]
async fn surface_failure_shows_error_and_retries_on_next_refresh() {
    init_logging();
    let surface = Arc::new(RecordingSurface::default());
    let mut controller = controller(Arc::default(), surface.clone());
    open(&mut controller).await;

    surface.take_last().failed();
    let msg = controller.next_msg().await.expect("failure report");
    assert_eq!(
        msg,
        Msg::PreviewImageFailed {
            url: "https://img.example/a.png".to_string()
        }
    );
    let view = controller.dispatch(msg).expect("view changed");
    assert_eq!(view.preview.status, PreviewStatus::Error);
    assert!(!view.preview.image_visible);

    controller.dispatch(Msg::UrlsCaret {
        cursor: 0,
        trigger: CaretTrigger::Focus,
    });
    let msg = controller.next_msg().await.expect("timer");
    assert!(matches!(msg, Msg::PreviewRefreshDue { .. }), "got {msg:?}");
    controller.dispatch(msg);

    assert_eq!(surface.urls(), vec!["https://img.example/a.png"]);
    assert_eq!(controller.state().preview().status(), PreviewStatus::Loading);
}

#[tokio::test(start_paused = true)]
async fn malformed_host_messages_are_dropped() {
    init_logging();
    let controller = controller(Arc::default(), Arc::default());
    let sender = controller.sender();

    assert!(!sender.post_host_message("{}"));
    assert!(!sender.post_host_message(r#"{"type":"teleport"}"#));
    assert!(!sender.post_host_message("not json"));
    assert_eq!(controller.state().visibility(), Visibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn run_renders_until_shutdown() {
    init_logging();
    let controller = controller(Arc::default(), Arc::default());
    let sender = controller.sender();
    let shutdown = CancellationToken::new();
    let renders = Arc::new(Mutex::new(Vec::new()));

    let task = tokio::spawn({
        let shutdown = shutdown.clone();
        let renders = renders.clone();
        controller.run(shutdown, move |view| {
            renders.lock().unwrap().push(view.visibility);
        })
    });

    sender.post_host_message(OPEN);
    settle().await;
    sender.post_host_message(r#"{"type":"close"}"#);
    settle().await;
    shutdown.cancel();
    task.await.expect("controller task");

    assert_eq!(
        *renders.lock().unwrap(),
        vec![Visibility::Hidden, Visibility::Visible, Visibility::Hidden]
    );
}

#[tokio::test(start_paused = true)]
async fn queued_input_is_applied_before_shutdown() {
    init_logging();
    let controller = controller(Arc::default(), Arc::default());
    let sender = controller.sender();
    let shutdown = CancellationToken::new();
    let renders = Arc::new(Mutex::new(Vec::new()));

    assert!(sender.post_host_message(OPEN));
    assert!(sender.send(Msg::EnabledToggled(false)));
    shutdown.cancel();

    let renders_in_task = renders.clone();
    controller
        .run(shutdown, move |view| {
            renders_in_task
                .lock()
                .unwrap()
                .push((view.visibility, view.enabled));
        })
        .await;

    assert_eq!(
        *renders.lock().unwrap(),
        vec![
            (Visibility::Hidden, false),
            (Visibility::Visible, true),
            (Visibility::Visible, false),
        ]
    );
}
