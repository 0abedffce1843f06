//! Panel bridge: runs the core state machine against a host transport,
//! a debounce timer and a preview rendering surface.
mod controller;
mod debounce;
mod surface;
mod transport;

pub use controller::{PanelController, PanelSender};
pub use debounce::Debouncer;
pub use surface::{ImageLoadReporter, PreviewSurface};
pub use transport::{
    HostTransport, ReqwestTransport, TransportError, TransportSettings, JSON_CONTENT_TYPE,
};
