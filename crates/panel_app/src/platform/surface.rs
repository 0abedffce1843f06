use panel_bridge::{ImageLoadReporter, PreviewSurface};
use panel_logging::panel_info;

/// A terminal cannot decode images. Load requests are announced and their
/// outcome is expected as a scripted `imageLoaded`/`imageFailed` input line.
#[derive(Debug, Default)]
pub struct TerminalSurface;

impl PreviewSurface for TerminalSurface {
    fn load_image(&self, url: &str, _reporter: ImageLoadReporter) {
        panel_info!("Preview image requested: {}", url);
    }
}
