use panel_core::Msg;
use tokio::sync::mpsc::UnboundedSender;

/// The thing that actually decodes and shows the preview image.
///
/// Implementations start loading `url` and report the outcome through the
/// reporter, from any thread, whenever it is known.
pub trait PreviewSurface: Send + Sync {
    fn load_image(&self, url: &str, reporter: ImageLoadReporter);
}

/// One-shot callback for a single preview image load.
#[derive(Debug, Clone)]
pub struct ImageLoadReporter {
    url: String,
    tx: UnboundedSender<Msg>,
}

impl ImageLoadReporter {
    pub(crate) fn new(url: impl Into<String>, tx: UnboundedSender<Msg>) -> Self {
        Self {
            url: url.into(),
            tx,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn loaded(self, natural_width: u32, natural_height: u32) {
        let _ = self.tx.send(Msg::PreviewImageLoaded {
            url: self.url,
            natural_width,
            natural_height,
        });
    }

    pub fn failed(self) {
        let _ = self.tx.send(Msg::PreviewImageFailed { url: self.url });
    }
}
