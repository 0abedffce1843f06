use crate::{is_valid_http_url, parse_urls};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewStatus {
    #[default]
    None,
    Loading,
    Loaded,
    Error,
}

/// What the rendering surface last reported about the preview image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSurface {
    pub source: Option<String>,
    pub complete: bool,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl ImageSurface {
    fn loading(url: &str) -> Self {
        Self {
            source: Some(url.to_string()),
            ..Self::default()
        }
    }

    fn has_decoded_image(&self) -> bool {
        self.complete && self.natural_width > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewState {
    selected_url: Option<String>,
    status: PreviewStatus,
    last_attempted: Option<String>,
    image: ImageSurface,
}

impl PreviewState {
    pub fn selected_url(&self) -> Option<&str> {
        self.selected_url.as_deref()
    }

    pub fn status(&self) -> PreviewStatus {
        self.status
    }

    pub fn last_attempted(&self) -> Option<&str> {
        self.last_attempted.as_deref()
    }

    pub fn image(&self) -> &ImageSurface {
        &self.image
    }

    /// Applies a freshly resolved selection. Returns the URL the surface
    /// should start loading, if any.
    pub(crate) fn refresh(&mut self, selection: Option<String>) -> Option<String> {
        let Some(url) = selection.filter(|url| is_valid_http_url(url)) else {
            self.selected_url = None;
            self.status = PreviewStatus::None;
            self.last_attempted = None;
            return None;
        };

        if self.last_attempted.as_deref() != Some(url.as_str()) {
            self.image = ImageSurface::loading(&url);
            self.status = PreviewStatus::Loading;
            self.last_attempted = Some(url.clone());
            self.selected_url = Some(url.clone());
            return Some(url);
        }

        if self.image.has_decoded_image() {
            self.status = PreviewStatus::Loaded;
        }
        self.selected_url = Some(url);
        None
    }

    /// Returns false when the report is for an image that is no longer the
    /// current source.
    pub(crate) fn image_loaded(&mut self, url: &str, width: u32, height: u32) -> bool {
        if self.image.source.as_deref() != Some(url) {
            return false;
        }
        self.image.complete = true;
        self.image.natural_width = width;
        self.image.natural_height = height;
        if self.last_attempted.as_deref() == Some(url) {
            self.status = PreviewStatus::Loaded;
        }
        true
    }

    pub(crate) fn image_failed(&mut self, url: &str) -> bool {
        if self.image.source.as_deref() != Some(url) {
            return false;
        }
        self.image.complete = true;
        self.image.natural_width = 0;
        self.image.natural_height = 0;
        if self.last_attempted.as_deref() == Some(url) {
            self.status = PreviewStatus::Error;
            self.last_attempted = None;
        }
        true
    }
}

/// The trimmed line under the caret. `cursor` is a UTF-16 offset.
pub fn current_line(text: &str, cursor: usize) -> &str {
    let mut offset = 0;
    let line_index = text
        .chars()
        .take_while(|ch| {
            let before = offset;
            offset += ch.len_utf16();
            before < cursor
        })
        .filter(|ch| *ch == '\n')
        .count();
    text.split('\n').nth(line_index).unwrap_or("").trim()
}

/// The URL the preview should show: the current line, or the first parsed
/// URL when the current line is blank.
pub fn select_preview_url(text: &str, cursor: usize) -> Option<String> {
    let line = current_line(text, cursor);
    if !line.is_empty() {
        return Some(line.to_string());
    }
    parse_urls(text).into_iter().next()
}
