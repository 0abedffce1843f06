use panel_core::{PanelViewModel, Visibility};

/// Renders the panel as plain text lines for the terminal.
pub fn render(view: &PanelViewModel) -> Vec<String> {
    if view.visibility == Visibility::Hidden {
        return vec!["[panel hidden]".to_string()];
    }

    let mut lines = Vec::new();
    lines.push("[panel]".to_string());
    lines.push(format!(
        "  enabled: [{}]",
        if view.enabled { "x" } else { " " }
    ));
    lines.push(format!(
        "  rotation: {} (min {}, max {}, step {}) | {}",
        view.rotation.text, view.rotation.min, view.rotation.max, view.rotation.step, view.rotation.hint
    ));
    lines.push("  urls:".to_string());
    for line in view.urls_text.split('\n') {
        lines.push(format!("    | {line}"));
    }
    let hint_prefix = if view.url_hint.is_error { "error" } else { "hint" };
    lines.push(format!("  {hint_prefix}: {}", view.url_hint.text));

    let preview_body = match view.preview.placeholder {
        Some(placeholder) => placeholder.to_string(),
        None => format!(
            "<image {}>",
            view.preview.image_source.as_deref().unwrap_or_default()
        ),
    };
    lines.push(format!("  preview: {} | {}", view.preview.label, preview_body));

    let save = if view.save_button.enabled {
        format!("[{}]", view.save_button.label)
    } else {
        format!("({})", view.save_button.label)
    };
    lines.push(format!("  {save} [Close]"));
    lines
}
