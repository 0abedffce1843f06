use std::collections::HashSet;

use crate::Limits;

/// Reasons a save attempt is rejected. The `Display` text is the hint shown
/// under the URL field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter at least one valid URL.")]
    Empty,
    #[error("Too many URLs. Maximum: {max}")]
    TooMany { max: usize, actual: usize },
    #[error("URL too long (max {max} characters).")]
    TooLong { max: usize, url: String },
    #[error("All URLs must be valid http:// or https:// addresses.")]
    InvalidScheme { url: String },
}

/// Splits the URL field into candidate URLs: one per line, trimmed, blank
/// lines dropped, duplicates removed keeping the first occurrence.
pub fn parse_urls(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(ToOwned::to_owned)
        .collect()
}

/// Length of `text` in UTF-16 code units, the unit the host uses for field
/// lengths and caret offsets.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Inverse of [`parse_urls`] for an already parsed list.
pub fn serialize_urls(urls: &[String]) -> String {
    urls.join("\n")
}

pub fn is_valid_http_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Checks a parsed URL list against the host limits. Stops at the first
/// problem; the order of checks is fixed.
pub fn validate_urls(urls: &[String], limits: &Limits) -> Result<(), ValidationError> {
    if urls.is_empty() {
        return Err(ValidationError::Empty);
    }
    if urls.len() > limits.max_urls {
        return Err(ValidationError::TooMany {
            max: limits.max_urls,
            actual: urls.len(),
        });
    }
    for url in urls {
        if utf16_len(url) > limits.max_url_length {
            return Err(ValidationError::TooLong {
                max: limits.max_url_length,
                url: url.clone(),
            });
        }
        if !is_valid_http_url(url) {
            return Err(ValidationError::InvalidScheme { url: url.clone() });
        }
    }
    Ok(())
}

/// Reads the rotation field leniently and coerces it into the allowed range.
///
/// The text is read as a host number: empty means zero, `Infinity` is
/// accepted, and `0x`/`0o`/`0b` prefixes select a radix. Zero and
/// non-numeric input count as the minimum. Fractions are floored. Never fails.
pub fn clamp_rotation(raw: &str, limits: &Limits) -> u32 {
    let min = f64::from(limits.min_rotation_seconds);
    let max = f64::from(limits.max_rotation_seconds);
    let value = parse_number(raw);
    let value = if value.is_nan() || value == 0.0 {
        min
    } else {
        value.floor()
    };
    value.min(max).max(min) as u32
}

/// Numeric reading of form text. Unparseable input is NaN.
fn parse_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc: f64, ch| {
                ch.to_digit(radix)
                    .map(|digit| acc * f64::from(radix) + f64::from(digit))
            })
            .unwrap_or(f64::NAN);
    }
    let lowered = text.to_ascii_lowercase();
    if lowered.contains("inf") || lowered.contains("nan") {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}
