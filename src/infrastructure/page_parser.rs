// Guest-count extraction from the shared status page
//
// The page nests each count near its pool's label in markup that is not
// fixed but locally predictable (a nearby sibling cell). Policy: find the
// label case-insensitively, strip tags from a bounded window of markup
// after it, and take the first run of digits in the remaining text.
use thiserror::Error;

/// Bytes of markup after the label that are searched for a count.
pub const SEARCH_WINDOW: usize = 240;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("label {label:?} not found in page")]
    LabelNotFound { label: String },
    #[error("no guest count within {window} bytes after label {label:?}")]
    ValueNotFound { label: String, window: usize },
}

/// Locate `label` in `body` and return the guest count nearest after it.
pub fn extract_count(body: &str, label: &str) -> Result<u32, ExtractError> {
    let haystack = ascii_lower(body);
    let needle = ascii_lower(label);
    let at = haystack.find(&needle).ok_or_else(|| ExtractError::LabelNotFound {
        label: label.to_string(),
    })?;

    // ascii_lower preserves byte length, so offsets map back to `body`.
    let start = at + needle.len();
    let mut end = (start + SEARCH_WINDOW).min(body.len());
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    let text = strip_tags(&body[start..end]);
    let not_found = || ExtractError::ValueNotFound {
        label: label.to_string(),
        window: SEARCH_WINDOW,
    };
    let digits = first_digit_run(&text).ok_or_else(not_found)?;
    digits.parse::<u32>().map_err(|_| not_found())
}

/// Lowercase ASCII only, leaving other characters (and byte offsets) intact.
fn ascii_lower(s: &str) -> String {
    s.chars().map(|c| c.to_ascii_lowercase()).collect()
}

/// Drop everything between '<' and '>' so digits inside tag attributes
/// never count as a reading.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
