//! Locating the proposal object inside collaborator output.
//!
//! Proposals often arrive from an LLM step, wrapped in a fenced code block or
//! surrounded by prose. Extraction is brace-aware so nested arrays and braces
//! inside string literals don't end the object early.

/// Return the JSON object text embedded in `text`.
///
/// Tries a ```` ```json ```` fence, then a bare fence whose content starts
/// with `{`, then the first balanced `{...}` that parses. Falls back to the
/// trimmed input so the caller's parse error points at the real content.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(inner) = fenced(trimmed, "```json") {
        return inner;
    }

    if let Some(inner) = fenced(trimmed, "```")
        && inner.starts_with('{')
    {
        return inner;
    }

    trimmed
        .match_indices('{')
        .filter_map(|(start, _)| balanced_object(&trimmed[start..]))
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
        .unwrap_or(trimmed)
}

fn fenced<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let start = text.find(opener)? + opener.len();
    let len = text[start..].find("```")?;
    Some(text[start..start + len].trim())
}

/// Prefix of `text` (which starts at `{`) up to its matching `}`.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}
