//! Text normalization for the name-resolution pipeline.

/// Canonicalizes raw text: lowercase, trim, collapse whitespace/control runs
/// to a single space, strip punctuation other than `# ( ) ,` and
/// alphanumerics, and convert `-`/`_` runs to a single space.
///
/// Total and non-failing; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for ch in lowered.chars() {
        let kept = match ch {
            'a'..='z' | '0'..='9' | '#' | '(' | ')' | ',' => Some(ch),
            // Hyphens and underscores act as word separators.
            _ => None,
        };
        match kept {
            Some(c) => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            }
            None => pending_space = true,
        }
    }
    out
}
