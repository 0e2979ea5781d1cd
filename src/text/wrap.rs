use crate::foundation::error::FxResult;

/// Greedy word wrap against a measured maximum line width.
///
/// Paragraphs are split on `\n` and words on whitespace; runs of whitespace collapse to a single
/// space. A word joins the current line while the measured line stays within `max_width`. When a
/// word does not fit and the rest of its paragraph is at most `trailing_threshold` characters, the
/// rest is kept on the current line instead of starting a short trailing line. A word wider than
/// `max_width` gets a line of its own.
pub fn wrap_words(
    text: &str,
    max_width: f64,
    trailing_threshold: usize,
    measure: &mut dyn FnMut(&str) -> FxResult<f64>,
) -> FxResult<Vec<String>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut i = 0;
        while i < words.len() {
            let word = words[i];
            if line.is_empty() {
                line.push_str(word);
                i += 1;
                continue;
            }

            let candidate = format!("{line} {word}");
            if measure(&candidate)? <= max_width {
                line = candidate;
                i += 1;
                continue;
            }

            if trailing_threshold > 0 {
                let rest = words[i..].join(" ");
                if rest.chars().count() <= trailing_threshold {
                    line.push(' ');
                    line.push_str(&rest);
                    break;
                }
            }

            lines.push(std::mem::take(&mut line));
        }
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
