//! Label wrapping for node display text
//!
//! Splits a label into lines at word boundaries; words longer than the
//! line limit are sliced into limit-sized segments. The trailing segment
//! of a sliced word stays open so following words can join its line.

/// Default line limit, in characters
pub const DEFAULT_MAX_CHARS: usize = 20;

/// Wrap a label into display lines no longer than `max_chars`
pub fn wrap_label(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut index = 0;
            while index < chars.len() {
                let end = (index + max_chars).min(chars.len());
                let segment: String = chars[index..end].iter().collect();
                index = end;
                if segment.chars().count() == max_chars && index < chars.len() {
                    lines.push(segment);
                } else {
                    current = segment;
                }
            }
            continue;
        }

        let fits = if current.is_empty() {
            word_len <= max_chars
        } else {
            current.chars().count() + 1 + word_len <= max_chars
        };

        if fits {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
