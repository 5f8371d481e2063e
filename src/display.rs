//! Text helpers shared by the list rows and badges.

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `#001` style dex number.
pub fn dex_number(id: i64) -> String {
    format!("#{:03}", id)
}

/// Greedy word wrap, clamped to `max_lines`; an overflowing last line gets "...".
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.chars().take(width).collect();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = ellipsize(last, width);
        }
    }

    lines
}

fn ellipsize(line: &str, width: usize) -> String {
    if width <= 3 {
        return ".".repeat(width);
    }
    let keep: String = line.chars().take(width - 3).collect();
    format!("{}...", keep.trim_end())
}
