pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Collapse newlines and runs of whitespace into single spaces
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate or pad to exactly `width` characters
pub fn fit(text: &str, width: usize) -> String {
    let text = truncate(&single_line(text), width);
    format!("{:<width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate("character", 5), "char…");
        assert_eq!(truncate("short", 5), "short");
    }

    #[test]
    fn test_fit_pads_and_flattens() {
        assert_eq!(fit("a\nb", 5), "a b  ");
        assert_eq!(fit("longer name", 6), "longe…");
    }
}
