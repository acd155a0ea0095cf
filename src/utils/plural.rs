//! Counted nouns for log lines.

/// Format a count with its noun: `1 file`, `3 files`, `2 matches`.
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = match count {
        1 => "",
        _ if noun.ends_with(['s', 'x']) || noun.ends_with("ch") || noun.ends_with("sh") => "es",
        _ => "s",
    };
    format!("{count} {noun}{suffix}")
}
