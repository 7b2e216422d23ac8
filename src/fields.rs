use crate::scanner::{Event, Scanner};

pub const QUOTE_CHARS: [char; 3] = ['\'', '"', '`'];

/// Splits a values list on top-level commas.
///
/// Commas inside quoted strings, `[...]` or `(...)` are kept in the field.
/// Each field is trimmed and keeps its quotes; a blank trailing field is
/// dropped.
pub fn split_fields(statement: &str) -> Vec<&str> {
    let mut fields = vec![];
    let mut field_start = 0;
    let mut scanner = Scanner::new(statement);

    while let Some(event) = scanner.next_event() {
        if event == Event::Comma && scanner.is_top_level() {
            let comma = scanner.position() - 1;
            fields.push(statement[field_start..comma].trim());
            field_start = scanner.position();
        }
    }

    let trailing = statement[field_start..].trim();
    if !trailing.is_empty() {
        fields.push(trailing);
    }
    fields
}

/// Turns a raw SQL literal into plain text.
///
/// Strips the outermost run of quote characters on each side, then unescapes
/// `\'`, `\"` and `\\` (in this order) and trims.
pub fn clean_string(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(QUOTE_CHARS)
        .trim_end_matches(QUOTE_CHARS)
        .replace("\\'", "'")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
        .trim()
        .to_owned()
}

/// Lenient number parse of a calorie field: the longest numeric prefix of the
/// cleaned value, or `0.0`.
pub fn parse_calories(raw: &str) -> f64 {
    let cleaned = clean_string(raw);
    let numeric_end = cleaned
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .map(|(idx, _)| idx)
        .unwrap_or(cleaned.len());
    let candidate = &cleaned[..numeric_end];

    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
