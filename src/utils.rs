/// True for the fullwidth digits ０..=９ (U+FF10..=U+FF19).
pub fn is_fullwidth_digit(ch: char) -> bool {
    matches!(ch, '\u{FF10}'..='\u{FF19}')
}

/// Offset between a printable ASCII character and its fullwidth form.
/// Applies to U+0021..=U+007E ↔ U+FF01..=U+FF5E.
pub const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Line terminators: LF, VT, FF, CR, the C0 separators FS/GS/RS, NEL and
/// the Unicode line and paragraph separators.
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{1C}'..='\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` on every [`is_line_break`] terminator, `\r\n` counting as
/// one. A trailing terminator does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + ch.len_utf8();
        if ch == '\r' && chars.next_if(|&(_, c)| c == '\n').is_some() {
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Convert ASCII parentheses to fullwidth and drop every comma sitting
/// between two ASCII digits, e.g. "1,234,567 (税込)" → "1234567 （税込）".
pub fn preprocess(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());

    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '(' => out.push('（'),
            ')' => out.push('）'),
            ',' if i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()) => {}
            _ => out.push(ch),
        }
    }
    out
}
