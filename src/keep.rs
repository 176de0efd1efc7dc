use crate::error::{Error, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

const PLACEHOLDER_START: u32 = 0xE000;
const PLACEHOLDER_END: u32 = 0xF8FF;

/// Quotes, ideographic comma and stop, ellipses, both tildes, then the
/// enclosed alphanumerics block (① .. ⓿).
pub static KEEP_PATTERNS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut patterns: Vec<String> = ["“", "”", "、", "。", "‥", "…", "\u{FF5E}", "\u{301C}"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    patterns.extend(('\u{2460}'..='\u{24FF}').map(String::from));
    patterns
});

/// One placeholder assignment, meant to live for a single pipeline call.
///
/// Pattern `i` is swapped for the private-use codepoint U+E000 + `i`. A
/// placeholder already present in the input is restored to its pattern too,
/// so input carrying U+E000.. characters is not supported.
pub struct ProtectedSpans {
    patterns: Vec<String>,
    placeholders: Vec<String>,
    encoder: AhoCorasick,
    decoder: AhoCorasick,
}

impl ProtectedSpans {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        let placeholders = patterns
            .iter()
            .enumerate()
            .map(|(i, _)| {
                u32::try_from(i)
                    .ok()
                    .and_then(|i| PLACEHOLDER_START.checked_add(i))
                    .filter(|&cp| cp <= PLACEHOLDER_END)
                    .and_then(char::from_u32)
                    .map(String::from)
                    .ok_or(Error::TooManyProtectedPatterns(patterns.len()))
            })
            .collect::<Result<Vec<String>>>()?;

        let encoder = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(&patterns)?;
        let decoder = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(&placeholders)?;

        Ok(Self {
            patterns,
            placeholders,
            encoder,
            decoder,
        })
    }

    /// A codec over the built-in [`KEEP_PATTERNS`].
    pub fn standard() -> Result<Self> {
        Self::new(KEEP_PATTERNS.as_slice())
    }

    pub fn encode(&self, text: &str) -> String {
        self.encoder.replace_all(text, &self.placeholders)
    }

    pub fn restore(&self, text: &str) -> String {
        self.decoder.replace_all(text, &self.patterns)
    }
}
