mod digits;
mod error;
mod expr;
mod kansuji;
mod keep;
mod options;
mod pipeline;
mod report;
mod utils;
mod width;

pub use digits::convert_digits;
pub use error::{Error, Result};
pub use expr::{DEFAULT_REWRITE_LIMIT, rewrite_expressions};
pub use kansuji::{MAGNITUDE_UNITS, SMALL_UNITS, UnitTable, convert_numerals, evaluate};
pub use keep::{KEEP_PATTERNS, ProtectedSpans};
pub use options::Options;
pub use pipeline::Normalizer;
pub use report::LineReport;
pub use width::{UnicodeWidth, WidthConverter, reduce_digit_runs};

#[cfg(target_arch = "wasm32")]
use wasm_minimal_protocol::*;

#[cfg(target_arch = "wasm32")]
initiate_protocol!();

/// Normalize one line with the default stages.
pub fn normalize_line(line: &str) -> Result<String> {
    Normalizer::new(Options::default()).normalize_line(line)
}

/// Normalize a multi-line text; every output line ends in `\n`.
pub fn normalize_text(text: &str) -> Result<String> {
    Normalizer::new(Options::default()).normalize_text(text)
}

/// Host-side input cleanup: carriage returns are dropped before splitting.
fn host_text(input: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(input)?.replace('\r', ""))
}

/// Byte-level entry point for hosts: normalized text, or
/// `options.failure_marker` if the input is not UTF-8 or any line fails.
pub fn normalize_bytes(input: &[u8], options: Options) -> Vec<u8> {
    let normalizer = Normalizer::new(options);
    host_text(input)
        .and_then(|text| normalizer.normalize_text(&text))
        .unwrap_or_else(|_| normalizer.options().failure_marker.clone())
        .into_bytes()
}

/// Byte-level per-line report as a JSON array of [`LineReport`]; the
/// failure marker when the input is not UTF-8.
pub fn report_bytes(input: &[u8]) -> Vec<u8> {
    let normalizer = Normalizer::default();
    let lines = match host_text(input).and_then(|text| normalizer.report(&text)) {
        Ok(lines) => lines,
        Err(_) => return normalizer.options().failure_marker.clone().into_bytes(),
    };

    serde_json::to_string(&lines)
        .unwrap_or_else(|_| "[]".to_string())
        .into_bytes()
}

/// Byte-level numeral conversion; the default failure marker on error.
pub fn arabic_bytes(input: &[u8], grouped: bool) -> Vec<u8> {
    std::str::from_utf8(input)
        .map_err(Error::from)
        .and_then(|text| convert_numerals(text, grouped))
        .unwrap_or_else(|_| Options::default().failure_marker)
        .into_bytes()
}

/// Input: text bytes, possibly multi-line
/// Output: normalized text, or "Error!" if any line fails
#[cfg(target_arch = "wasm32")]
#[wasm_func]
pub fn normalize(input: &[u8]) -> Vec<u8> {
    normalize_bytes(input, Options::default())
}

/// Input: text bytes, and options as JSON, e.g. b"{\"isolate-lines\": true}"
/// Output: normalized text, or the configured failure marker
#[cfg(target_arch = "wasm32")]
#[wasm_func]
pub fn normalize_with(input: &[u8], options: &[u8]) -> Vec<u8> {
    match Options::from_json(options) {
        Ok(options) => normalize_bytes(input, options),
        Err(_) => Options::default().failure_marker.into_bytes(),
    }
}

/// Input: text bytes
/// Output: JSON array with one {source, normalized, error} object per line
#[cfg(target_arch = "wasm32")]
#[wasm_func]
pub fn report(input: &[u8]) -> Vec<u8> {
    report_bytes(input)
}

/// Input: text bytes, e.g. "二千十五年"
/// Output: every kanji numeral run as Arabic digits, e.g. "2015年"
#[cfg(target_arch = "wasm32")]
#[wasm_func]
pub fn to_arabic(input: &[u8]) -> Vec<u8> {
    arabic_bytes(input, false)
}

/// Input: text bytes, e.g. "一万二千円"
/// Output: Arabic digits with thousands separators, e.g. "12,000円"
#[cfg(target_arch = "wasm32")]
#[wasm_func]
pub fn to_arabic_grouped(input: &[u8]) -> Vec<u8> {
    arabic_bytes(input, true)
}
