use crate::error::Result;
use crate::expr::DEFAULT_REWRITE_LIMIT;
use serde::{Deserialize, Serialize};

/// Pipeline settings, readable from the JSON a host passes in.
///
/// ```json
/// { "isolate-lines": true, "rewrite-limit": 64, "failure-marker": "エラー" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Options {
    /// Pass a failing line through unchanged instead of failing the text.
    pub isolate_lines: bool,
    /// Pass cap for each context rewrite rule.
    pub rewrite_limit: usize,
    /// What hosts return in place of output when normalization fails.
    pub failure_marker: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            isolate_lines: false,
            rewrite_limit: DEFAULT_REWRITE_LIMIT,
            failure_marker: "Error!".to_string(),
        }
    }
}

impl Options {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}
