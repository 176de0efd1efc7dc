use serde::Serialize;

/// Outcome of normalizing one line, as handed to hosts.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LineReport {
    pub source: String,
    pub normalized: Option<String>,
    pub error: Option<String>,
}
