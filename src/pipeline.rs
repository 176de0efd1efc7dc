use crate::digits::convert_digits;
use crate::error::Result;
use crate::expr::rewrite_expressions;
use crate::keep::ProtectedSpans;
use crate::options::Options;
use crate::report::LineReport;
use crate::utils::{preprocess, split_lines};
use crate::width::{UnicodeWidth, WidthConverter, reduce_digit_runs};
use tracing::{debug, warn};

/// Runs each line through, in order: expression rewrites, protected-span
/// escape, structural preprocessing, contextual numerals, NFKC and
/// fullwidth widening, digit-run narrowing, protected-span restore.
pub struct Normalizer<W: WidthConverter = UnicodeWidth> {
    options: Options,
    width: W,
}

impl Normalizer<UnicodeWidth> {
    pub fn new(options: Options) -> Self {
        Self::with_converter(options, UnicodeWidth)
    }
}

impl Default for Normalizer<UnicodeWidth> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<W: WidthConverter> Normalizer<W> {
    pub fn with_converter(options: Options, width: W) -> Self {
        Normalizer { options, width }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Normalize a single line with its own placeholder assignment.
    pub fn normalize_line(&self, line: &str) -> Result<String> {
        let keep = ProtectedSpans::standard()?;
        self.run_line(&keep, line)
    }

    /// Normalize every line of `text` and join them with a trailing `\n`
    /// after each, the last included.
    ///
    /// The first failing line fails the whole call unless
    /// [`Options::isolate_lines`] is set, in which case that line is copied
    /// through unchanged.
    pub fn normalize_text(&self, text: &str) -> Result<String> {
        let keep = ProtectedSpans::standard()?;
        let mut out = String::with_capacity(text.len() + text.len() / 2);

        for (lineno, line) in split_lines(text).into_iter().enumerate() {
            match self.run_line(&keep, line) {
                Ok(normalized) => out.push_str(&normalized),
                Err(err) if self.options.isolate_lines => {
                    warn!(lineno, %err, "line left as is");
                    out.push_str(line);
                }
                Err(err) => return Err(err),
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Normalize each line of `text` and record its outcome; a failing
    /// line does not stop the ones after it.
    pub fn report(&self, text: &str) -> Result<Vec<LineReport>> {
        let keep = ProtectedSpans::standard()?;
        Ok(split_lines(text)
            .into_iter()
            .map(|line| match self.run_line(&keep, line) {
                Ok(normalized) => LineReport {
                    source: line.to_string(),
                    normalized: Some(normalized),
                    error: None,
                },
                Err(err) => LineReport {
                    source: line.to_string(),
                    normalized: None,
                    error: Some(err.to_string()),
                },
            })
            .collect())
    }

    fn run_line(&self, keep: &ProtectedSpans, line: &str) -> Result<String> {
        let text = rewrite_expressions(line, self.options.rewrite_limit)?;
        let text = keep.encode(&text);
        let text = preprocess(&text);
        let text = convert_digits(&text)?;
        let text = self.width.compatibility(&text)?;
        let text = self.width.to_fullwidth(&text)?;
        let text = reduce_digit_runs(&text, &self.width)?;
        let text = keep.restore(&text);

        if text != line {
            debug!(before = line, after = %text, "normalized line");
        }
        Ok(text)
    }
}
