use crate::error::Result;
use crate::utils::{FULLWIDTH_OFFSET, is_fullwidth_digit};
use unicode_normalization::UnicodeNormalization;

/// Compatibility and width conversion used by the pipeline.
///
/// Implementations must be pure: the same input always gives the same
/// output, with no locale or other ambient state involved.
pub trait WidthConverter {
    /// Unicode compatibility normalization (NFKC).
    fn compatibility(&self, text: &str) -> Result<String>;

    /// Half-width → full-width for digits, ASCII letters and ASCII symbols.
    fn to_fullwidth(&self, text: &str) -> Result<String>;

    /// Full-width → half-width for the digits ０-９ only.
    fn to_halfwidth_digits(&self, text: &str) -> Result<String>;
}

/// [`WidthConverter`] backed by `unicode-normalization` and the fixed
/// U+FEE0 offset between ASCII and the fullwidth forms block.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeWidth;

impl WidthConverter for UnicodeWidth {
    fn compatibility(&self, text: &str) -> Result<String> {
        Ok(text.nfkc().collect())
    }

    fn to_fullwidth(&self, text: &str) -> Result<String> {
        Ok(text
            .chars()
            .map(|ch| match ch {
                ' ' => '\u{3000}',
                '!'..='~' => char::from_u32(ch as u32 + FULLWIDTH_OFFSET).unwrap_or(ch),
                _ => ch,
            })
            .collect())
    }

    fn to_halfwidth_digits(&self, text: &str) -> Result<String> {
        Ok(text
            .chars()
            .map(|ch| {
                if is_fullwidth_digit(ch) {
                    char::from_u32(ch as u32 - FULLWIDTH_OFFSET).unwrap_or(ch)
                } else {
                    ch
                }
            })
            .collect())
    }
}

/// Turn every run of two or three fullwidth digits back to half-width.
///
/// A run is maximal, so it is bounded by a non-digit or a line edge on
/// both sides. Single digits and runs of four or more keep their width.
pub fn reduce_digit_runs<W: WidthConverter + ?Sized>(line: &str, width: &W) -> Result<String> {
    let mut out = String::with_capacity(line.len());
    let mut run = String::new();

    for ch in line.chars() {
        if is_fullwidth_digit(ch) {
            run.push(ch);
        } else {
            flush_run(&mut out, &mut run, width)?;
            out.push(ch);
        }
    }
    flush_run(&mut out, &mut run, width)?;

    Ok(out)
}

fn flush_run<W: WidthConverter + ?Sized>(out: &mut String, run: &mut String, width: &W) -> Result<()> {
    if (2..=3).contains(&run.chars().count()) {
        out.push_str(&width.to_halfwidth_digits(run)?);
    } else {
        out.push_str(run);
    }
    run.clear();
    Ok(())
}
