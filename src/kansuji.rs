use crate::error::{Error, Result};
use crate::utils::{FULLWIDTH_OFFSET, is_fullwidth_digit};
use once_cell::sync::Lazy;
use regex::Regex;

/// Plain digit glyphs and their ASCII replacements.
const DIGIT_GLYPHS: &[(char, char)] = &[
    ('〇', '0'),
    ('一', '1'),
    ('二', '2'),
    ('三', '3'),
    ('四', '4'),
    ('五', '5'),
    ('六', '6'),
    ('七', '7'),
    ('八', '8'),
    ('九', '9'),
    ('壱', '1'),
    ('弐', '2'),
    ('参', '3'),
];

/// A set of unit glyphs with their multipliers. `inner` is the table used
/// to resolve a segment between two units when it is not plain decimal.
pub struct UnitTable {
    units: &'static [(char, u64)],
    inner: Option<&'static UnitTable>,
}

impl UnitTable {
    fn multiplier(&self, ch: char) -> Option<u64> {
        self.units.iter().find(|(u, _)| *u == ch).map(|&(_, m)| m)
    }
}

pub static SMALL_UNITS: UnitTable = UnitTable {
    units: &[('十', 10), ('拾', 10), ('百', 100), ('千', 1000)],
    inner: None,
};

pub static MAGNITUDE_UNITS: UnitTable = UnitTable {
    units: &[
        ('万', 10_000),
        ('億', 100_000_000),
        ('兆', 1_000_000_000_000),
    ],
    inner: Some(&SMALL_UNITS),
};

static NUMERAL_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[十拾百千万億兆0-9０-９]+").expect("numeral run pattern"));

/// True when `s` is made of ASCII or fullwidth decimal digits only.
fn is_decimal(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || is_fullwidth_digit(c))
}

enum Piece<'a> {
    Unit(u64),
    Segment(&'a str),
}

/// Split `run` into unit glyphs of `table` and the maximal stretches between them.
fn pieces<'a>(run: &'a str, table: &UnitTable) -> Vec<Piece<'a>> {
    let mut out = Vec::new();
    let mut start = None;

    for (i, ch) in run.char_indices() {
        match table.multiplier(ch) {
            Some(m) => {
                if let Some(s) = start.take() {
                    out.push(Piece::Segment(&run[s..i]));
                }
                out.push(Piece::Unit(m));
            }
            None if start.is_none() => start = Some(i),
            None => {}
        }
    }
    if let Some(s) = start {
        out.push(Piece::Segment(&run[s..]));
    }
    out
}

fn malformed(run: &str, reason: &'static str) -> Error {
    Error::MalformedNumeralRun {
        run: run.to_string(),
        reason,
    }
}

/// Resolve a run containing only decimal digits and unit glyphs.
///
/// Pieces are scanned right to left. A unit token first flushes any pending
/// unit (so 千 alone or 十 in 二千十 counts as one of itself), then becomes
/// the multiplier for the next numeric piece.
pub fn evaluate(run: &str, table: &UnitTable) -> Result<u64> {
    let overflow = || malformed(run, "value exceeds u64");
    let mut unit: u64 = 1;
    let mut result: u64 = 0;

    for piece in pieces(run, table).into_iter().rev() {
        match piece {
            Piece::Unit(m) => {
                if unit > 1 {
                    result = result.checked_add(unit).ok_or_else(overflow)?;
                }
                unit = m;
            }
            Piece::Segment(seg) => {
                let value = segment_value(seg, table)?;
                let scaled = value.checked_mul(unit).ok_or_else(overflow)?;
                result = result.checked_add(scaled).ok_or_else(overflow)?;
                unit = 1;
            }
        }
    }

    if unit > 1 {
        result = result.checked_add(unit).ok_or_else(overflow)?;
    }
    Ok(result)
}

fn segment_value(seg: &str, table: &UnitTable) -> Result<u64> {
    if is_decimal(seg) {
        let ascii: String = seg
            .chars()
            .map(|c| {
                if is_fullwidth_digit(c) {
                    char::from_u32(c as u32 - FULLWIDTH_OFFSET).unwrap_or(c)
                } else {
                    c
                }
            })
            .collect();
        return ascii
            .parse()
            .map_err(|_| malformed(seg, "digit sequence exceeds u64"));
    }
    match table.inner {
        Some(inner) => evaluate(seg, inner),
        None => Err(malformed(seg, "unexpected glyph in segment")),
    }
}

/// Format `value` with a comma every three digits: 12000 → "12,000".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Replace every kanji numeral run in `text` with its Arabic value.
///
/// Digit glyphs outside runs are transliterated too, so "三三五五" becomes
/// "3355" here; callers that want context sensitivity go through
/// [`crate::digits::convert_digits`].
pub fn convert_numerals(text: &str, grouped: bool) -> Result<String> {
    let mut out: String = text
        .chars()
        .map(|ch| {
            DIGIT_GLYPHS
                .iter()
                .find(|(k, _)| *k == ch)
                .map_or(ch, |&(_, a)| a)
        })
        .collect();

    let mut runs: Vec<String> = NUMERAL_RUN
        .find_iter(&out)
        .map(|m| m.as_str().to_string())
        .collect();
    // longest first so 二十 inside 百二十 is never rewritten on its own
    runs.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    runs.dedup();

    for run in runs {
        if is_decimal(&run) {
            continue;
        }
        let value = evaluate(&run, &MAGNITUDE_UNITS)?;
        let arabic = if grouped {
            group_thousands(value)
        } else {
            value.to_string()
        };
        out = out.replace(&run, &arabic);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_values() {
        let cases = [
            ("十", "10"),
            ("拾", "10"),
            ("百二十三", "123"),
            ("二千十五", "2015"),
            ("千", "1000"),
            ("一万", "10000"),
            ("万", "10000"),
            ("十万", "100000"),
            ("三億二千万五", "320000005"),
            ("一兆", "1000000000000"),
            ("壱万弐千参百", "12300"),
            ("二〇一五", "2015"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                convert_numerals(input, false).unwrap(),
                expected,
                "converting {:?}",
                input
            );
        }
    }

    #[test]
    fn test_grouped() {
        assert_eq!(convert_numerals("一万二千", true).unwrap(), "12,000");
        assert_eq!(convert_numerals("百", true).unwrap(), "100");
        assert_eq!(convert_numerals("百万", true).unwrap(), "1,000,000");
    }

    #[test]
    fn test_runs_inside_text() {
        assert_eq!(convert_numerals("の三年", false).unwrap(), "の3年");
        assert_eq!(
            convert_numerals("十二月二十五日", false).unwrap(),
            "12月25日"
        );
        // the longer run is resolved before the nested shorter one
        assert_eq!(
            convert_numerals("二十と百二十", false).unwrap(),
            "20と120"
        );
    }

    #[test]
    fn test_decimal_runs_untouched() {
        assert_eq!(convert_numerals("2015年", false).unwrap(), "2015年");
        assert_eq!(convert_numerals("12000", true).unwrap(), "12000");
        assert_eq!(convert_numerals("２０１５年", false).unwrap(), "２０１５年");
    }

    #[test]
    fn test_fullwidth_digits_join_runs() {
        assert_eq!(convert_numerals("１千円", false).unwrap(), "1000円");
        assert_eq!(convert_numerals("３万円", false).unwrap(), "30000円");
        assert_eq!(convert_numerals("１２万３千", true).unwrap(), "123,000");
    }

    #[test]
    fn test_evaluate_with_small_units() {
        assert_eq!(evaluate("3百2十1", &SMALL_UNITS).unwrap(), 321);
        assert_eq!(evaluate("千", &SMALL_UNITS).unwrap(), 1000);
        // magnitude glyphs mean nothing to the small table
        let err = evaluate("1万", &SMALL_UNITS).unwrap_err();
        assert!(matches!(err, Error::MalformedNumeralRun { .. }));
        assert_eq!(evaluate("2万5千", &MAGNITUDE_UNITS).unwrap(), 25000);
    }

    #[test]
    fn test_overflow_is_malformed() {
        let err = convert_numerals("99999999999999999999999百", false).unwrap_err();
        assert!(matches!(err, Error::MalformedNumeralRun { .. }));

        let err = convert_numerals("二〇〇〇〇〇〇〇兆", false).unwrap_err();
        assert!(matches!(err, Error::MalformedNumeralRun { .. }));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12000), "12,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
