use crate::error::Result;
use crate::kansuji::convert_numerals;
use once_cell::sync::Lazy;
use regex::Regex;

/// Glyphs a context may contain around the marker.
const NUMERALS: &str = "〇一二三四五六七八九十百千万億兆";

/// Context families as (name, pattern), searched in declaration order.
/// `{N}` stands for [`NUMERALS`].
const CONTEXT_PATTERNS: &[(&str, &str)] = &[
    ("month-day", "[{N}]{1,2}月[{N}]{1,2}日"),
    ("year-20xx", "二〇[{N}]{2}年"),
    ("year-19xx", "一九[{N}]{2}年"),
    // one character after kana, a space or 、。
    ("kana-year", "[ぁ-ん、。 　].年"),
    ("kana-month", "[ぁ-ん、。 　].月"),
    ("kana-day", "[ぁ-ん、。 　].日"),
    // a single leading character followed by 間, 半 or kana
    ("leading-year", "^.年[間半ぁ-ん]"),
    ("leading-month", "^.月[間半ぁ-ん]"),
    ("leading-day", "^.日[間半ぁ-ん]"),
    ("year-month", "年[{N}]{1,2}月"),
    // 時 followed by anything but も (三時も is an idiom)
    ("hour", "[{N}]{1,2}時[^も]"),
];

static CONTEXTS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    CONTEXT_PATTERNS
        .iter()
        .map(|&(name, pattern)| {
            let pattern = pattern.replace("{N}", NUMERALS);
            let regex = Regex::new(&pattern).expect("context pattern");
            (name, regex)
        })
        .collect()
});

/// Convert the kanji numerals that appear inside a recognised context.
///
/// Every family is searched against the original line and the matches are
/// applied in order, each one replacing all of its literal occurrences in
/// the line as it stands at that point.
pub fn convert_digits(line: &str) -> Result<String> {
    let spans: Vec<&str> = CONTEXTS
        .iter()
        .flat_map(|(_, regex)| regex.find_iter(line).map(|m| m.as_str()))
        .collect();

    let mut out = line.to_string();
    for span in spans {
        let converted = convert_numerals(span, false)?;
        if converted != span {
            tracing::trace!(span, %converted, "numeral context");
            out = out.replace(span, &converted);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_convert() {
        let cases = [
            ("この三年", "この3年"),
            ("十二月三日に", "12月3日に"),
            ("二〇一五年の夏", "2015年の夏"),
            ("一九九九年", "1999年"),
            ("三年間", "3年間"),
            ("五月半ば", "5月半ば"),
            ("令和元年三月", "令和元年3月"),
            ("午後三時から", "午後3時から"),
            ("もう十日", "もう10日"),
            ("その三月", "その3月"),
            ("十日間", "10日間"),
            ("七日半", "7日半"),
        ];
        for (input, expected) in cases {
            assert_eq!(convert_digits(input).unwrap(), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_idioms_keep_kanji() {
        for input in ["三三五五", "一昨年", "三日坊主", "三時も", "その程度", "ある日", "一石二鳥"] {
            assert_eq!(convert_digits(input).unwrap(), input);
        }
    }

    #[test]
    fn test_every_occurrence_of_a_span_is_replaced() {
        assert_eq!(
            convert_digits("その三年、その三年").unwrap(),
            "その3年、その3年"
        );
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(CONTEXTS.len(), CONTEXT_PATTERNS.len());
    }
}
