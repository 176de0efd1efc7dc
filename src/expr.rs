use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default cap on passes for a single context rule.
pub const DEFAULT_REWRITE_LIMIT: usize = 256;

/// A context-sensitive rule. Adjacent matches share their context glyphs
/// and a single pass only takes the non-overlapping ones, so each rule is
/// rerun until it stops matching.
struct ContextRule {
    name: &'static str,
    regex: Regex,
    replacement: &'static str,
}

static CONTEXT_RULES: Lazy<Vec<ContextRule>> = Lazy::new(|| {
    [
        (
            "所",
            r"([たるの])所([^為感期見作載在産詮蔵属長定得有与用論])",
            "${1}ところ${2}",
        ),
        (
            "達",
            r"([^安先友伊上下闊用熟送速伝調通到配発不])達([^さしすせそ筆者人磨摩])",
            "${1}たち${2}",
        ),
        ("出来", r"出来([あ-ん、。])", "でき${1}"),
        ("為", r"([あ-ん])為([^政書替])", "${1}ため${2}"),
        ("又", r"又([あ-ん、])", "また${1}"),
    ]
    .into_iter()
    .map(|(name, pattern, replacement)| ContextRule {
        name,
        regex: Regex::new(pattern).expect("rewrite rule pattern"),
        replacement,
    })
    .collect()
});

/// Literal rewrites, applied once each in this order.
const LITERAL_RULES: &[(&str, &str)] = &[
    ("何故", "なぜ"),
    ("殊更", "ことさら"),
    ("更に", "さらに"),
    ("子供", "子ども"),
    ("と共に", "とともに"),
];

/// Archaic 程 adverbs and bracket remapping. 余っ程 precedes 余程.
const ADVERB_RULES: &[(&str, &str)] = &[
    ("如何程", "いかほど"),
    ("其程", "それほど"),
    ("露程", "つゆほど"),
    ("余っ程", "よっぽど"),
    ("余程", "よほど"),
    ("後程", "のちほど"),
    ("程々", "ほどほど"),
    ("＜", "〈"),
    ("＞", "〉"),
];

fn apply_until_settled(text: String, rule: &ContextRule, limit: usize) -> Result<String> {
    let mut text = text;
    let mut passes = 0;
    while rule.regex.is_match(&text) {
        if passes == limit {
            return Err(Error::RewriteLimitExceeded {
                rule: rule.name,
                limit,
            });
        }
        text = rule.regex.replace_all(&text, rule.replacement).into_owned();
        passes += 1;
    }
    Ok(text)
}

/// Apply every rewrite rule to `line`.
///
/// `limit` bounds the passes of each context rule; a rule still matching
/// after that many passes yields [`Error::RewriteLimitExceeded`].
pub fn rewrite_expressions(line: &str, limit: usize) -> Result<String> {
    let mut text = line.to_string();

    for rule in CONTEXT_RULES.iter() {
        text = apply_until_settled(text, rule, limit)?;
    }

    for &(from, to) in LITERAL_RULES {
        text = text.replace(from, to);
    }
    if let Some(rest) = text.strip_prefix("共に") {
        text = format!("ともに{rest}");
    }
    for &(from, to) in ADVERB_RULES {
        text = text.replace(from, to);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(line: &str) -> String {
        rewrite_expressions(line, DEFAULT_REWRITE_LIMIT).unwrap()
    }

    #[test]
    fn test_tokoro() {
        assert_eq!(rewrite("見た所で"), "見たところで");
        assert_eq!(rewrite("その所に"), "そのところに");
        // excluded compounds keep the kanji
        assert_eq!(rewrite("の所有"), "の所有");
        assert_eq!(rewrite("の所属"), "の所属");
        // no kana on the left
        assert_eq!(rewrite("住所が"), "住所が");
    }

    #[test]
    fn test_tachi() {
        assert_eq!(rewrite("私達は"), "私たちは");
        assert_eq!(rewrite("子供達が"), "子どもたちが");
        assert_eq!(rewrite("友達が"), "友達が");
        assert_eq!(rewrite("配達が"), "配達が");
        assert_eq!(rewrite("私達者"), "私達者");
        // the line edge gives no context
        assert_eq!(rewrite("達する"), "達する");
    }

    #[test]
    fn test_tachi_runs_settle() {
        // each pass only converts non-overlapping matches
        assert_eq!(rewrite("君達達達は"), "君たちたちたちは");
    }

    #[test]
    fn test_dekiru_tame_mata() {
        assert_eq!(rewrite("出来る"), "できる");
        assert_eq!(rewrite("出来、"), "でき、");
        assert_eq!(rewrite("出来事"), "出来事");
        assert_eq!(rewrite("その為に"), "そのために");
        assert_eq!(rewrite("の為替"), "の為替");
        assert_eq!(rewrite("又は"), "または");
        assert_eq!(rewrite("又、"), "また、");
        assert_eq!(rewrite("又聞き"), "又聞き");
    }

    #[test]
    fn test_literal_rules() {
        assert_eq!(rewrite("何故だ"), "なぜだ");
        assert_eq!(rewrite("殊更に"), "ことさらに");
        assert_eq!(rewrite("更に"), "さらに");
        assert_eq!(rewrite("子供"), "子ども");
        assert_eq!(rewrite("彼と共に"), "彼とともに");
        assert_eq!(rewrite("共に歩む"), "ともに歩む");
        // only at the start of the line
        assert_eq!(rewrite("皆共に"), "皆共に");
    }

    #[test]
    fn test_adverbs_and_brackets() {
        assert_eq!(rewrite("余っ程"), "よっぽど");
        assert_eq!(rewrite("余程"), "よほど");
        assert_eq!(rewrite("後程"), "のちほど");
        assert_eq!(rewrite("程々に"), "ほどほどに");
        assert_eq!(rewrite("＜注＞"), "〈注〉");
        assert_eq!(rewrite("その程度"), "その程度");
    }

    #[test]
    fn test_limit_exceeded() {
        let err = rewrite_expressions("その為に", 0).unwrap_err();
        assert!(matches!(
            err,
            Error::RewriteLimitExceeded { rule: "為", limit: 0 }
        ));
        // nothing to rewrite means no pass is needed
        assert_eq!(rewrite_expressions("平文", 0).unwrap(), "平文");
    }
}
