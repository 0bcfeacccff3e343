//! Plural form resolution for pipe-delimited messages.
//!
//! A pluralized message lists its forms separated by `|`, e.g.
//! `"| %count% hour | %count% hours"`. Form 0 is always used for a zero quantity;
//! the remaining forms follow the CLDR cardinal categories of the locale, in the
//! order `one, two, few, many, other` (skipping the ones the locale does not use).
//! A literal pipe is written as `\|`.

use std::{collections::BTreeMap, mem};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

const FORM_SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Standard CLDR plural categories.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

/// Plural selection rule shared by a group of languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// No grammatical number for positive quantities (Japanese, Chinese, Turkish, ...).
    NoPlural,
    /// `one` for 1, `other` for everything else (English, German, French, ...).
    OneOther,
    /// Russian group: one, few, many.
    EastSlavic,
    Polish,
    /// Czech and Slovak.
    Czech,
    Lithuanian,
    Romanian,
    Slovenian,
    Hebrew,
    Irish,
    Arabic,
}

lazy_static! {
    /// Static mapping from base language subtag to its plural rule.
    static ref RULE_TABLE: BTreeMap<&'static str, PluralRule> = {
        use PluralRule::*;
        let mut m = BTreeMap::new();

        for code in [
            "ja", "zh", "ko", "th", "vi", "km", "lo", "my", "yue", "id", "ms", "tr", "az", "ka",
            "bo", "dz", "jv",
        ] {
            m.insert(code, NoPlural);
        }

        for code in [
            "en", "de", "nl", "sv", "da", "nb", "nn", "no", "is", "fi", "et", "fa", "hi", "bn",
            "gu", "ta", "te", "kn", "ml", "mr", "it", "es", "pt", "el", "eu", "gl", "af", "sw",
            "ur", "fil", "tl", "fr", "hy", "kab", "ca", "bg", "hu",
        ] {
            m.insert(code, OneOther);
        }

        for code in ["ru", "uk", "be", "sr", "hr", "bs", "sh"] {
            m.insert(code, EastSlavic);
        }

        m.insert("pl", Polish);
        for code in ["cs", "sk"] {
            m.insert(code, Czech);
        }
        m.insert("lt", Lithuanian);
        m.insert("ro", Romanian);
        m.insert("sl", Slovenian);
        // legacy code iw also maps here
        for code in ["he", "iw"] {
            m.insert(code, Hebrew);
        }
        m.insert("ga", Irish);
        m.insert("ar", Arabic);

        m
    };
}

impl PluralRule {
    /// Categories in form order. Form 0 is reported as [`PluralCategory::Zero`].
    pub fn categories(self) -> &'static [PluralCategory] {
        use PluralCategory::*;
        match self {
            PluralRule::NoPlural => &[Zero, Other],
            PluralRule::OneOther => &[Zero, One, Other],
            PluralRule::EastSlavic | PluralRule::Polish => &[Zero, One, Few, Many],
            PluralRule::Czech | PluralRule::Lithuanian | PluralRule::Romanian => {
                &[Zero, One, Few, Other]
            }
            PluralRule::Slovenian => &[Zero, One, Two, Few, Other],
            PluralRule::Hebrew => &[Zero, One, Two, Many, Other],
            PluralRule::Irish | PluralRule::Arabic => &[Zero, One, Two, Few, Many, Other],
        }
    }

    /// Number of `|`-separated forms a message must have for this rule.
    pub fn form_count(self) -> usize {
        self.categories().len()
    }

    /// Category of an integer quantity.
    pub fn category_for(self, n: u64) -> PluralCategory {
        use PluralCategory::*;
        if n == 0 {
            return Zero;
        }

        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            PluralRule::NoPlural => Other,
            PluralRule::OneOther => {
                if n == 1 {
                    One
                } else {
                    Other
                }
            }
            PluralRule::EastSlavic => {
                if n10 == 1 && n100 != 11 {
                    One
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    Few
                } else {
                    Many
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    One
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    Few
                } else {
                    Many
                }
            }
            PluralRule::Czech => match n {
                1 => One,
                2..=4 => Few,
                _ => Other,
            },
            PluralRule::Lithuanian => {
                if (11..=19).contains(&n100) {
                    Other
                } else if n10 == 1 {
                    One
                } else if n10 >= 2 {
                    Few
                } else {
                    Other
                }
            }
            PluralRule::Romanian => {
                if n == 1 {
                    One
                } else if (2..=19).contains(&n100) {
                    Few
                } else {
                    Other
                }
            }
            PluralRule::Slovenian => match n100 {
                1 => One,
                2 => Two,
                3 | 4 => Few,
                _ => Other,
            },
            PluralRule::Hebrew => match n {
                1 => One,
                2 => Two,
                _ if n > 10 && n10 == 0 => Many,
                _ => Other,
            },
            PluralRule::Irish => match n {
                1 => One,
                2 => Two,
                3..=6 => Few,
                7..=10 => Many,
                _ => Other,
            },
            PluralRule::Arabic => match n100 {
                _ if n == 1 => One,
                _ if n == 2 => Two,
                3..=10 => Few,
                11..=99 => Many,
                _ => Other,
            },
        }
    }

    /// Index of the form used for `n`, never past the last form.
    pub fn form_index(self, n: u64) -> usize {
        let categories = self.categories();
        let category = self.category_for(n);
        categories
            .iter()
            .position(|c| *c == category)
            .unwrap_or(categories.len() - 1)
    }
}

/// Returns the plural rule for a language identifier, using its base language subtag.
///
/// Unknown languages fall back to [`PluralRule::NoPlural`].
pub fn plural_rule_for(lang: &LanguageIdentifier) -> PluralRule {
    let lang_str = lang.language.as_str();
    RULE_TABLE.get(lang_str).copied().unwrap_or_else(|| {
        debug!(language = lang_str, "no plural rule for language, using no-plural rule");
        PluralRule::NoPlural
    })
}

/// Helper for string locale codes (accepts underscores, normalizes to hyphen).
pub fn plural_rule(locale: &str) -> PluralRule {
    let normalized = locale.replace('_', "-");
    match normalized.parse::<LanguageIdentifier>() {
        Ok(lang) => plural_rule_for(&lang),
        Err(_) => {
            debug!(locale, "unparsable locale, using no-plural rule");
            PluralRule::NoPlural
        }
    }
}

/// Returns true if the message contains at least one unescaped `|`.
pub fn has_plural_form(message: &str) -> bool {
    let mut prev = None;
    for ch in message.chars() {
        if ch == FORM_SEPARATOR && prev != Some(ESCAPE) {
            return true;
        }
        prev = Some(ch);
    }
    false
}

/// Splits a message into its trimmed plural forms. `\|` becomes a literal `|`.
///
/// A message without separators yields a single form.
pub fn get_forms(message: &str) -> Vec<String> {
    let mut forms = Vec::new();
    let mut current = String::new();
    let mut chars = message.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE if chars.peek() == Some(&FORM_SEPARATOR) => {
                current.push(FORM_SEPARATOR);
                chars.next();
            }
            FORM_SEPARATOR => forms.push(mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    forms.push(current);

    forms.into_iter().map(|form| form.trim().to_string()).collect()
}

/// Number of plural forms a message in `locale` must have.
pub fn expected_form_count(locale: &str) -> usize {
    plural_rule(locale).form_count()
}

/// Index of the form applying to `number` in `locale`.
pub fn select_form_index(number: u64, locale: &str) -> usize {
    plural_rule(locale).form_index(number)
}

/// Returns true if the message has exactly as many forms as `locale` expects.
pub fn is_plural_form_valid(message: &str, locale: &str) -> bool {
    get_forms(message).len() == expected_form_count(locale)
}

/// Returns the form of `message` applying to `number` in `locale`.
///
/// `key` is only used to report which message could not be resolved.
pub fn get_form(message: &str, number: u64, locale: &str, key: &str) -> Result<String, Error> {
    let mut forms = get_forms(message);
    let index = select_form_index(number, locale);
    if index >= forms.len() {
        return Err(Error::MessageKeyResolution {
            key: key.to_string(),
            index,
            forms: forms.len(),
        });
    }
    Ok(forms.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_plural_form() {
        assert!(has_plural_form("| %count% hour | %count% hours"));
        assert!(has_plural_form("a|b"));
        assert!(!has_plural_form("no forms here"));
        assert!(!has_plural_form(r"either \| or"));
        assert!(has_plural_form(r"\| escaped | real"));
    }

    #[test]
    fn test_get_forms() {
        assert_eq!(
            get_forms("| %count% hour | %count% hours"),
            vec!["", "%count% hour", "%count% hours"]
        );
        assert_eq!(get_forms("  single  "), vec!["single"]);
        assert_eq!(get_forms(r"a \| b | c"), vec!["a | b", "c"]);
    }

    #[test]
    fn test_expected_form_count() {
        assert_eq!(expected_form_count("ja"), 2);
        assert_eq!(expected_form_count("tr"), 2);
        assert_eq!(expected_form_count("en"), 3);
        assert_eq!(expected_form_count("fr"), 3);
        assert_eq!(expected_form_count("ru"), 4);
        assert_eq!(expected_form_count("sl"), 5);
        assert_eq!(expected_form_count("ar"), 6);
    }

    #[test]
    fn test_locale_normalization() {
        assert_eq!(plural_rule("zh_TW"), PluralRule::NoPlural);
        assert_eq!(plural_rule("pt-BR"), PluralRule::OneOther);
        assert_eq!(plural_rule("sr-Latn"), PluralRule::EastSlavic);
        assert_eq!(plural_rule("not a locale"), PluralRule::NoPlural);
        assert_eq!(plural_rule("xx"), PluralRule::NoPlural);
    }

    #[test]
    fn test_select_form_index_english() {
        assert_eq!(select_form_index(0, "en"), 0);
        assert_eq!(select_form_index(1, "en"), 1);
        assert_eq!(select_form_index(2, "en"), 2);
        assert_eq!(select_form_index(101, "en"), 2);
    }

    #[test]
    fn test_select_form_index_russian() {
        assert_eq!(select_form_index(0, "ru"), 0);
        assert_eq!(select_form_index(1, "ru"), 1);
        assert_eq!(select_form_index(21, "ru"), 1);
        assert_eq!(select_form_index(11, "ru"), 3);
        assert_eq!(select_form_index(3, "ru"), 2);
        assert_eq!(select_form_index(22, "ru"), 2);
        assert_eq!(select_form_index(13, "ru"), 3);
        assert_eq!(select_form_index(5, "ru"), 3);
    }

    #[test]
    fn test_select_form_index_other_rules() {
        assert_eq!(select_form_index(5, "ja"), 1);
        assert_eq!(select_form_index(21, "pl"), 3);
        assert_eq!(select_form_index(4, "cs"), 2);
        assert_eq!(select_form_index(5, "cs"), 3);
        assert_eq!(select_form_index(11, "lt"), 3);
        assert_eq!(select_form_index(21, "lt"), 1);
        assert_eq!(select_form_index(102, "sl"), 2);
        assert_eq!(select_form_index(20, "he"), 3);
        assert_eq!(select_form_index(7, "ga"), 4);
        assert_eq!(select_form_index(100, "ar"), 5);
        assert_eq!(select_form_index(111, "ar"), 4);
    }

    #[test]
    fn test_form_index_is_within_form_count() {
        for rule in RULE_TABLE.values() {
            for n in 0..250 {
                assert!(rule.form_index(n) < rule.form_count());
            }
        }
    }

    #[test]
    fn test_is_plural_form_valid() {
        assert!(is_plural_form_valid("bugün | %days% gün", "tr"));
        assert!(!is_plural_form_valid("a | b | c", "tr"));
        assert!(is_plural_form_valid("| one | many", "en"));
    }

    #[test]
    fn test_get_form() {
        let message = "| %count% hour | %count% hours";
        assert_eq!(get_form(message, 1, "en", "hours").unwrap(), "%count% hour");
        assert_eq!(get_form(message, 5, "en", "hours").unwrap(), "%count% hours");
        assert_eq!(get_form(message, 0, "en", "hours").unwrap(), "");
    }

    #[test]
    fn test_get_form_out_of_range() {
        let err = get_form("none | one", 5, "en", "apples").unwrap_err();
        assert_eq!(
            err,
            Error::MessageKeyResolution {
                key: "apples".to_string(),
                index: 2,
                forms: 2,
            }
        );
    }
}
