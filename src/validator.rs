//! Structural validation of translations.
//!
//! A translation is valid when its tags, void tags and placeholders match the base
//! message's, ignoring literal text and the order of siblings.

use tracing::debug;

use crate::{
    error::Error,
    nodes::Node,
    parser::parse,
    plural::{expected_form_count, get_forms, has_plural_form},
};

/// Validates `translated` (written for `locale`) against `base` by AST structure.
///
/// - Without plural forms in `base`, returns true if both ASTs have the same structure.
/// - With plural forms, `translated` must first have as many forms as `locale` expects,
///   otherwise [`Error::InvalidPluralForms`] is returned. Form 0 of both messages is then
///   compared, and every other translated form is compared against base form 1.
///
/// Parse errors in either message are returned as errors rather than `false`.
pub fn is_translation_valid(base: &str, translated: &str, locale: &str) -> Result<bool, Error> {
    if has_plural_form(base) {
        let translated_forms = get_forms(translated);
        let expected = expected_form_count(locale);
        if translated_forms.len() != expected {
            return Err(Error::InvalidPluralForms {
                locale: locale.to_string(),
                expected,
                found: translated_forms.len(),
            });
        }

        let base_forms = get_forms(base);
        // has_plural_form guarantees at least two base forms
        let (zero, plural) = (&base_forms[0], &base_forms[1]);

        if !is_form_valid(zero, &translated_forms[0])? {
            debug!(locale, "zero plural form structure differs");
            return Ok(false);
        }
        for (index, form) in translated_forms.iter().enumerate().skip(1) {
            if !is_form_valid(plural, form)? {
                debug!(locale, index, "plural form structure differs");
                return Ok(false);
            }
        }
        return Ok(true);
    }

    is_form_valid(base, translated)
}

/// Compares a single form. Pipes here are literal, forms are already split.
fn is_form_valid(base: &str, translated: &str) -> Result<bool, Error> {
    let base_ast = parse(base)?;
    let translated_ast = parse(translated)?;

    Ok(are_structures_same(&base_ast, &translated_ast))
}

/// Compares two node sequences, ignoring text nodes and sibling order.
pub fn are_structures_same(base: &[Node], target: &[Node]) -> bool {
    let base: Vec<&Node> = base.iter().filter(|node| !node.is_text()).collect();
    let target: Vec<&Node> = target.iter().filter(|node| !node.is_text()).collect();

    if base.len() != target.len() {
        debug!(
            base = base.len(),
            target = target.len(),
            "different number of structural nodes"
        );
        return false;
    }

    let mut matched = vec![false; target.len()];
    for base_node in base {
        let found = (0..target.len()).find(|&index| {
            !matched[index]
                && target[index].kind() == base_node.kind()
                && target[index].name() == base_node.name()
        });
        let Some(index) = found else {
            debug!(node = %base_node, "no counterpart in translation");
            return false;
        };
        matched[index] = true;

        // the first counterpart by name is final, its children must match
        if let (Some(base_children), Some(target_children)) =
            (base_node.children(), target[index].children())
        {
            if !are_structures_same(base_children, target_children) {
                debug!(node = %base_node, "children differ from counterpart");
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_messages_are_valid() {
        assert!(is_translation_valid("test string", "тестовая строка", "ru").unwrap());
    }

    #[test]
    fn test_wrong_tag_is_invalid() {
        assert!(
            !is_translation_valid(
                "test string <a>has node</a>",
                "строка <b>с нодой</b>",
                "ru"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_rearranged_nodes_are_valid() {
        assert!(
            is_translation_valid(
                "<b>b node</b> <a>a node</a>",
                "<a>a нода</a> <b>b нода</b>",
                "ru"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_duplicate_nodes_need_distinct_counterparts() {
        let base = [Node::placeholder("a"), Node::placeholder("a")];
        let target = [Node::placeholder("a"), Node::placeholder("b")];
        assert!(!are_structures_same(&base, &target));
        assert!(are_structures_same(&base, &base));
    }

    #[test]
    fn test_first_counterpart_by_name_is_final() {
        let base = [
            Node::tag("a", vec![Node::placeholder("x")]),
            Node::tag("a", Vec::new()),
        ];
        let target = [
            Node::tag("a", Vec::new()),
            Node::tag("a", vec![Node::text("text"), Node::placeholder("x")]),
        ];
        assert!(!are_structures_same(&base, &target));

        let base = parse("<a>%x%</a> <a></a>").unwrap();
        let target = parse("<a></a> <a>%x%</a>").unwrap();
        assert!(!are_structures_same(&base, &target));
        assert!(are_structures_same(&base, &base));
    }

    #[test]
    fn test_escaped_pipes_stay_inside_plural_forms() {
        assert!(
            is_translation_valid(
                r"zero \| x | one %count% | many %count%",
                r"null \| y | ein %count% | viele %count%",
                "de"
            )
            .unwrap()
        );
        assert!(
            !is_translation_valid(
                r"zero \| x | one %count% | many %count%",
                r"null \| <b>y</b> | ein %count% | viele %count%",
                "de"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_nested_children_must_match() {
        assert!(
            !is_translation_valid("<a>has <b>nested</b></a>", "<a>has <i>nested</i></a>", "de")
                .unwrap()
        );
    }

    #[test]
    fn test_plural_messages() {
        let base = "Renews today | Renews in %days% day | Renews in %days% days";
        assert!(
            is_translation_valid(
                base,
                "Veri bugün yenileniyor | Veri %days% gün içinde yenileniyor",
                "tr"
            )
            .unwrap()
        );

        let err = is_translation_valid(base, "a | %days% b | %days% c", "tr").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPluralForms {
                locale: "tr".to_string(),
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn test_parse_errors_are_returned() {
        let err = is_translation_valid("<a>x</a>", "<a>x<a>", "tr").unwrap_err();
        assert!(err.is_parse_error());
    }
}
