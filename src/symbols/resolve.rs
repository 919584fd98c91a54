//! Interpretations of a link: the symbols it could refer to, best first.

use crate::base::constants::{KEY_SEPARATOR, SYMBOL_SEPARATOR};
use crate::base::ItemString;
use crate::topics::qualify;

/// The reference item key for a link `text` appearing in `scope`.
pub fn reference_key(scope: Option<&str>, text: &str) -> ItemString {
    ItemString::from(format!("{}{KEY_SEPARATOR}{text}", scope.unwrap_or("")))
}

/// Split a reference key back into scope and text.
pub fn split_reference_key(key: &str) -> (Option<&str>, &str) {
    match key.split_once(KEY_SEPARATOR) {
        Some(("", text)) => (None, text),
        Some((scope, text)) => (Some(scope), text),
        None => (None, key),
    }
}

/// Plural and possessive forms stripped back to a singular.
pub fn singular_forms(text: &str) -> Vec<String> {
    let mut forms = Vec::new();
    let mut push = |form: String| {
        if !form.is_empty() && form != text && !forms.contains(&form) {
            forms.push(form);
        }
    };
    if let Some(stem) = text.strip_suffix("'s") {
        push(stem.to_string());
    }
    if let Some(stem) = text.strip_suffix('\'') {
        push(stem.to_string());
    }
    if let Some(stem) = text.strip_suffix("ies") {
        push(format!("{stem}y"));
    }
    if let Some(stem) = text.strip_suffix("es") {
        push(stem.to_string());
    }
    if let Some(stem) = text.strip_suffix('s') {
        push(stem.to_string());
    }
    forms
}

/// `A.B` → `["A.B", "A"]`, then global.
fn scope_chain(scope: Option<&str>) -> Vec<&str> {
    let mut chain = Vec::new();
    let mut current = scope.filter(|s| !s.is_empty());
    while let Some(package) = current {
        chain.push(package);
        current = package.rsplit_once(SYMBOL_SEPARATOR).map(|(outer, _)| outer);
    }
    chain
}

/// Candidate symbols for `text` in `scope`: every scope level with the text
/// as written, then every scope level with each singular form.
pub fn candidates(scope: Option<&str>, text: &str) -> Vec<ItemString> {
    let chain = scope_chain(scope);
    let mut forms = vec![text.to_string()];
    forms.extend(singular_forms(text));

    let mut candidates: Vec<ItemString> = Vec::new();
    for form in &forms {
        let qualified = chain
            .iter()
            .map(|package| qualify(package, form))
            .chain(std::iter::once(form.clone()));
        for candidate in qualified {
            if !candidates.iter().any(|c| **c == *candidate) {
                candidates.push(ItemString::from(candidate));
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(items: Vec<ItemString>) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scope_chain_then_singulars() {
        assert_eq!(
            strings(candidates(Some("A.B"), "xs")),
            vec!["A.B.xs", "A.xs", "xs", "A.B.x", "A.x", "x"]
        );
    }

    #[test]
    fn test_global_scope() {
        assert_eq!(strings(candidates(None, "Foo")), vec!["Foo"]);
    }

    #[rstest]
    #[case("boxes", &["box", "boxe"])]
    #[case("classes", &["class", "classe"])]
    #[case("entries", &["entry", "entri", "entrie"])]
    #[case("Foo's", &["Foo", "Foo'"])]
    #[case("x", &[])]
    fn test_singular_forms(#[case] text: &str, #[case] expected: &[&str]) {
        assert_eq!(singular_forms(text), expected);
    }

    #[test]
    fn test_reference_key_round_trip_with_global_scope() {
        let key = reference_key(None, "Foo");
        assert_eq!(split_reference_key(&key), (None, "Foo"));
        let key = reference_key(Some("Dog"), "Bark");
        assert_eq!(split_reference_key(&key), (Some("Dog"), "Bark"));
    }
}
