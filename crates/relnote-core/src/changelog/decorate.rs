//! Emoji decoration of section titles.

use std::collections::BTreeMap;

use super::Section;

/// Add the emoji registered for each section's lowercased title.
///
/// With `prefix` the emoji goes before the title, otherwise after it.
/// Titles with no registered emoji are left as they are.
pub fn decorate_sections(
    sections: Vec<Section>,
    emojis: &BTreeMap<String, String>,
    prefix: bool,
) -> Vec<Section> {
    sections
        .into_iter()
        .map(|Section { title, body }| {
            let emoji = emojis
                .get(&title.to_lowercase())
                .map_or("", String::as_str);
            let title = if prefix {
                format!("{emoji} {title}")
            } else {
                format!("{title} {emoji}")
            };
            Section::new(title.trim(), body)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn emojis(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn prefix_emoji() {
        let decorated = decorate_sections(
            vec![Section::new("Features", "y")],
            &emojis(&[("features", "🚀")]),
            true,
        );
        assert_eq!(decorated, vec![Section::new("🚀 Features", "y")]);
    }

    #[test]
    fn suffix_emoji() {
        let decorated = decorate_sections(
            vec![Section::new("Features", "y")],
            &emojis(&[("features", "🚀")]),
            false,
        );
        assert_eq!(decorated, vec![Section::new("Features 🚀", "y")]);
    }

    #[test]
    fn lookup_ignores_title_case() {
        let decorated = decorate_sections(
            vec![Section::new("FIXES", "- a"), Section::new("New Features", "- b")],
            &emojis(&[("fixes", "🔧"), ("new features", "🚀")]),
            true,
        );
        assert_eq!(decorated[0].title, "🔧 FIXES");
        assert_eq!(decorated[1].title, "🚀 New Features");
    }

    #[test]
    fn missing_emoji_leaves_title_alone() {
        let decorated = decorate_sections(
            vec![Section::new("Features", "- New feature")],
            &BTreeMap::new(),
            true,
        );
        assert_eq!(decorated, vec![Section::new("Features", "- New feature")]);
    }

    proptest! {
        #[test]
        fn empty_map_is_a_no_op(
            title in "[A-Za-z][A-Za-z ]{0,10}[A-Za-z]",
            body in ".{0,20}",
            prefix in any::<bool>(),
        ) {
            let section = Section::new(title, body);
            let decorated = decorate_sections(vec![section.clone()], &BTreeMap::new(), prefix);
            prop_assert_eq!(decorated, vec![section]);
        }
    }
}
