//! Priority ordering of sections.

use super::Section;

/// Reorder sections by a priority list of lowercase titles.
///
/// Sections whose lowercased title is in `priority` come first, in priority
/// order. The rest follow, sorted by title. Both sorts are stable and titles
/// keep their original case.
pub fn order_sections(sections: Vec<Section>, priority: &[String]) -> Vec<Section> {
    let rank = |section: &Section| {
        let key = section.title.to_lowercase();
        priority.iter().position(|p| *p == key)
    };

    let (mut ranked, mut rest): (Vec<_>, Vec<_>) = sections
        .into_iter()
        .map(|section| (rank(&section), section))
        .partition(|(position, _)| position.is_some());

    ranked.sort_by_key(|(position, _)| *position);
    rest.sort_by(|(_, a), (_, b)| a.title.cmp(&b.title));

    ranked
        .into_iter()
        .chain(rest)
        .map(|(_, section)| section)
        .collect()
}
