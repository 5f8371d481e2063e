// 🔍 Filter Engine - pure derivation of the visible list
// name contains search term AND (no type selected OR entry has that type)

use crate::db::Entry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,

    /// `None` means no type restriction
    pub selected_type: Option<String>,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.selected_type.is_some()
    }

    /// Does an entry pass both predicates?
    pub fn matches(&self, entry: &Entry) -> bool {
        let matches_search = entry
            .name
            .to_lowercase()
            .contains(&self.search_term.to_lowercase());

        let matches_type = match &self.selected_type {
            Some(selected) => entry.has_type(selected),
            None => true,
        };

        matches_search && matches_type
    }
}

/// Indices of the entries passing `state`, in their original order
pub fn filter_indices(entries: &[Entry], state: &FilterState) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| state.matches(entry))
        .map(|(i, _)| i)
        .collect()
}

/// The entries passing `state`, in their original order
pub fn filter_entries<'a>(entries: &'a [Entry], state: &FilterState) -> Vec<&'a Entry> {
    entries.iter().filter(|entry| state.matches(entry)).collect()
}

/// Distinct type names in order of first appearance
/// Spellings differing only in case count as one type; the first one seen wins
pub fn distinct_types(entries: &[Entry]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();

    for type_name in entries.iter().flat_map(|e| e.types.iter()) {
        if !types.iter().any(|t| t.eq_ignore_ascii_case(type_name)) {
            types.push(type_name.clone());
        }
    }

    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new(1, "Bulbasaur", &["grass", "poison"], "..."),
            Entry::new(4, "Charmander", &["fire"], "..."),
        ]
    }

    fn ids(entries: &[&Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.id).collect()
    }

    fn state(search: &str, selected: Option<&str>) -> FilterState {
        FilterState {
            search_term: search.to_string(),
            selected_type: selected.map(str::to_string),
        }
    }

    #[test]
    fn test_default_state_shows_everything() {
        let entries = sample();
        let visible = filter_entries(&entries, &FilterState::default());

        assert_eq!(ids(&visible), vec![1, 4]);
        assert!(!FilterState::default().is_active());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let entries = sample();

        for term in ["char", "CHAR", "mander"] {
            let visible = filter_entries(&entries, &state(term, None));
            assert_eq!(ids(&visible), vec![4], "term {:?}", term);
        }
    }

    #[test]
    fn test_type_selection_matches_exact_token() {
        let entries = sample();

        assert_eq!(ids(&filter_entries(&entries, &state("", Some("poison")))), vec![1]);
        assert_eq!(ids(&filter_entries(&entries, &state("", Some("FIRE")))), vec![4]);
        assert!(filter_entries(&entries, &state("", Some("fir"))).is_empty());
    }

    #[test]
    fn test_selected_type_matches_capitalized_entry_types() {
        let entries = vec![
            Entry::new(4, "Charmander", &["Fire"], ""),
            Entry::new(1, "Bulbasaur", &["grass"], ""),
        ];

        let visible = filter_entries(&entries, &state("", Some("fire")));
        assert_eq!(ids(&visible), vec![4]);
    }

    #[test]
    fn test_both_predicates_must_hold() {
        let entries = sample();
        assert!(filter_entries(&entries, &state("char", Some("poison"))).is_empty());
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let entries = vec![
            Entry::new(1, "Bulbasaur", &["grass", "poison"], ""),
            Entry::new(2, "Ivysaur", &["grass", "poison"], ""),
            Entry::new(4, "Charmander", &["fire"], ""),
            Entry::new(3, "Venusaur", &["grass", "poison"], ""),
        ];

        let visible = filter_indices(&entries, &state("saur", None));
        assert_eq!(visible, vec![0, 1, 3]);
    }

    #[test]
    fn test_distinct_types_first_appearance_no_duplicates() {
        let entries = vec![
            Entry::new(1, "Bulbasaur", &["grass", "poison"], ""),
            Entry::new(4, "Charmander", &["fire"], ""),
            Entry::new(6, "Charizard", &["fire", "flying"], ""),
            Entry::new(43, "Oddish", &["Grass", "poison"], ""),
        ];

        assert_eq!(
            distinct_types(&entries),
            vec!["grass", "poison", "fire", "flying"]
        );
    }

    #[test]
    fn test_distinct_types_empty_list() {
        assert!(distinct_types(&[]).is_empty());
    }
}
