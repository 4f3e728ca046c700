use crate::{FaqRecord, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub record: FaqRecord,
    pub expanded: bool,
}

impl Section {
    fn matches(&self, needle: &str) -> bool {
        self.record.question.to_lowercase().contains(needle)
            || self.record.answer.to_lowercase().contains(needle)
    }
}

/// `Loading` moves to `Loaded` or `Failed` once and stays there for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Loading,
    Loaded(Vec<Section>),
    Failed(String),
}

impl ViewerState {
    /// Applies the result of reading the store. Ignored unless still loading.
    pub fn finish(&mut self, result: Result<Vec<FaqRecord>, StoreError>) -> bool {
        if !matches!(self, ViewerState::Loading) {
            return false;
        }
        *self = match result {
            Ok(records) => ViewerState::Loaded(
                records
                    .into_iter()
                    .map(|record| Section {
                        record,
                        expanded: false,
                    })
                    .collect(),
            ),
            Err(e) => ViewerState::Failed(e.to_string()),
        };
        true
    }

    pub fn sections(&self) -> &[Section] {
        match self {
            ViewerState::Loaded(sections) => sections,
            _ => &[],
        }
    }

    pub fn toggle(&mut self, idx: usize) {
        if let ViewerState::Loaded(sections) = self {
            if let Some(section) = sections.get_mut(idx) {
                section.expanded = !section.expanded;
            }
        }
    }

    pub fn set_all_expanded(&mut self, expanded: bool) {
        if let ViewerState::Loaded(sections) = self {
            for section in sections {
                section.expanded = expanded;
            }
        }
    }

    /// Indices of sections whose question or answer contains `filter`, ignoring case.
    pub fn matching(&self, filter: &str) -> Vec<usize> {
        let needle = filter.trim().to_lowercase();
        self.sections()
            .iter()
            .enumerate()
            .filter(|(_, section)| needle.is_empty() || section.matches(&needle))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::{io, path::PathBuf};

    fn loaded() -> ViewerState {
        let mut state = ViewerState::Loading;
        assert!(state.finish(Ok(vec![
            FaqRecord::new("Q1", "A1"),
            FaqRecord::new("Q2", ""),
        ])));
        state
    }

    #[test]
    fn test_loaded_sections_start_collapsed() {
        let state = loaded();
        let titles: Vec<_> = state
            .sections()
            .iter()
            .map(|s| s.record.question.as_str())
            .collect();
        assert_eq!(titles, vec!["Q1", "Q2"]);
        assert!(state.sections().iter().all(|s| !s.expanded));
    }

    #[test]
    fn test_failed_state_has_no_sections() {
        let mut state = ViewerState::Loading;
        state.finish(Err(StoreError::Corrupt {
            path: PathBuf::from("faqs.jsonl"),
            line: 3,
            reason: "expected value".to_string(),
        }));
        assert!(matches!(&state, ViewerState::Failed(msg) if msg.contains("faqs.jsonl:3")));
        assert!(state.sections().is_empty());
    }

    #[test]
    fn test_finish_only_applies_while_loading() {
        let mut state = loaded();
        let applied = state.finish(Err(StoreError::Io {
            path: PathBuf::from("faqs.jsonl"),
            source: io::Error::from(io::ErrorKind::NotFound),
        }));
        assert!(!applied);
        assert_eq!(state.sections().len(), 2);

        let mut state = ViewerState::Failed("gone".to_string());
        assert!(!state.finish(Ok(vec![FaqRecord::new("Q1", "A1")])));
        assert_eq!(state, ViewerState::Failed("gone".to_string()));
    }

    #[test]
    fn test_toggle_and_expand_all() {
        let mut state = loaded();
        state.toggle(1);
        assert_eq!(
            state.sections().iter().map(|s| s.expanded).collect::<Vec<_>>(),
            vec![false, true]
        );
        state.toggle(7);
        state.set_all_expanded(true);
        assert!(state.sections().iter().all(|s| s.expanded));
        state.set_all_expanded(false);
        assert!(state.sections().iter().all(|s| !s.expanded));
    }

    #[test]
    fn test_matching_filter() {
        let state = loaded();
        assert_eq!(state.matching(""), vec![0, 1]);
        assert_eq!(state.matching(" q2 "), vec![1]);
        assert_eq!(state.matching("a1"), vec![0]);
        assert!(state.matching("nothing").is_empty());
    }
}
