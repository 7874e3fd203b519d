use std::collections::HashSet;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::folder_tree::BookmarkFolder;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Match,
    Parent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResultItem {
    pub folder: BookmarkFolder,
    pub kind: ResultKind,
}

/// Folders whose title contains `query`, ignoring case, in tree order.
///
/// A blank query hides the dropdown, so it matches nothing.
pub fn search_folders(
    query: &str,
    folders: &[BookmarkFolder],
    limit: usize,
) -> Vec<SearchResultItem> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for folder in folders {
        if results.len() >= limit {
            break;
        }
        if !folder.title.to_lowercase().contains(&needle) {
            continue;
        }
        if seen.insert(folder.id.as_str()) {
            results.push(SearchResultItem {
                folder: folder.clone(),
                kind: ResultKind::Match,
            });
        }
    }

    results
}

/// Index to highlight after a fresh search.
pub fn initial_highlight(results: &[SearchResultItem]) -> Option<usize> {
    (!results.is_empty()).then_some(0)
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub highlighted: bool,
}

impl HighlightSpan {
    fn new(text: &str, highlighted: bool) -> Self {
        Self {
            text: text.to_string(),
            highlighted,
        }
    }
}

/// Split `text` into runs, marking every case-insensitive occurrence of `query`.
pub fn highlight_spans(text: &str, query: &str) -> Vec<HighlightSpan> {
    if query.trim().is_empty() {
        return vec![HighlightSpan::new(text, false)];
    }

    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(err) => {
            log::warn!("cannot highlight {query:?}: {err}");
            return vec![HighlightSpan::new(text, false)];
        }
    };

    let mut spans = Vec::new();
    let mut cursor = 0;
    for m in re.find_iter(text) {
        if m.start() > cursor {
            spans.push(HighlightSpan::new(&text[cursor..m.start()], false));
        }
        if !m.as_str().is_empty() {
            spans.push(HighlightSpan::new(m.as_str(), true));
        }
        cursor = m.end();
    }
    if cursor < text.len() {
        spans.push(HighlightSpan::new(&text[cursor..], false));
    }
    spans
}
