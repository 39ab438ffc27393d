use chrono::NaiveDateTime;

use crate::model::item::Item;
use crate::model::list::TodoList;
use crate::store::Store;

/// Display format timestamps are matched against
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Which field of an item matched. Variants are in match precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Text,
    Created,
    Modified,
    Validated,
}

impl MatchField {
    pub fn label(self) -> &'static str {
        match self {
            MatchField::Text => "text",
            MatchField::Created => "created",
            MatchField::Modified => "modified",
            MatchField::Validated => "validated",
        }
    }
}

/// One matching item. Each item yields at most one hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub list_id: String,
    pub list_name: String,
    pub item_id: String,
    pub text: String,
    pub field: MatchField,
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Search every visible list for `query`, case-insensitively, against item
/// text and the formatted timestamps. A blank query matches nothing.
pub fn search(store: &Store, query: &str) -> Vec<SearchHit> {
    search_lists(store.get_all_lists(), query)
}

pub fn search_lists<'a>(lists: impl IntoIterator<Item = &'a TodoList>, query: &str) -> Vec<SearchHit> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut hits = Vec::new();
    for list in lists {
        for item in &list.items {
            if let Some(field) = match_item(item, &needle) {
                hits.push(SearchHit {
                    list_id: list.id.clone(),
                    list_name: list.name.clone(),
                    item_id: item.id.clone(),
                    text: item.text.clone(),
                    field,
                });
            }
        }
    }
    hits
}

/// First matching field of an item. `needle` must already be lowercase.
fn match_item(item: &Item, needle: &str) -> Option<MatchField> {
    if item.text.to_lowercase().contains(needle) {
        return Some(MatchField::Text);
    }
    if timestamp_matches(&item.created_at, needle) {
        return Some(MatchField::Created);
    }
    if item.was_modified() && timestamp_matches(&item.modified_at, needle) {
        return Some(MatchField::Modified);
    }
    if let Some(validated) = &item.validated_at
        && timestamp_matches(validated, needle)
    {
        return Some(MatchField::Validated);
    }
    None
}

fn timestamp_matches(ts: &NaiveDateTime, needle: &str) -> bool {
    format_timestamp(ts).contains(needle)
}
