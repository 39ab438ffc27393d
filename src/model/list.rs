use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::Item;

/// Reserved id of the synthetic list fed by clipboard capture
pub const CLIPBOARD_LIST_ID: &str = "clipboard_list";
/// Display name given to a freshly synthesized clipboard list
pub const CLIPBOARD_LIST_NAME: &str = "ClipBoard";
/// Color given to a freshly synthesized clipboard list
pub const CLIPBOARD_LIST_COLOR: &str = "#808080";
/// Color offered for new lists when none is chosen
pub const DEFAULT_LIST_COLOR: &str = "#FF5733";

/// A named, colored, ordered list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: String,
    pub name: String,
    /// `#RRGGBB`, only used for rendering
    pub color: String,
    /// Insertion order is display order
    #[serde(default)]
    pub items: Vec<Item>,
}

impl TodoList {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, color)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        TodoList {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            items: Vec::new(),
        }
    }

    /// A fresh, empty clipboard list
    pub fn clipboard() -> Self {
        Self::with_id(CLIPBOARD_LIST_ID, CLIPBOARD_LIST_NAME, CLIPBOARD_LIST_COLOR)
    }

    pub fn is_clipboard(&self) -> bool {
        self.id == CLIPBOARD_LIST_ID
    }

    /// Append a new item and return it so callers can see its id
    pub fn add_item(&mut self, text: impl Into<String>) -> &Item {
        self.items.push(Item::new(text));
        &self.items[self.items.len() - 1]
    }

    /// Remove the item with this id. Returns whether anything was removed;
    /// an unknown id is not an error.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        match self.items.iter().position(|i| i.id == item_id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn get_item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn get_item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Whether any item already carries exactly this text
    pub fn contains_text(&self, text: &str) -> bool {
        self.items.iter().any(|i| i.text == text)
    }

    pub fn validated_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_validated()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_item_appends_and_returns_item() {
        let mut list = TodoList::new("Work", "#FF0000");
        let first = list.add_item("buy milk").id.clone();
        let second = list.add_item("call bob").id.clone();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].id, first);
        assert_eq!(list.items[1].id, second);
        assert_eq!(list.items[1].text, "call bob");
    }

    #[test]
    fn remove_item_unknown_id_is_noop() {
        let mut list = TodoList::new("Work", "#FF0000");
        list.add_item("a");
        assert!(!list.remove_item("nope"));
        assert_eq!(list.items.len(), 1);
    }

    #[test]
    fn remove_item_removes_only_that_item() {
        let mut list = TodoList::new("Work", "#FF0000");
        let a = list.add_item("a").id.clone();
        list.add_item("b");
        assert!(list.remove_item(&a));
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].text, "b");
        assert!(list.get_item(&a).is_none());
    }

    #[test]
    fn get_item_mut_allows_validation() {
        let mut list = TodoList::new("Work", "#FF0000");
        let id = list.add_item("a").id.clone();
        list.get_item_mut(&id).unwrap().validate();
        assert_eq!(list.validated_count(), 1);
    }

    #[test]
    fn clipboard_list_uses_reserved_id() {
        let list = TodoList::clipboard();
        assert!(list.is_clipboard());
        assert_eq!(list.name, "ClipBoard");
        assert_eq!(list.color, "#808080");
        assert!(!TodoList::new("x", "#000000").is_clipboard());
    }

    #[test]
    fn round_trip_preserves_item_order() {
        let mut list = TodoList::new("Work", "#FF0000");
        for text in ["one", "two", "three"] {
            list.add_item(text);
        }
        list.items[1].validate();
        let json = serde_json::to_string(&list).unwrap();
        let back: TodoList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn missing_items_defaults_to_empty() {
        let list: TodoList =
            serde_json::from_str(r##"{"id":"l1","name":"Home","color":"#00FF00"}"##).unwrap();
        assert!(list.items.is_empty());
    }
}
