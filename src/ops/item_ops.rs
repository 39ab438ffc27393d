use tracing::debug;

use crate::model::item::Item;
use crate::model::list::TodoList;
use crate::store::Store;

/// Error type for item operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ItemOpError {
    #[error("list not found: {0}")]
    ListNotFound(String),
    #[error("item not found: {0}")]
    ItemNotFound(String),
    #[error("item reference is ambiguous: {0}")]
    AmbiguousItem(String),
    #[error("item text cannot be empty")]
    EmptyText,
}

/// What the single action button did to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Validated,
    Removed,
}

fn list_mut<'a>(store: &'a mut Store, list_id: &str) -> Result<&'a mut TodoList, ItemOpError> {
    store
        .get_list_mut(list_id)
        .ok_or_else(|| ItemOpError::ListNotFound(list_id.to_string()))
}

fn item_mut<'a>(
    store: &'a mut Store,
    list_id: &str,
    item_id: &str,
) -> Result<&'a mut Item, ItemOpError> {
    list_mut(store, list_id)?
        .get_item_mut(item_id)
        .ok_or_else(|| ItemOpError::ItemNotFound(item_id.to_string()))
}

/// Add a trimmed item to the end of a list. Returns the new item id.
pub fn add_item(store: &mut Store, list_id: &str, text: &str) -> Result<String, ItemOpError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ItemOpError::EmptyText);
    }
    let id = list_mut(store, list_id)?.add_item(text).id.clone();
    debug!(list = list_id, item = %id, "item added");
    store.save();
    Ok(id)
}

/// Replace an item's text. Identical text leaves the item (and its
/// `modified_at`) alone and skips the save.
pub fn update_item_text(
    store: &mut Store,
    list_id: &str,
    item_id: &str,
    text: &str,
) -> Result<(), ItemOpError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ItemOpError::EmptyText);
    }
    let item = item_mut(store, list_id, item_id)?;
    if item.text == text {
        return Ok(());
    }
    item.update_text(text);
    store.save();
    Ok(())
}

pub fn validate_item(store: &mut Store, list_id: &str, item_id: &str) -> Result<(), ItemOpError> {
    item_mut(store, list_id, item_id)?.validate();
    store.save();
    Ok(())
}

pub fn unvalidate_item(store: &mut Store, list_id: &str, item_id: &str) -> Result<(), ItemOpError> {
    item_mut(store, list_id, item_id)?.unvalidate();
    store.save();
    Ok(())
}

/// Remove an item. An unknown item id is not an error; an unknown list is.
pub fn remove_item(store: &mut Store, list_id: &str, item_id: &str) -> Result<bool, ItemOpError> {
    let removed = list_mut(store, list_id)?.remove_item(item_id);
    store.save();
    Ok(removed)
}

/// The list window's action button: clipboard entries and already
/// validated items are removed, anything else is validated.
pub fn item_action(
    store: &mut Store,
    list_id: &str,
    item_id: &str,
) -> Result<ItemAction, ItemOpError> {
    let list = list_mut(store, list_id)?;
    let is_clipboard = list.is_clipboard();
    let item = list
        .get_item_mut(item_id)
        .ok_or_else(|| ItemOpError::ItemNotFound(item_id.to_string()))?;

    let action = if is_clipboard || item.is_validated() {
        list.remove_item(item_id);
        ItemAction::Removed
    } else {
        item.validate();
        ItemAction::Validated
    };
    store.save();
    Ok(action)
}

/// Resolve an item reference within a list: exact id, 1-based position,
/// then unique id prefix.
pub fn find_item_ref<'a>(list: &'a TodoList, reference: &str) -> Result<&'a Item, ItemOpError> {
    if let Some(item) = list.get_item(reference) {
        return Ok(item);
    }
    if let Ok(pos) = reference.parse::<usize>()
        && pos >= 1
        && let Some(item) = list.items.get(pos - 1)
    {
        return Ok(item);
    }
    let mut matches = list.items.iter().filter(|i| i.id.starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(item), None) if !reference.is_empty() => Ok(item),
        (Some(_), Some(_)) => Err(ItemOpError::AmbiguousItem(reference.to_string())),
        _ => Err(ItemOpError::ItemNotFound(reference.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::list::CLIPBOARD_LIST_ID;
    use tempfile::TempDir;

    fn store_with_list() -> (TempDir, Store, String) {
        let dir = TempDir::new().unwrap();
        let mut store = Store::new(dir.path().join("data.json"));
        let id = store.add_list("Work", "#FF0000").id.clone();
        (dir, store, id)
    }

    #[test]
    fn add_item_trims_and_persists() {
        let (_dir, mut store, list) = store_with_list();
        let item = add_item(&mut store, &list, "  buy milk \n").unwrap();
        let reloaded = Store::open(store.path());
        let saved = reloaded.get_list(&list).unwrap().get_item(&item).unwrap();
        assert_eq!(saved.text, "buy milk");
    }

    #[test]
    fn add_item_rejects_blank_text() {
        let (_dir, mut store, list) = store_with_list();
        assert_eq!(add_item(&mut store, &list, " \t "), Err(ItemOpError::EmptyText));
        assert!(store.get_list(&list).unwrap().items.is_empty());
    }

    #[test]
    fn add_item_unknown_list() {
        let (_dir, mut store, _) = store_with_list();
        assert_eq!(
            add_item(&mut store, "nope", "x"),
            Err(ItemOpError::ListNotFound("nope".into()))
        );
    }

    #[test]
    fn update_same_text_does_not_bump_modified_at() {
        let (_dir, mut store, list) = store_with_list();
        let item = add_item(&mut store, &list, "draft").unwrap();
        let before = store.get_list(&list).unwrap().get_item(&item).unwrap().clone();
        update_item_text(&mut store, &list, &item, " draft ").unwrap();
        let after = store.get_list(&list).unwrap().get_item(&item).unwrap();
        assert_eq!(after.modified_at, before.modified_at);
    }

    #[test]
    fn update_text_changes_text() {
        let (_dir, mut store, list) = store_with_list();
        let item = add_item(&mut store, &list, "draft").unwrap();
        update_item_text(&mut store, &list, &item, "final").unwrap();
        let after = store.get_list(&list).unwrap().get_item(&item).unwrap();
        assert_eq!(after.text, "final");
        assert!(after.modified_at >= after.created_at);
        assert_eq!(
            update_item_text(&mut store, &list, &item, ""),
            Err(ItemOpError::EmptyText)
        );
    }

    #[test]
    fn validate_then_unvalidate() {
        let (_dir, mut store, list) = store_with_list();
        let item = add_item(&mut store, &list, "a").unwrap();
        validate_item(&mut store, &list, &item).unwrap();
        assert!(Store::open(store.path()).get_list(&list).unwrap().items[0].is_validated());
        unvalidate_item(&mut store, &list, &item).unwrap();
        assert!(!Store::open(store.path()).get_list(&list).unwrap().items[0].is_validated());
        assert_eq!(
            validate_item(&mut store, &list, "missing"),
            Err(ItemOpError::ItemNotFound("missing".into()))
        );
    }

    #[test]
    fn action_validates_then_removes() {
        let (_dir, mut store, list) = store_with_list();
        let item = add_item(&mut store, &list, "a").unwrap();
        assert_eq!(item_action(&mut store, &list, &item), Ok(ItemAction::Validated));
        assert_eq!(item_action(&mut store, &list, &item), Ok(ItemAction::Removed));
        assert!(store.get_list(&list).unwrap().items.is_empty());
    }

    #[test]
    fn action_on_clipboard_list_removes_directly() {
        let (_dir, mut store, _) = store_with_list();
        store.enable_clipboard();
        let item = add_item(&mut store, CLIPBOARD_LIST_ID, "copied").unwrap();
        assert_eq!(
            item_action(&mut store, CLIPBOARD_LIST_ID, &item),
            Ok(ItemAction::Removed)
        );
    }

    #[test]
    fn remove_unknown_item_is_not_an_error() {
        let (_dir, mut store, list) = store_with_list();
        add_item(&mut store, &list, "a").unwrap();
        assert_eq!(remove_item(&mut store, &list, "missing"), Ok(false));
        assert_eq!(store.get_list(&list).unwrap().items.len(), 1);
    }

    #[test]
    fn find_item_by_id_position_and_prefix() {
        let mut list = TodoList::new("Work", "#FF0000");
        list.add_item("a");
        list.add_item("b");
        list.items[0].id = "abc123".into();
        list.items[1].id = "abd456".into();

        assert_eq!(find_item_ref(&list, "abd456").unwrap().text, "b");
        assert_eq!(find_item_ref(&list, "1").unwrap().text, "a");
        assert_eq!(find_item_ref(&list, "abc").unwrap().text, "a");
        assert_eq!(
            find_item_ref(&list, "ab").unwrap_err(),
            ItemOpError::AmbiguousItem("ab".into())
        );
        assert!(find_item_ref(&list, "3").is_err());
        assert!(find_item_ref(&list, "").is_err());
    }
}
