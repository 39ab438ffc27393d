use std::sync::LazyLock;

use regex::Regex;

use crate::model::list::{CLIPBOARD_LIST_ID, TodoList};
use crate::store::Store;

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern is valid"));

/// Error type for list lookups and list edits
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ListOpError {
    #[error("list not found: {0}")]
    NotFound(String),
    #[error("list reference is ambiguous: {0} (matches {1})")]
    Ambiguous(String, String),
    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),
    #[error("list name cannot be empty")]
    EmptyName,
    #[error("the clipboard list cannot be removed; turn clipboard capture off instead")]
    ClipboardList,
}

/// `#RRGGBB`, any case
pub fn is_valid_color(color: &str) -> bool {
    COLOR_RE.is_match(color)
}

/// Normalize a color to uppercase `#RRGGBB`
pub fn normalize_color(color: &str) -> Result<String, ListOpError> {
    let color = color.trim();
    if !is_valid_color(color) {
        return Err(ListOpError::InvalidColor(color.to_string()));
    }
    Ok(color.to_ascii_uppercase())
}

/// Resolve a visible list by exact id, `clipboard`, case-insensitive name,
/// then unique id prefix.
pub fn find_list_ref<'a>(store: &'a Store, reference: &str) -> Result<&'a TodoList, ListOpError> {
    let reference = reference.trim();
    let all = store.get_all_lists();

    if let Some(list) = all.iter().copied().find(|l| l.id == reference) {
        return Ok(list);
    }
    if reference.eq_ignore_ascii_case("clipboard")
        && let Some(list) = all.iter().copied().find(|l| l.is_clipboard())
    {
        return Ok(list);
    }

    let lowered = reference.to_lowercase();
    let by_name: Vec<&TodoList> = all
        .iter()
        .copied()
        .filter(|l| l.name.to_lowercase() == lowered)
        .collect();
    match by_name.as_slice() {
        [list] => return Ok(*list),
        [] => {}
        _ => return Err(ambiguous(reference, &by_name)),
    }

    if reference.is_empty() {
        return Err(ListOpError::NotFound(reference.to_string()));
    }
    let by_prefix: Vec<&TodoList> = all
        .iter()
        .copied()
        .filter(|l| l.id.starts_with(reference))
        .collect();
    match by_prefix.as_slice() {
        [list] => Ok(*list),
        [] => Err(ListOpError::NotFound(reference.to_string())),
        _ => Err(ambiguous(reference, &by_prefix)),
    }
}

fn ambiguous(reference: &str, lists: &[&TodoList]) -> ListOpError {
    let names = lists
        .iter()
        .map(|l| format!("{} ({})", l.name, l.id))
        .collect::<Vec<_>>()
        .join(", ");
    ListOpError::Ambiguous(reference.to_string(), names)
}

/// Create a list with a validated color; a blank name gets the default
/// `List N` name. Returns the new list id.
pub fn create_list(store: &mut Store, name: Option<&str>, color: &str) -> Result<String, ListOpError> {
    let color = normalize_color(color)?;
    let name = match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => store.next_default_list_name(),
    };
    Ok(store.add_list(name, color).id.clone())
}

pub fn delete_list(store: &mut Store, list_id: &str) -> Result<(), ListOpError> {
    if list_id == CLIPBOARD_LIST_ID {
        return Err(ListOpError::ClipboardList);
    }
    store.remove_list(list_id);
    Ok(())
}

pub fn rename(store: &mut Store, list_id: &str, name: &str) -> Result<(), ListOpError> {
    if name.trim().is_empty() {
        return Err(ListOpError::EmptyName);
    }
    if !store.rename_list(list_id, name) {
        return Err(ListOpError::NotFound(list_id.to_string()));
    }
    Ok(())
}

pub fn recolor(store: &mut Store, list_id: &str, color: &str) -> Result<(), ListOpError> {
    let color = normalize_color(color)?;
    if !store.set_list_color(list_id, &color) {
        return Err(ListOpError::NotFound(list_id.to_string()));
    }
    Ok(())
}
