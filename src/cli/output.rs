use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::item::Item;
use crate::model::list::TodoList;
use crate::model::settings::Settings;
use crate::ops::search::{SearchHit, format_timestamp};
use crate::util::unicode::{pad_to_width, single_line, truncate_to_width};

/// Widest item text shown in listings and search results
const TEXT_WIDTH: usize = 60;
/// Characters of an id shown in human output
const SHORT_ID_LEN: usize = 8;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListSummaryJson {
    pub id: String,
    pub name: String,
    pub color: String,
    pub items: usize,
    pub validated: usize,
    pub current: bool,
}

#[derive(Serialize)]
pub struct ItemJson {
    pub position: usize,
    pub id: String,
    pub text: String,
    pub created_at: String,
    pub modified_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<String>,
    pub is_validated: bool,
}

#[derive(Serialize)]
pub struct ListDetailJson {
    pub id: String,
    pub name: String,
    pub color: String,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub list_id: String,
    pub list: String,
    pub item_id: String,
    pub text: String,
    pub field: &'static str,
}

#[derive(Serialize)]
pub struct ClipboardStatusJson {
    pub enabled: bool,
    pub entries: Option<usize>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn list_summary_json(list: &TodoList, current: bool) -> ListSummaryJson {
    ListSummaryJson {
        id: list.id.clone(),
        name: list.name.clone(),
        color: list.color.clone(),
        items: list.items.len(),
        validated: list.validated_count(),
        current,
    }
}

fn iso(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

pub fn item_to_json(position: usize, item: &Item) -> ItemJson {
    ItemJson {
        position,
        id: item.id.clone(),
        text: item.text.clone(),
        created_at: iso(&item.created_at),
        modified_at: iso(&item.modified_at),
        validated_at: item.validated_at.as_ref().map(iso),
        is_validated: item.is_validated(),
    }
}

pub fn list_detail_json(list: &TodoList) -> ListDetailJson {
    ListDetailJson {
        id: list.id.clone(),
        name: list.name.clone(),
        color: list.color.clone(),
        items: list
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| item_to_json(i + 1, item))
            .collect(),
    }
}

pub fn search_hit_json(hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        list_id: hit.list_id.clone(),
        list: hit.list_name.clone(),
        item_id: hit.item_id.clone(),
        text: hit.text.clone(),
        field: hit.field.label(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

fn check_char(item: &Item) -> char {
    if item.is_validated() { 'x' } else { ' ' }
}

/// One row per list: marker for the current one, short id, name, counts
pub fn format_list_line(list: &TodoList, current: bool) -> String {
    let marker = if current { '*' } else { ' ' };
    format!(
        "{} {}  {}  {}  {}/{}",
        marker,
        pad_to_width(short_id(&list.id), SHORT_ID_LEN),
        pad_to_width(&list.name, 20),
        list.color,
        list.validated_count(),
        list.items.len(),
    )
}

/// `  3. [x] text  (id)`
pub fn format_item_line(position: usize, item: &Item) -> String {
    format!(
        "{:>3}. [{}] {}  ({})",
        position,
        check_char(item),
        truncate_to_width(&single_line(&item.text), TEXT_WIDTH),
        short_id(&item.id),
    )
}

/// Header plus every item of a list
pub fn format_list_detail(list: &TodoList) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", list.name, list.color)];
    if list.items.is_empty() {
        lines.push("  (empty)".to_string());
    }
    for (i, item) in list.items.iter().enumerate() {
        lines.push(format_item_line(i + 1, item));
    }
    lines
}

/// Text and timestamps of a single item
pub fn format_item_detail(item: &Item) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}", check_char(item), item.text),
        format!("id:        {}", item.id),
        format!("created:   {}", format_timestamp(&item.created_at)),
    ];
    if item.was_modified() {
        lines.push(format!("modified:  {}", format_timestamp(&item.modified_at)));
    }
    if let Some(validated) = &item.validated_at {
        lines.push(format!("validated: {}", format_timestamp(validated)));
    }
    lines
}

/// `[List] text (field)`
pub fn format_search_hit(hit: &SearchHit) -> String {
    format!(
        "[{}] {} ({})",
        hit.list_name,
        truncate_to_width(&single_line(&hit.text), TEXT_WIDTH),
        hit.field.label(),
    )
}

pub fn format_settings(settings: &Settings, current_name: Option<&str>) -> Vec<String> {
    vec![
        format!(
            "clipboard: {}",
            if settings.clipboard_enabled { "on" } else { "off" }
        ),
        format!(
            "window:    {} at {},{}",
            if settings.window_visible { "visible" } else { "hidden" },
            settings.window_position.0,
            settings.window_position.1,
        ),
        format!("current:   {}", current_name.unwrap_or("(none)")),
    ]
}
