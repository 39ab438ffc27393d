use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current local time, truncated to the microseconds every item timestamp
/// is stored at.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// A single entry in a list
///
/// The validated flag is derived from `validated_at`, so an item can never
/// claim to be validated without a validation timestamp (or the reverse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    pub id: String,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
    pub validated_at: Option<NaiveDateTime>,
}

impl Item {
    /// Create a fresh, unvalidated item with a new id
    pub fn new(text: impl Into<String>) -> Self {
        let created_at = now();
        Item {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            created_at,
            modified_at: created_at,
            validated_at: None,
        }
    }

    pub fn is_validated(&self) -> bool {
        self.validated_at.is_some()
    }

    /// Replace the text and bump `modified_at`.
    ///
    /// Blank text is not rejected here; callers filter it first.
    pub fn update_text(&mut self, new_text: impl Into<String>) {
        self.text = new_text.into();
        // Local clocks can step backwards; modified_at must not.
        self.modified_at = now().max(self.modified_at);
    }

    pub fn validate(&mut self) {
        self.validated_at = Some(now());
    }

    pub fn unvalidate(&mut self) {
        self.validated_at = None;
    }

    /// Whether `modified_at` carries information beyond `created_at`
    pub fn was_modified(&self) -> bool {
        self.modified_at != self.created_at
    }
}

/// On-disk shape of an item.
///
/// `id` and `text` are required. Defaults for the rest:
/// - `created_at`: the time of loading
/// - `modified_at`: `created_at`
/// - `validated_at`: null
/// - `is_validated`: false
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemRecord {
    id: String,
    text: String,
    #[serde(default)]
    created_at: Option<NaiveDateTime>,
    #[serde(default)]
    modified_at: Option<NaiveDateTime>,
    #[serde(default)]
    validated_at: Option<NaiveDateTime>,
    #[serde(default)]
    is_validated: bool,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let created_at = record.created_at.unwrap_or_else(now);
        let modified_at = record.modified_at.unwrap_or(created_at);
        // The flag is authoritative; a flagged record without a timestamp
        // falls back to its last modification.
        let validated_at = if record.is_validated {
            Some(record.validated_at.unwrap_or(modified_at))
        } else {
            None
        };
        Item {
            id: record.id,
            text: record.text,
            created_at,
            modified_at,
            validated_at,
        }
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        ItemRecord {
            is_validated: item.validated_at.is_some(),
            id: item.id,
            text: item.text,
            created_at: Some(item.created_at),
            modified_at: Some(item.modified_at),
            validated_at: item.validated_at,
        }
    }
}
