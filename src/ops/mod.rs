pub mod item_ops;
pub mod list_ops;
pub mod search;
