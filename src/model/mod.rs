pub mod item;
pub mod list;
pub mod settings;
pub mod data;

pub use item::*;
pub use list::*;
pub use settings::*;
pub use data::*;
