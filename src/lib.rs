pub mod cli;
pub mod clipboard;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod store;
pub mod util;
