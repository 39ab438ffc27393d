use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dfr", about = concat!("deskfriend v", env!("CARGO_PKG_VERSION"), " - sticky lists for your desktop"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data file (default: $DESKFRIEND_DATA, then the XDG data dir)
    #[arg(short = 'f', long = "data-file", global = true)]
    pub data_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all visible lists
    Lists,
    /// Create, remove, rename, recolor or open a list
    List(ListCmd),
    /// Show the items of a list (default: the current list), or one item
    Show(ShowArgs),
    /// Add an item to the end of a list
    Add(AddArgs),
    /// Change an item's text
    Edit(EditArgs),
    /// Mark an item validated
    Check(ItemArgs),
    /// Clear an item's validated mark
    Uncheck(ItemArgs),
    /// Press an item's action button: validate it, or remove it if already
    /// validated (clipboard entries are always removed)
    Done(ItemArgs),
    /// Remove an item
    Rm(ItemArgs),
    /// Copy an item's text to the system clipboard
    Copy(ItemArgs),
    /// Search every visible list by text or date
    Search(SearchArgs),
    /// Clipboard capture
    Clipboard(ClipboardCmd),
    /// Window visibility and position
    Window(WindowCmd),
    /// Show current settings
    Settings,
}

// ---------------------------------------------------------------------------
// List management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListCmd {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a list
    New(ListNewArgs),
    /// Remove a list and all its items
    Rm(ListRefArg),
    /// Rename a list
    Rename(ListRenameArgs),
    /// Change a list's color
    Color(ListColorArgs),
    /// Make a list the current one
    Open(ListRefArg),
}

#[derive(Args)]
pub struct ListNewArgs {
    /// List name (default: "List N")
    pub name: Option<String>,
    /// Color as #RRGGBB
    #[arg(long, default_value = crate::model::list::DEFAULT_LIST_COLOR)]
    pub color: String,
}

#[derive(Args)]
pub struct ListRefArg {
    /// List id, id prefix, or name
    pub list: String,
}

#[derive(Args)]
pub struct ListRenameArgs {
    /// List id, id prefix, or name
    pub list: String,
    /// New name
    pub name: String,
}

#[derive(Args)]
pub struct ListColorArgs {
    /// List id, id prefix, or name
    pub list: String,
    /// Color as #RRGGBB
    pub color: String,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// List id, id prefix, or name
    pub list: Option<String>,
    /// Show one item's text and timestamps (id, id prefix, or 1-based position)
    pub item: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// List id, id prefix, or name
    pub list: String,
    /// Item text
    pub text: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// List id, id prefix, or name
    pub list: String,
    /// Item id, id prefix, or 1-based position
    pub item: String,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct ItemArgs {
    /// List id, id prefix, or name
    pub list: String,
    /// Item id, id prefix, or 1-based position
    pub item: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text, or part of a DD/MM/YYYY HH:MM:SS timestamp
    pub query: String,
}

// ---------------------------------------------------------------------------
// Clipboard and window
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ClipboardCmd {
    #[command(subcommand)]
    pub action: ClipboardAction,
}

#[derive(Subcommand)]
pub enum ClipboardAction {
    /// Enable capture (creates the clipboard list if needed)
    On,
    /// Disable capture (the list is hidden, not deleted)
    Off,
    /// Show whether capture is on and how many entries are held
    Status,
    /// Watch the system clipboard and capture new text until interrupted
    Watch(WatchArgs),
}

#[derive(Args)]
pub struct WatchArgs {
    /// Milliseconds between clipboard reads
    #[arg(long, default_value = "500")]
    pub interval_ms: u64,
}

#[derive(Args)]
pub struct WindowCmd {
    #[command(subcommand)]
    pub action: WindowAction,
}

#[derive(Subcommand)]
pub enum WindowAction {
    /// Mark the list window visible
    Show,
    /// Mark the list window hidden
    Hide,
    /// Flip the window's visibility
    Toggle,
    /// Set the window position
    Move(MoveArgs),
    /// Show visibility and position
    Status,
}

#[derive(Args)]
pub struct MoveArgs {
    #[arg(allow_negative_numbers = true)]
    pub x: i32,
    #[arg(allow_negative_numbers = true)]
    pub y: i32,
}
