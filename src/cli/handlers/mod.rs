use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::clipboard::backend::{ChangeMonitor, system_clipboard};
use crate::clipboard::watcher::{CaptureOutcome, ClipboardEvent, ClipboardWatcher};
use crate::io::data_io;
use crate::model::list::CLIPBOARD_LIST_ID;
use crate::ops::item_ops::{self, ItemAction};
use crate::ops::{list_ops, search};
use crate::store::Store;
use crate::util::unicode::{single_line, truncate_to_width};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let mut store = open_store(cli.data_file.as_deref());

    match cli.command {
        // No subcommand → what the list window would show
        None => cmd_show(&store, ShowArgs { list: None, item: None }, json),
        Some(cmd) => match cmd {
            // Read commands
            Commands::Lists => cmd_lists(&store, json),
            Commands::Show(args) => cmd_show(&store, args, json),
            Commands::Search(args) => cmd_search(&store, args, json),
            Commands::Settings => cmd_settings(&store, json),

            // Write commands
            Commands::List(args) => cmd_list(&mut store, args),
            Commands::Add(args) => cmd_add(&mut store, args),
            Commands::Edit(args) => cmd_edit(&mut store, args),
            Commands::Check(args) => cmd_check(&mut store, args, true),
            Commands::Uncheck(args) => cmd_check(&mut store, args, false),
            Commands::Done(args) => cmd_done(&mut store, args),
            Commands::Rm(args) => cmd_rm(&mut store, args),
            Commands::Copy(args) => cmd_copy(&store, args),

            // Clipboard and window
            Commands::Clipboard(args) => cmd_clipboard(&mut store, args, json),
            Commands::Window(args) => cmd_window(&mut store, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_store(data_file: Option<&Path>) -> Store {
    let path = data_io::resolve_data_path(data_file);
    debug!(path = %path.display(), "opening data file");
    Store::open(path)
}

/// Resolve a list reference to its id
fn list_id(store: &Store, reference: &str) -> Result<String, list_ops::ListOpError> {
    Ok(list_ops::find_list_ref(store, reference)?.id.clone())
}

/// Resolve list and item references to their ids
fn item_ids(store: &Store, list_ref: &str, item_ref: &str) -> Result<(String, String), Box<dyn std::error::Error>> {
    let list = list_ops::find_list_ref(store, list_ref)?;
    let item = item_ops::find_item_ref(list, item_ref)?;
    Ok((list.id.clone(), item.id.clone()))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_lists(store: &Store, json: bool) -> CmdResult {
    let current = store.current_list().map(|l| l.id.clone());
    let is_current = |id: &str| current.as_deref() == Some(id);

    if json {
        let lists: Vec<_> = store
            .get_all_lists()
            .into_iter()
            .map(|l| list_summary_json(l, is_current(&l.id)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&lists)?);
    } else {
        let all = store.get_all_lists();
        if all.is_empty() {
            println!("no lists yet (create one with `dfr list new <NAME>`)");
        }
        for list in all {
            println!("{}", format_list_line(list, is_current(&list.id)));
        }
    }
    Ok(())
}

fn cmd_show(store: &Store, args: ShowArgs, json: bool) -> CmdResult {
    let list = match args.list.as_deref() {
        Some(reference) => list_ops::find_list_ref(store, reference)?,
        None => match store.current_list() {
            Some(list) => list,
            None => {
                if json {
                    println!("null");
                } else {
                    println!("no lists yet (create one with `dfr list new <NAME>`)");
                }
                return Ok(());
            }
        },
    };

    if let Some(reference) = args.item.as_deref() {
        let item = item_ops::find_item_ref(list, reference)?;
        let position = list.items.iter().position(|i| i.id == item.id).unwrap_or(0) + 1;
        if json {
            println!("{}", serde_json::to_string_pretty(&item_to_json(position, item))?);
        } else {
            print_lines(&format_item_detail(item));
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&list_detail_json(list))?);
    } else {
        print_lines(&format_list_detail(list));
    }
    Ok(())
}

fn cmd_search(store: &Store, args: SearchArgs, json: bool) -> CmdResult {
    let hits = search::search(store, &args.query);
    if json {
        let hits: Vec<_> = hits.iter().map(search_hit_json).collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        for hit in &hits {
            println!("{}", format_search_hit(hit));
        }
    }
    Ok(())
}

fn cmd_settings(store: &Store, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&store.settings)?);
    } else {
        let current = store.current_list().map(|l| l.name.as_str());
        print_lines(&format_settings(&store.settings, current));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// List management
// ---------------------------------------------------------------------------

fn cmd_list(store: &mut Store, args: ListCmd) -> CmdResult {
    match args.action {
        ListAction::New(args) => {
            let id = list_ops::create_list(store, args.name.as_deref(), &args.color)?;
            println!("{}", id);
        }
        ListAction::Rm(args) => {
            let id = list_id(store, &args.list)?;
            list_ops::delete_list(store, &id)?;
        }
        ListAction::Rename(args) => {
            let id = list_id(store, &args.list)?;
            list_ops::rename(store, &id, &args.name)?;
        }
        ListAction::Color(args) => {
            let id = list_id(store, &args.list)?;
            list_ops::recolor(store, &id, &args.color)?;
        }
        ListAction::Open(args) => {
            let id = list_id(store, &args.list)?;
            store.set_current_list(&id);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Item handlers
// ---------------------------------------------------------------------------

fn cmd_add(store: &mut Store, args: AddArgs) -> CmdResult {
    let list = list_id(store, &args.list)?;
    let item = item_ops::add_item(store, &list, &args.text)?;
    println!("{}", item);
    Ok(())
}

fn cmd_edit(store: &mut Store, args: EditArgs) -> CmdResult {
    let (list, item) = item_ids(store, &args.list, &args.item)?;
    item_ops::update_item_text(store, &list, &item, &args.text)?;
    Ok(())
}

fn cmd_check(store: &mut Store, args: ItemArgs, validated: bool) -> CmdResult {
    let (list, item) = item_ids(store, &args.list, &args.item)?;
    if validated {
        item_ops::validate_item(store, &list, &item)?;
    } else {
        item_ops::unvalidate_item(store, &list, &item)?;
    }
    Ok(())
}

fn cmd_done(store: &mut Store, args: ItemArgs) -> CmdResult {
    let (list, item) = item_ids(store, &args.list, &args.item)?;
    match item_ops::item_action(store, &list, &item)? {
        ItemAction::Validated => println!("validated"),
        ItemAction::Removed => println!("removed"),
    }
    Ok(())
}

fn cmd_rm(store: &mut Store, args: ItemArgs) -> CmdResult {
    let (list, item) = item_ids(store, &args.list, &args.item)?;
    item_ops::remove_item(store, &list, &item)?;
    Ok(())
}

fn cmd_copy(store: &Store, args: ItemArgs) -> CmdResult {
    let list = list_ops::find_list_ref(store, &args.list)?;
    let item = item_ops::find_item_ref(list, &args.item)?;
    let mut clipboard = system_clipboard()?;
    clipboard.write_text(&item.text)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Clipboard
// ---------------------------------------------------------------------------

fn cmd_clipboard(store: &mut Store, args: ClipboardCmd, json: bool) -> CmdResult {
    match args.action {
        ClipboardAction::On => store.enable_clipboard(),
        ClipboardAction::Off => store.disable_clipboard(),
        ClipboardAction::Status => {
            let enabled = store.settings.clipboard_enabled;
            let entries = store.get_list(CLIPBOARD_LIST_ID).map(|l| l.items.len());
            if json {
                let status = ClipboardStatusJson { enabled, entries };
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!(
                    "clipboard capture: {} ({} entries)",
                    if enabled { "on" } else { "off" },
                    entries.unwrap_or(0)
                );
            }
        }
        ClipboardAction::Watch(args) => return cmd_clipboard_watch(store, args),
    }
    Ok(())
}

/// Poll the system clipboard and feed every change to the watcher.
/// Runs until interrupted or until capture is turned off.
fn cmd_clipboard_watch(store: &mut Store, args: WatchArgs) -> CmdResult {
    if !store.settings.clipboard_enabled {
        return Err("clipboard capture is off (run `dfr clipboard on` first)".into());
    }
    let mut source = system_clipboard()?;
    let interval = Duration::from_millis(args.interval_ms.max(50));

    let mut watcher = ClipboardWatcher::new();
    let events = watcher.subscribe();
    let mut monitor = ChangeMonitor::new();
    monitor.prime(source.as_mut());
    watcher.start();
    info!(interval_ms = interval.as_millis() as u64, "watching clipboard");

    loop {
        thread::sleep(interval);
        if !monitor.poll(source.as_mut()) {
            continue;
        }
        // Other dfr commands may have written the file since the last change
        if watcher.on_shared_clipboard_changed(store, source.as_mut()) == CaptureOutcome::Disabled {
            info!("clipboard capture turned off, stopping");
            return Ok(());
        }
        for event in events.try_iter() {
            match event {
                ClipboardEvent::Captured { text, .. } => {
                    println!("+ {}", truncate_to_width(&single_line(&text), 60));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

fn cmd_window(store: &mut Store, args: WindowCmd, json: bool) -> CmdResult {
    match args.action {
        WindowAction::Show => store.set_window_visible(true),
        WindowAction::Hide => store.set_window_visible(false),
        WindowAction::Toggle => {
            let visible = store.toggle_window_visible();
            println!("{}", if visible { "visible" } else { "hidden" });
        }
        WindowAction::Move(args) => store.set_window_position(args.x, args.y),
        WindowAction::Status => {
            let settings = &store.settings;
            if json {
                let status = serde_json::json!({
                    "visible": settings.window_visible,
                    "position": [settings.window_position.0, settings.window_position.1],
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!(
                    "{} at {},{}",
                    if settings.window_visible { "visible" } else { "hidden" },
                    settings.window_position.0,
                    settings.window_position.1
                );
            }
        }
    }
    Ok(())
}
