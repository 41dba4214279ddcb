//! Command implementations for the CLI interface.
//!
//! Every mutating command goes through the same `TodoList` / `EditScreen`
//! logic the TUI uses, so the stored list looks the same whichever surface
//! changed it.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::persist::PersistHandle;
use crate::theme::ThemeContext;
use crate::todos::TodoList;
use crate::tui::edit_screen::EditScreen;
use crate::tui::enums::Route;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui {
        /// Start at a route: "/" or "/todos/<id>".
        #[arg(long, default_value = "/")]
        route: String,
    },

    /// Add a new task.
    Add {
        /// Task title.
        title: String,
    },

    /// Print tasks in list order.
    List,

    /// Flip a task between open and done.
    Toggle {
        id: u64,
    },

    /// Delete a task.
    Remove {
        id: u64,
    },

    /// Rename a task.
    Edit {
        /// Task id.
        id: String,
        /// New title (at most 30 characters are kept).
        title: String,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(persist: PersistHandle, theme: ThemeContext, route: &str) {
    let Some(route) = Route::parse(route) else {
        eprintln!("Unknown route '{route}'. Use \"/\" or \"/todos/<id>\".");
        std::process::exit(1);
    };
    if let Err(e) = run_tui(persist.clone(), theme, route) {
        eprintln!("UI error: {e}");
        persist.flush();
        std::process::exit(1);
    }
}

/// Add a task and print its id.
pub fn cmd_add(persist: PersistHandle, title: &str) {
    let mut todos = TodoList::initialize(persist);
    match todos.add(title) {
        Some(id) => println!("Added task {id}"),
        None => println!("Nothing added: title is empty."),
    }
}

/// Print every task in list order.
pub fn cmd_list(persist: PersistHandle) {
    let todos = TodoList::initialize(persist);
    println!("{:<5} {:<5} {}", "ID", "Done", "Title");
    for t in todos.tasks() {
        let done = if t.completed { "[x]" } else { "[ ]" };
        println!("{:<5} {:<5} {}", t.id, done, t.title);
    }
    println!("{} open of {}", todos.remaining(), todos.len());
}

/// Toggle a task's completed flag.
pub fn cmd_toggle(persist: PersistHandle, id: u64) {
    let mut todos = TodoList::initialize(persist);
    if !todos.toggle(id) {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    }
    let state = match todos.get(id) {
        Some(t) if t.completed => "done",
        _ => "open",
    };
    println!("Task {id} is now {state}.");
}

/// Delete a task.
pub fn cmd_remove(persist: PersistHandle, id: u64) {
    let mut todos = TodoList::initialize(persist);
    if !todos.remove(id) {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    }
    println!("Deleted task {id}.");
}

/// Rename a task with the edit screen's save semantics.
pub fn cmd_edit(persist: PersistHandle, id: &str, title: &str) {
    let mut screen = EditScreen::mount(persist, id);
    screen.set_title(title);
    if !screen.save() {
        eprintln!("Task {id} not found.");
        std::process::exit(1);
    }
    println!("Saved task {id}: {}", screen.title());
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
