//! TUI entry point and terminal setup.

use std::{io, panic};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::persist::PersistHandle;
use crate::theme::ThemeContext;
use crate::tui::app::App;
use crate::tui::enums::Route;

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Run `restore` when terminal setup failed part way, then pass the result on.
fn restore_on_err<T>(
    result: io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    if result.is_err() {
        let _ = restore();
    }
    result
}

/// Initialise and run the terminal user interface starting at `route`.
pub fn run_tui(persist: PersistHandle, theme: ThemeContext, route: Route) -> io::Result<()> {
    // Mount first so the initial load finishes before any key is read.
    let mut app = App::new(persist, theme, route);

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut terminal = restore_on_err(setup_terminal(), restore_terminal)?;

    tracing::info!(
        route = %app.route(),
        scheme = app.theme().color_scheme().label(),
        "tui started"
    );
    let result = app.run(&mut terminal);

    restore_terminal()?;
    terminal.show_cursor()?;
    tracing::info!("tui stopped");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: io::Result<()> = restore_on_err(Err(io::Error::other("no tty")), || {
            restored.set(true);
            Ok(())
        });
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn successful_setup_leaves_terminal_alone() {
        let restored = Cell::new(false);
        let result = restore_on_err(Ok(7), || {
            restored.set(true);
            Ok(())
        });
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
