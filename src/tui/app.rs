//! Main application logic for the terminal user interface.
//!
//! `App` owns the current screen, the theme context and the persistence
//! handle. Navigating to a route mounts a fresh screen, so returning to `/`
//! after an edit reloads the list from storage.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::persist::PersistHandle;
use crate::theme::ThemeContext;
use crate::tui::edit_screen::EditScreen;
use crate::tui::enums::{Action, Focus, Route};
use crate::tui::list_screen::ListScreen;

enum Screen {
    List(ListScreen),
    Edit(EditScreen),
}

/// Top-level TUI state.
pub struct App {
    route: Route,
    screen: Screen,
    theme: ThemeContext,
    persist: PersistHandle,
    should_quit: bool,
}

impl App {
    /// Create the app and mount the screen for `route`.
    pub fn new(persist: PersistHandle, theme: ThemeContext, route: Route) -> Self {
        let screen = Self::mount(&persist, &route);
        App {
            route,
            screen,
            theme,
            persist,
            should_quit: false,
        }
    }

    fn mount(persist: &PersistHandle, route: &Route) -> Screen {
        match route {
            Route::List => Screen::List(ListScreen::mount(persist.clone())),
            Route::Edit(id) => Screen::Edit(EditScreen::mount(persist.clone(), id)),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Push navigation: the target screen is always mounted fresh.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");
        self.screen = Self::mount(&self.persist, &route);
        self.route = route;
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('t') => {
                    self.theme.toggle();
                    return;
                }
                _ => {}
            }
        }

        let action = match &mut self.screen {
            Screen::List(list) => list.handle_key(key),
            Screen::Edit(edit) => edit.handle_key(key),
        };
        match action {
            Action::None => {}
            Action::Navigate(route) => self.navigate(route),
            Action::Quit => self.should_quit = true,
        }
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn status_text(&self) -> String {
        let hints = match &self.screen {
            Screen::List(list) if !list.status_message().is_empty() => {
                return list.status_message().to_string();
            }
            Screen::List(list) => match list.focus() {
                Focus::Input => "Enter add | Tab list | Ctrl+T theme | Ctrl+C quit",
                Focus::List => "Space toggle | e edit | d delete | Tab input | q quit",
            },
            Screen::Edit(_) => "Enter save | Esc cancel | Ctrl+T theme",
        };
        format!("{}  {}", self.route, hints)
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let theme = self.theme.theme();
        let status = Paragraph::new(self.status_text())
            .style(Style::default().bg(theme.button).fg(theme.background));
        f.render_widget(status, area);
    }

    /// Draw the current screen and the status bar.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match &mut self.screen {
            Screen::List(list) => list.render(f, chunks[0], &self.theme),
            Screen::Edit(edit) => edit.render(f, chunks[0], &self.theme),
        }
        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop: draw, then handle input, until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit() {
            terminal.draw(|f| self.render(f))?;
            self.handle_input()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    use crate::persist::Persister;
    use crate::store::{ItemStore, MemoryBlobStore, STORAGE_KEY};
    use crate::theme::ColorScheme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn persister_with(raw: &str) -> Persister {
        let mem = MemoryBlobStore::new();
        mem.put_raw(STORAGE_KEY, raw);
        Persister::spawn(ItemStore::new(mem))
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn edit_round_trip_reloads_list() {
        let p = persister_with(
            r#"[{"id":1,"title":"a","completed":false},{"id":2,"title":"b","completed":false}]"#,
        );
        let mut app = App::new(p.handle(), ThemeContext::new(ColorScheme::Dark), Route::List);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.route(), &Route::Edit("2".into()));

        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('z')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.route(), &Route::List);

        let text = screen_text(&mut app);
        assert!(text.contains("z"));
        let stored = p.handle().load();
        assert_eq!(stored.iter().filter(|t| t.id == 2).count(), 1);
        assert_eq!(stored.iter().find(|t| t.id == 2).unwrap().title, "z");
    }

    #[test]
    fn editing_a_seed_task_on_first_run_is_saved() {
        let p = Persister::spawn(ItemStore::new(MemoryBlobStore::new()));
        let mut app = App::new(p.handle(), ThemeContext::default(), Route::List);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.route(), &Route::Edit("5".into()));

        for c in " now".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.route(), &Route::List);

        let stored = p.handle().load();
        let edited: Vec<_> = stored.iter().filter(|t| t.id == 5).collect();
        assert_eq!(edited.len(), 1);
        assert_eq!(edited[0].title, "Try the dark theme now");
    }

    #[test]
    fn ctrl_t_toggles_theme_on_any_screen() {
        let p = persister_with("[]");
        let mut app = App::new(p.handle(), ThemeContext::new(ColorScheme::Light), Route::edit(1));
        app.handle_key(ctrl('t'));
        assert_eq!(app.theme().color_scheme(), ColorScheme::Dark);
        app.navigate(Route::List);
        app.handle_key(ctrl('t'));
        assert_eq!(app.theme().color_scheme(), ColorScheme::Light);
    }

    #[test]
    fn ctrl_c_quits() {
        let p = persister_with("[]");
        let mut app = App::new(p.handle(), ThemeContext::default(), Route::List);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn renders_titles_and_counts() {
        let p = persister_with(
            r#"[{"id":1,"title":"walk dog","completed":true},{"id":2,"title":"feed cat","completed":false}]"#,
        );
        let mut app = App::new(p.handle(), ThemeContext::default(), Route::List);
        let text = screen_text(&mut app);
        assert!(text.contains("walk dog"));
        assert!(text.contains("feed cat"));
        assert!(text.contains("Todos (1 open / 2)"));
    }
}
