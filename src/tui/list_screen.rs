//! The `/` screen: new-task input, theme toggle and the task list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::persist::PersistHandle;
use crate::theme::{ThemeContext, PERU};
use crate::todos::TodoList;
use crate::tui::enums::{Action, Focus, Route};
use crate::tui::input::InputField;

/// State of the list screen. Built fresh every time `/` is navigated to.
pub struct ListScreen {
    todos: TodoList,
    input: InputField,
    list_state: ListState,
    focus: Focus,
    status_message: String,
}

impl ListScreen {
    /// Mount the screen, loading the task list from storage.
    pub fn mount(persist: PersistHandle) -> Self {
        let todos = TodoList::initialize(persist);
        let mut list_state = ListState::default();
        if !todos.is_empty() {
            list_state.select(Some(0));
        }
        ListScreen {
            todos,
            input: InputField::new(),
            list_state,
            focus: Focus::Input,
            status_message: String::new(),
        }
    }

    #[cfg(test)]
    pub fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[cfg(test)]
    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn selected_id(&self) -> Option<u64> {
        let idx = self.list_state.selected()?;
        self.todos.tasks().get(idx).map(|t| t.id)
    }

    /// Keep the selection inside the list after it shrinks or grows.
    fn clamp_selection(&mut self) {
        let len = self.todos.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn add_from_input(&mut self) {
        match self.todos.add(&self.input.value) {
            Some(id) => {
                self.input.clear();
                self.list_state.select(Some(0));
                self.status_message = format!("Added task {id}");
            }
            None => self.status_message = "Type a title first".to_string(),
        }
    }

    /// Handle a key press. Global shortcuts are handled by the app before this.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.status_message.clear();
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => self.add_from_input(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Esc => {
                self.focus = Focus::List;
                self.clamp_selection();
            }
            _ => {
                self.input.handle_key(key);
            }
        }
        Action::None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Action {
        // Control chords belong to the app.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('a') => self.focus = Focus::Input,
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.list_state.selected() {
                    if i > 0 {
                        self.list_state.select(Some(i - 1));
                    }
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(i) = self.list_state.selected() {
                    if i + 1 < self.todos.len() {
                        self.list_state.select(Some(i + 1));
                    }
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.todos.toggle(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    if self.todos.remove(id) {
                        self.status_message = format!("Deleted task {id}");
                    }
                    self.clamp_selection();
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    return Action::Navigate(Route::edit(id));
                }
            }
            _ => {}
        }
        Action::None
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, ctx: &ThemeContext) {
        let theme = ctx.theme();
        f.render_widget(Block::default().style(theme.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(7), Constraint::Length(5)])
            .split(chunks[0]);

        let input_focused = self.focus == Focus::Input;
        let input_border = if input_focused {
            Style::default().fg(theme.text)
        } else {
            theme.border()
        };
        let input_text = if self.input.is_empty() && !input_focused {
            Span::styled("Add a new todo", theme.border())
        } else {
            Span::raw(self.input.value.clone())
        };
        let input = Paragraph::new(Line::from(input_text))
            .style(theme.base())
            .block(Block::default().borders(Borders::ALL).border_style(input_border));
        f.render_widget(input, top[0]);
        if input_focused {
            let x = top[0].x + 1 + self.input.cursor as u16;
            f.set_cursor_position((x.min(top[0].right().saturating_sub(2)), top[0].y + 1));
        }

        let add = Paragraph::new("Add")
            .style(theme.button_style())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
        f.render_widget(add, top[1]);

        let toggle = Paragraph::new(ctx.toggle_icon())
            .style(theme.base())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
        f.render_widget(toggle, top[2]);

        let items: Vec<ListItem> = self
            .todos
            .tasks()
            .iter()
            .map(|task| {
                let title_style = if task.completed {
                    theme.muted()
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(task.title.clone(), title_style),
                    Span::raw("  "),
                    Span::styled("✖", Style::default().fg(PERU)),
                ]))
            })
            .collect();

        let highlight = if self.focus == Focus::List {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .style(theme.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border())
                    .title(format!(
                        "Todos ({} open / {})",
                        self.todos.remaining(),
                        self.todos.len()
                    )),
            )
            .highlight_style(highlight)
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::persist::Persister;
    use crate::store::{ItemStore, MemoryBlobStore, STORAGE_KEY};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_with(raw: &str) -> (Persister, ListScreen) {
        let mem = MemoryBlobStore::new();
        mem.put_raw(STORAGE_KEY, raw);
        let persister = Persister::spawn(ItemStore::new(mem));
        let screen = ListScreen::mount(persister.handle());
        (persister, screen)
    }

    fn type_text(screen: &mut ListScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_and_enter_adds_a_task() {
        let (p, mut screen) = screen_with(r#"[{"id":3,"title":"c","completed":false}]"#);
        type_text(&mut screen, "Buy milk");
        screen.handle_key(key(KeyCode::Enter));

        assert_eq!(screen.todos().tasks()[0].id, 4);
        assert_eq!(screen.todos().tasks()[0].title, "Buy milk");
        assert!(screen.input().is_empty());
        assert_eq!(p.handle().load().len(), 2);
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let (_p, mut screen) = screen_with(r#"[{"id":3,"title":"c","completed":false}]"#);
        type_text(&mut screen, "   ");
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.todos().len(), 1);
    }

    #[test]
    fn list_keys_toggle_remove_and_edit() {
        let (p, mut screen) = screen_with(
            r#"[{"id":1,"title":"a","completed":false},{"id":2,"title":"b","completed":false}]"#,
        );
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus(), Focus::List);

        screen.handle_key(key(KeyCode::Char(' ')));
        assert!(screen.todos().get(2).unwrap().completed);

        screen.handle_key(key(KeyCode::Down));
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('e'))),
            Action::Navigate(Route::Edit("1".into()))
        );

        screen.handle_key(key(KeyCode::Char('d')));
        assert!(screen.todos().get(1).is_none());
        assert_eq!(screen.selected_id(), Some(2));

        let stored = p.handle().load();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].completed);
    }

    #[test]
    fn control_chords_do_not_trigger_list_actions() {
        let (p, mut screen) = screen_with(r#"[{"id":1,"title":"a","completed":false}]"#);
        screen.handle_key(key(KeyCode::Tab));

        for c in ['d', 'e', 'q', ' '] {
            let chord = KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
            assert_eq!(screen.handle_key(chord), Action::None);
        }
        assert_eq!(screen.focus(), Focus::List);
        assert!(!screen.todos().get(1).unwrap().completed);
        assert_eq!(p.handle().load().len(), 1);
    }

    #[test]
    fn quit_only_from_list_focus() {
        let (_p, mut screen) = screen_with("[]");
        assert_eq!(screen.handle_key(key(KeyCode::Char('q'))), Action::None);
        assert_eq!(screen.input().value, "q");
        screen.handle_key(key(KeyCode::Esc));
        assert_eq!(screen.handle_key(key(KeyCode::Char('q'))), Action::Quit);
    }
}
