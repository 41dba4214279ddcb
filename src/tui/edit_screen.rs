//! The `/todos/:id` screen: rename one task.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::persist::PersistHandle;
use crate::task::{Task, MAX_TITLE_LEN};
use crate::theme::ThemeContext;
use crate::tui::enums::{Action, Route};
use crate::tui::input::InputField;

/// Edit state for a single task.
pub struct EditScreen {
    route_id: String,
    draft: Option<Task>,
    input: InputField,
    persist: PersistHandle,
}

impl EditScreen {
    /// Load the task whose id stringifies to `id`. A miss leaves the draft empty.
    pub fn mount(persist: PersistHandle, id: &str) -> Self {
        let draft = persist
            .load()
            .into_iter()
            .find(|t| t.id.to_string() == id);
        if draft.is_none() {
            tracing::warn!(id, "no stored task for edit route");
        }
        let title = draft.as_ref().map(|t| t.title.as_str()).unwrap_or("");
        EditScreen {
            route_id: id.to_string(),
            input: InputField::with_value(title).limited(MAX_TITLE_LEN),
            draft,
            persist,
        }
    }

    pub fn draft(&self) -> Option<&Task> {
        self.draft.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.input.value
    }

    /// Replace the title being edited, subject to the length cap.
    pub fn set_title(&mut self, title: &str) {
        self.input = InputField::with_value(title).limited(MAX_TITLE_LEN);
    }

    /// Queue the edited record for saving. Returns false when there was nothing to save.
    pub fn save(&mut self) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            tracing::warn!(id = %self.route_id, "save without a loaded task ignored");
            return false;
        };
        draft.title = self.input.value.clone();
        self.persist.upsert(draft.clone());
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => {
                self.save();
                Action::Navigate(Route::List)
            }
            KeyCode::Esc => Action::Navigate(Route::List),
            _ => {
                self.input.handle_key(key);
                Action::None
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, ctx: &ThemeContext) {
        let theme = ctx.theme();
        f.render_widget(Block::default().style(theme.base()), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(5)])
            .split(rows[0]);

        let label = if self.draft().is_some() {
            format!("Edit todo #{}", self.route_id)
        } else {
            "Edit todo".to_string()
        };
        let input = Paragraph::new(self.input.value.clone())
            .style(theme.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.text))
                    .title(label),
            );
        f.render_widget(input, top[0]);
        let x = top[0].x + 1 + self.input.cursor as u16;
        f.set_cursor_position((x.min(top[0].right().saturating_sub(2)), top[0].y + 1));

        let toggle = Paragraph::new(ctx.toggle_icon())
            .style(theme.base())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
        f.render_widget(toggle, top[1]);

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Length(14), Constraint::Min(0)])
            .split(rows[1]);

        let save = Paragraph::new("Save ⏎")
            .style(theme.button_style())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
        f.render_widget(save, buttons[0]);

        let cancel = Paragraph::new("Cancel Esc")
            .style(theme.danger())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
        f.render_widget(cancel, buttons[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    use crate::persist::Persister;
    use crate::store::{ItemStore, MemoryBlobStore, STORAGE_KEY};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn persister_with(raw: &str) -> Persister {
        let mem = MemoryBlobStore::new();
        mem.put_raw(STORAGE_KEY, raw);
        Persister::spawn(ItemStore::new(mem))
    }

    const STORED: &str = r#"[{"id":3,"title":"c","completed":true},{"id":2,"title":"b","completed":false},{"id":1,"title":"a","completed":false}]"#;

    #[test]
    fn loads_matching_task() {
        let p = persister_with(STORED);
        let screen = EditScreen::mount(p.handle(), "2");
        assert_eq!(screen.draft().map(|t| t.id), Some(2));
        assert_eq!(screen.title(), "b");
    }

    #[test]
    fn missing_id_renders_blank() {
        let p = persister_with(STORED);
        let screen = EditScreen::mount(p.handle(), "99");
        assert!(screen.draft().is_none());
        assert_eq!(screen.title(), "");
    }

    #[test]
    fn id_matches_by_string_form() {
        let p = persister_with(STORED);
        let screen = EditScreen::mount(p.handle(), "02");
        assert!(screen.draft().is_none());
    }

    #[test]
    fn save_replaces_record_once_and_appends() {
        let p = persister_with(STORED);
        let mut screen = EditScreen::mount(p.handle(), "3");
        screen.set_title("renamed");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), Action::Navigate(Route::List));

        let stored = p.handle().load();
        let ids: Vec<u64> = stored.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        let edited = stored.iter().filter(|t| t.id == 3).collect::<Vec<_>>();
        assert_eq!(edited.len(), 1);
        assert_eq!(edited[0].title, "renamed");
        assert!(edited[0].completed);
    }

    #[test]
    fn cancel_discards_edits() {
        let p = persister_with(STORED);
        let mut screen = EditScreen::mount(p.handle(), "1");
        screen.handle_key(key(KeyCode::Char('!')));
        assert_eq!(screen.title(), "a!");
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), Action::Navigate(Route::List));
        let stored = p.handle().load();
        assert_eq!(stored.iter().find(|t| t.id == 1).unwrap().title, "a");
    }

    #[test]
    fn save_without_draft_writes_nothing() {
        let p = persister_with(STORED);
        let mut screen = EditScreen::mount(p.handle(), "42");
        screen.set_title("ghost");
        assert!(!screen.save());
        assert_eq!(p.handle().load().len(), 3);
    }

    #[test]
    fn title_is_capped() {
        let p = persister_with(STORED);
        let mut screen = EditScreen::mount(p.handle(), "1");
        screen.set_title(&"x".repeat(MAX_TITLE_LEN + 10));
        assert_eq!(screen.title().chars().count(), MAX_TITLE_LEN);
    }
}
