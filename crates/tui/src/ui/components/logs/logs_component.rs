//! Logs pane: status messages produced by page interactions.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{List, ListItem},
};
use rubrics_types::{Effect, Severity};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct LogsComponent {
    list_area: Rect,
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "INFO ",
        Severity::Warning => "WARN ",
        Severity::Error => "ERROR",
    }
}

impl Component for LogsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            KeyCode::Up => app.logs.select_prev(),
            KeyCode::Down => app.logs.select_next(),
            KeyCode::Home => app.logs.list_state.select_first(),
            KeyCode::End => app.logs.list_state.select_last(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        if !self.list_area.contains(position) {
            return Vec::new();
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                app.focus.focus(&app.logs.focus);
                let row = usize::from(mouse.row.saturating_sub(self.list_area.y));
                let index = app.logs.list_state.offset() + row;
                if index < app.logs.entries.len() {
                    app.logs.list_state.select(Some(index));
                }
            }
            MouseEventKind::ScrollUp => app.logs.select_prev(),
            MouseEventKind::ScrollDown => app.logs.select_next(),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let focused = app.logs.focus.get();
        let title = format!("Logs ({})", app.logs.entries.len());
        let block = th::block(theme, Some(&title), focused);
        let inner = block.inner(rect);

        let items: Vec<ListItem> = app
            .logs
            .entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.timestamp.format("%H:%M:%S ").to_string(), theme.text_muted_style()),
                    Span::styled(severity_label(entry.severity), th::severity_style(theme, entry.severity)),
                    Span::raw(" "),
                    Span::styled(entry.message.clone(), theme.text_primary_style()),
                ]))
            })
            .collect();

        let mut list = List::new(items).block(block);
        if focused {
            list = list.highlight_style(th::table_selected_style(theme));
        }
        frame.render_stateful_widget(list, rect, &mut app.logs.list_state);
        self.list_area = inner;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        if !app.logs.focus.get() {
            return Vec::new();
        }
        th::build_hint_spans(&*app.theme, &[("↑/↓", " Scroll  "), ("Home/End", " Jump  "), ("Tab", " Focus  ")])
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::tests::test_app;

    #[test]
    fn renders_entries_with_severity() {
        let mut app = test_app();
        app.append_log(Severity::Error, "boom");
        let mut component = LogsComponent::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).expect("terminal");

        terminal
            .draw(|frame| component.render(frame, frame.area(), &mut app))
            .expect("draw");

        let text: String = terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Logs (2)"));
        assert!(text.contains("ERROR boom"));
    }

    #[test]
    fn arrow_keys_move_selection() {
        let mut app = test_app();
        app.append_log(Severity::Info, "second");
        let mut component = LogsComponent::default();

        component.handle_key_events(&mut app, KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(app.logs.list_state.selected(), Some(0));
        component.handle_key_events(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(app.logs.list_state.selected(), Some(1));
    }
}
