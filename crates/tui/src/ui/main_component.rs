use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use rat_focus::FocusFlag;
use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};
use rubrics_types::{Effect, Modal};

use super::components::logs::LogsComponent;
use super::components::rubric_table::RubricTableComponent;
use super::components::value_set_editor::ValueSetEditorComponent;
use super::components::Component;
use super::theme::theme_helpers as th;
use super::utils::centered_min_max;
use crate::app::App;

pub struct ModalLayout(Box<dyn Fn(Rect) -> Rect>);

impl std::fmt::Debug for ModalLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModalLayout")
    }
}

type ModalView = (Box<dyn Component>, ModalLayout);

/// Root view: the rubric table, the logs pane, the hints bar and at most one
/// modal on top.
#[derive(Default)]
pub struct MainView {
    pub content_view: RubricTableComponent,
    pub logs_view: LogsComponent,
    pub modal_view: Option<ModalView>,

    /// Focus held just before a modal opened.
    transient_focus: Option<FocusFlag>,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens or closes the modal. Not meant to be called directly; return
    /// `Effect::ShowModal` or `Effect::CloseModal` instead.
    pub fn set_open_modal(&mut self, app: &mut App, modal: Option<Modal>) {
        match modal {
            Some(Modal::ValueSetEditor) => {
                self.modal_view = Some((
                    Box::new(ValueSetEditorComponent::default()),
                    ModalLayout(Box::new(|rect| centered_min_max(60, 70, (56, 18), (100, 30), rect))),
                ));
                if self.transient_focus.is_none() {
                    self.transient_focus = app.focus.focused();
                }
                app.open_modal = modal;
                app.editor.sync_from(&app.page);
                app.rebuild_focus();
                app.focus.focus(&app.editor.f_value);
            }
            None => {
                self.modal_view = None;
                app.open_modal = None;
                app.editor.reset();
                app.rebuild_focus();
                self.restore_focus(app);
            }
        }
    }

    pub fn restore_focus(&mut self, app: &mut App) {
        match self.transient_focus.take() {
            Some(flag) if app.open_modal.is_none() => app.focus.focus(&flag),
            _ => app.focus.first(),
        }
    }

    fn toggle_logs(&mut self, app: &mut App) {
        let logs_had_focus = app.logs.focus.get();
        app.logs.toggle_visible();
        app.rebuild_focus();
        if logs_had_focus && !app.logs.is_visible {
            app.focus.focus(&app.table.f_table);
        }
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.cycle_theme();
            return Vec::new();
        }

        if let Some((modal, _)) = self.modal_view.as_mut() {
            return modal.handle_key_events(app, key);
        }

        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.toggle_logs(app);
            return Vec::new();
        }

        if app.logs.is_visible && app.logs.focus.get() {
            return self.logs_view.handle_key_events(app, key);
        }

        self.content_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if let Some((modal, _)) = self.modal_view.as_mut() {
            return modal.handle_mouse_events(app, mouse);
        }

        let mut effects = self.content_view.handle_mouse_events(app, mouse);
        if app.logs.is_visible {
            effects.extend(self.logs_view.handle_mouse_events(app, mouse));
        }
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let background = Paragraph::new("").style(Style::default().bg(app.theme.roles().background));
        frame.render_widget(background, area);

        let layout = self.get_preferred_layout(app, area);
        self.content_view.render(frame, layout[0], app);
        if app.logs.is_visible {
            self.logs_view.render(frame, layout[1], app);
        }

        let hints = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.theme.text_muted_style());
        frame.render_widget(hints, layout[2]);

        if let Some((modal, position)) = self.modal_view.as_mut() {
            render_overlay(frame, app);
            let modal_area = position.0(area);
            frame.render_widget(Clear, modal_area);

            let modal_hints = modal.get_hint_spans(app);
            if modal_hints.is_empty() {
                modal.render(frame, modal_area, app);
            } else {
                let [body, hints_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(modal_area);
                let hints = Paragraph::new(Line::from(modal_hints))
                    .style(app.theme.text_muted_style())
                    .bg(app.theme.roles().background);
                frame.render_widget(hints, hints_area);
                modal.render(frame, body, app);
            }
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled("Hints: ", app.theme.text_muted_style())];
        if app.logs.is_visible && app.logs.focus.get() {
            spans.extend(self.logs_view.get_hint_spans(app));
        } else {
            spans.extend(self.content_view.get_hint_spans(app));
        }
        spans.extend(th::build_hint_spans(
            &*app.theme,
            &[("Ctrl+L", " Toggle logs  "), ("Ctrl+T", " Next theme  ")],
        ));
        spans
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let [main_area, hints_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let constraints = if app.logs.is_visible {
            [Constraint::Percentage(70), Constraint::Fill(1)]
        } else {
            [Constraint::Percentage(100), Constraint::Length(0)]
        };
        // Wide terminals put the logs beside the table.
        let panes = if main_area.width >= 141 {
            Layout::horizontal(constraints).split(main_area)
        } else {
            Layout::vertical(constraints).split(main_area)
        };

        vec![
            panes[0],   // Rubric table
            panes[1],   // Logs (if visible)
            hints_area, // Hints bar
        ]
    }
}

fn render_overlay(frame: &mut Frame, app: &App) {
    frame.render_widget(Block::default().style(app.theme.modal_background_style()).dim(), frame.area());
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use rubrics_types::{ElementId, Msg, Presentation};

    use super::*;
    use crate::app::tests::test_app;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn modal_round_trip_restores_table_focus() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.dispatch(Msg::AddRubric(Presentation::Dropdown));
        app.click(&ElementId::new("rubric-1-edit-button"));

        view.set_open_modal(&mut app, Some(Modal::ValueSetEditor));
        assert!(app.editor.f_value.get());
        assert!(!app.table.f_table.get());

        view.set_open_modal(&mut app, None);
        assert!(view.modal_view.is_none());
        assert!(app.table.f_table.get());
    }

    #[test]
    fn ctrl_l_hides_logs_and_moves_focus() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.focus.focus(&app.logs.focus);

        view.handle_key_events(&mut app, ctrl('l'));

        assert!(!app.logs.is_visible);
        assert!(app.table.f_table.get());
    }

    #[test]
    fn keys_go_to_modal_while_open() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.dispatch(Msg::AddRubric(Presentation::Dropdown));
        app.click(&ElementId::new("rubric-1-edit-button"));
        view.set_open_modal(&mut app, Some(Modal::ValueSetEditor));

        let effects = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(effects, vec![Effect::CloseModal]);
        assert_eq!(app.page.manager().rubric_count(), 1);
    }

    #[test]
    fn renders_table_logs_and_modal() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.dispatch(Msg::AddRubric(Presentation::Dropdown));
        app.click(&ElementId::new("rubric-1-edit-button"));
        view.set_open_modal(&mut app, Some(Modal::ValueSetEditor));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal.draw(|frame| view.render(frame, frame.area(), &mut app)).expect("draw");

        let text: String = terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Rubrics (1)"));
        assert!(text.contains("Edit values"));
        assert!(text.contains("Hints:"));
    }
}
