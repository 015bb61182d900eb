//! Modal dialog for editing a dropdown row's value set.
//!
//! The dialog shows the scratch copy's options, the name and score inputs,
//! and the Add, Delete, Clear all, OK and Cancel buttons. Every button press
//! is a click on the matching page element.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rat_focus::FocusFlag;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};
use rubrics_engine::Element;
use rubrics_types::{Effect, ElementId};

use crate::app::App;
use crate::ui::components::common::TextInputState;
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

const BUTTON_WIDTH: u16 = 12;

#[derive(Debug, Default)]
pub struct ValueSetEditorComponent {
    options_area: Rect,
}

/// Which text input a keystroke edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Value,
    Score,
}

impl ValueSetEditorComponent {
    fn focused_field(app: &App) -> Option<Field> {
        if app.editor.f_value.get() {
            Some(Field::Value)
        } else if app.editor.f_score.get() {
            Some(Field::Score)
        } else {
            None
        }
    }

    fn option_count(app: &App) -> usize {
        app.page.document().options(&app.page.editor().ids().select()).len()
    }

    fn handle_field_keys(&self, app: &mut App, field: Field, key: KeyEvent) -> Vec<Effect> {
        let ids = app.page.editor().ids().clone();
        let (input, element): (&mut TextInputState, ElementId) = match field {
            Field::Value => (&mut app.editor.value_input, ids.value_input()),
            Field::Score => (&mut app.editor.score_input, ids.score_input()),
        };
        match key.code {
            KeyCode::Enter => {
                return match field {
                    Field::Value => {
                        app.focus.focus(&app.editor.f_score);
                        Vec::new()
                    }
                    Field::Score => app.click(&ids.add_button()),
                };
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => input.insert_char(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => return Vec::new(),
        }
        let text = input.input().to_string();
        app.page.set_field(&element, &text);
        Vec::new()
    }

    fn handle_option_keys(&self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let count = Self::option_count(app);
        match key.code {
            KeyCode::Up => app.editor.select_prev_option(),
            KeyCode::Down => app.editor.select_next_option(count),
            KeyCode::Enter | KeyCode::Char(' ') => app.editor.load_selected_option(&mut app.page),
            KeyCode::Delete => {
                app.editor.load_selected_option(&mut app.page);
                let delete = app.page.editor().ids().delete_button();
                return app.click(&delete);
            }
            _ => {}
        }
        Vec::new()
    }

    fn render_input(frame: &mut Frame, area: Rect, label: &str, state: &TextInputState, focused: bool, theme: &dyn Theme) {
        let block = th::block(theme, Some(label), focused);
        let inner = block.inner(area);
        frame.render_widget(
            Paragraph::new(state.input().to_string()).style(th::input_style(theme, focused)).block(block),
            area,
        );
        if focused {
            let x = inner.x + state.cursor_columns().min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }

    fn render_options(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let focused = app.editor.f_options.get();
        let options = app.page.document().options(&app.page.editor().ids().select());
        let title = format!("Values ({})", options.len());
        let block = th::block(theme, Some(&title), focused);
        self.options_area = block.inner(area);

        let items: Vec<ListItem> = if options.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No values yet. Type a name and score, then Add.",
                theme.text_muted_style(),
            )))]
        } else {
            options
                .iter()
                .map(|option| ListItem::new(Line::from(Span::styled(option.label.clone(), theme.text_primary_style()))))
                .collect()
        };

        let mut list = List::new(items).block(block);
        if focused {
            list = list.highlight_style(th::table_selected_style(theme)).highlight_symbol("> ");
        }
        frame.render_stateful_widget(list, area, &mut app.editor.options);
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, app: &mut App) {
        let ids = app.page.editor().ids().clone();
        let slots = Layout::horizontal([Constraint::Length(BUTTON_WIDTH); 5]).spacing(1).split(area);
        let mut button_areas = Vec::with_capacity(5);
        for ((flag, id, label), slot) in app.editor.buttons(&ids).into_iter().zip(slots.iter()) {
            th::render_button(frame, *slot, label, flag.get(), &*app.theme);
            button_areas.push((*slot, id));
        }
        app.editor.button_areas = button_areas;
    }
}

impl Component for ValueSetEditorComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let ids = app.page.editor().ids().clone();
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            KeyCode::Esc => return app.click(&ids.cancel_button()),
            _ => {}
        }

        if let Some(field) = Self::focused_field(app) {
            return self.handle_field_keys(app, field, key);
        }
        if app.editor.f_options.get() {
            return self.handle_option_keys(app, key);
        }
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            && let Some(button) = app.editor.focused_button(&ids)
        {
            return app.click(&button);
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::ScrollUp if self.options_area.contains(position) => {
                app.editor.select_prev_option();
                return Vec::new();
            }
            MouseEventKind::ScrollDown if self.options_area.contains(position) => {
                app.editor.select_next_option(Self::option_count(app));
                return Vec::new();
            }
            _ => return Vec::new(),
        }

        let ids = app.page.editor().ids().clone();
        let hit = app.editor.button_areas.iter().find(|(area, _)| area.contains(position)).map(|(_, id)| id.clone());
        if let Some(button) = hit {
            let flag: Option<FocusFlag> = app
                .editor
                .buttons(&ids)
                .into_iter()
                .find(|(_, id, _)| *id == button)
                .map(|(flag, _, _)| flag.clone());
            if let Some(flag) = flag {
                app.focus.focus(&flag);
            }
            return app.click(&button);
        }

        if app.editor.value_area.contains(position) {
            app.focus.focus(&app.editor.f_value);
            app.page.focus(&ids.value_input());
        } else if app.editor.score_area.contains(position) {
            app.focus.focus(&app.editor.f_score);
            app.page.focus(&ids.score_input());
        } else if self.options_area.contains(position) {
            app.focus.focus(&app.editor.f_options);
            let index = app.editor.options.offset() + usize::from(mouse.row - self.options_area.y);
            if index < Self::option_count(app) {
                app.editor.options.select(Some(index));
                app.editor.load_selected_option(&mut app.page);
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let ids = app.page.editor().ids().clone();
        let title = match app.page.document().get(&ids.dialog()) {
            Some(Element::Dialog { title, .. }) => title.clone(),
            _ => "Values".to_string(),
        };
        let block = th::block(&*app.theme, Some(&title), true).style(app.theme.modal_background_style());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [inputs_area, options_area, _, buttons_area] = self.get_preferred_layout(app, inner)[..] else {
            return;
        };
        let [value_area, score_area] = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(1)])
            .spacing(1)
            .areas(inputs_area);

        let theme = &*app.theme;
        Self::render_input(frame, value_area, "Value", &app.editor.value_input, app.editor.f_value.get(), theme);
        Self::render_input(frame, score_area, "Score", &app.editor.score_input, app.editor.f_score.get(), theme);
        app.editor.value_area = value_area;
        app.editor.score_area = score_area;

        self.render_options(frame, options_area, app);
        self.render_buttons(frame, buttons_area, app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.theme;
        let mut spans = th::build_hint_spans(theme, &[("Tab/Shift+Tab", " Focus  "), ("Esc", " Cancel  ")]);
        if Self::focused_field(app) == Some(Field::Score) {
            spans.extend(th::build_hint_spans(theme, &[("Enter", " Add value  ")]));
        } else if app.editor.f_options.get() {
            spans.extend(th::build_hint_spans(theme, &[("↑/↓", " Select  "), ("Enter", " Load  "), ("Del", " Delete  ")]));
        } else {
            spans.extend(th::build_hint_spans(theme, &[("Enter", " Activate  ")]));
        }
        spans
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(3), // Inputs
            Constraint::Min(3),    // Options
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Buttons
        ])
        .split(area)
        .to_vec()
    }
}
