//! The rubric table: one line per rubric row plus the three add buttons.
//!
//! The table has two modes. In navigation mode arrow keys move between rows
//! and cells and single-letter shortcuts add rows or open the value-set
//! editor. Editing mode routes characters into the selected cell's text
//! field, writing each keystroke through to the page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Cell, Row, Table},
};
use rubrics_engine::{RubricPage, Surface};
use rubrics_types::{Effect, ElementId, Msg, Presentation, RubricIds, RubricRow};

use super::state::RowColumn;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

const COLUMN_WIDTHS: [Constraint; 4] = [
    Constraint::Length(4),
    Constraint::Length(10),
    Constraint::Fill(2),
    Constraint::Fill(3),
];

#[derive(Debug, Default)]
pub struct RubricTableComponent {
    name_column: Rect,
    value_column: Rect,
}

impl RubricTableComponent {
    fn row_count(app: &App) -> usize {
        app.page.manager().rubric_count()
    }

    /// Clicks an add button and selects the row it produced.
    fn add_row(&self, app: &mut App, button: ElementId) -> Vec<Effect> {
        let before = Self::row_count(app);
        let effects = app.click(&button);
        let after = Self::row_count(app);
        if after > before {
            app.table.select(after - 1, after);
        }
        effects
    }

    /// Opens the value-set editor for the selected row. Dropdown rows go
    /// through their edit button; other kinds get the page's warning.
    fn edit_selected(&self, app: &mut App) -> Vec<Effect> {
        let Some(row) = app.table.selected_row(&app.page).cloned() else {
            return Vec::new();
        };
        if row.presentation == Presentation::Dropdown {
            app.click(&RubricIds::new(row.ordinal).edit_button())
        } else {
            app.dispatch(Msg::EditRubric(row.ordinal))
        }
    }

    fn activate_cell(&self, app: &mut App) -> Vec<Effect> {
        if app.table.begin_edit(&app.page) {
            if let Some(field) = app.table.target_field(&app.page) {
                app.page.focus(&field);
            }
            return Vec::new();
        }
        self.edit_selected(app)
    }

    fn handle_editing_keys(&self, app: &mut App, key: KeyEvent) {
        let input = &mut app.table.input;
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.table.finish_edit();
                return;
            }
            KeyCode::Tab => {
                app.table.finish_edit();
                app.focus.next();
                return;
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => input.insert_char(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => return,
        }
        app.table.commit_input(&mut app.page);
    }

    fn handle_table_keys(&self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let count = Self::row_count(app);
        let config = app.page.config().clone();
        match key.code {
            KeyCode::Up => app.table.select_prev(count),
            KeyCode::Down => app.table.select_next(count),
            KeyCode::Left => app.table.set_column(RowColumn::Name),
            KeyCode::Right => app.table.set_column(RowColumn::Value),
            KeyCode::Enter | KeyCode::Char('i') => return self.activate_cell(app),
            KeyCode::Char('e') => return self.edit_selected(app),
            KeyCode::Char('d') => return self.add_row(app, config.add_dropdown),
            KeyCode::Char('n') => return self.add_row(app, config.add_numeric),
            KeyCode::Char('c') => return self.add_row(app, config.add_checkbox),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        Vec::new()
    }

    fn render_rows(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let page = &app.page;
        let focused = app.table.f_table.get();
        let editing = app.table.is_editing();
        let selected = app.table.selected();
        let column = app.table.column();

        let rows: Vec<Row> = page
            .manager()
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let is_selected = focused && selected == Some(index);
                let mut name = name_cell(page, row, theme);
                let mut value = value_cell(page, row, theme);
                if is_selected {
                    let highlight = theme.accent_emphasis_style();
                    if editing {
                        let buffer = Line::from(Span::styled(app.table.input.input().to_string(), th::input_style(theme, true)));
                        match column {
                            RowColumn::Name => name = buffer,
                            RowColumn::Value => value = buffer,
                        }
                    } else {
                        match column {
                            RowColumn::Name => name = name.patch_style(highlight),
                            RowColumn::Value => value = value.patch_style(highlight),
                        }
                    }
                }
                Row::new(vec![
                    Cell::from(row.ordinal.to_string()),
                    Cell::from(row.header.clone()),
                    Cell::from(name),
                    Cell::from(value),
                ])
                .style(th::table_row_style(theme, index))
            })
            .collect();

        let header = Row::new(["#", "Kind", "Criterion", "Values / Score"]).style(th::table_header_row_style(theme));
        let mut table = Table::new(rows, COLUMN_WIDTHS).header(header).column_spacing(1);
        if focused {
            table = table.row_highlight_style(th::table_selected_style(theme));
        }
        frame.render_stateful_widget(table, area, &mut app.table.table_state);

        let columns = Layout::horizontal(COLUMN_WIDTHS).spacing(1).split(area);
        self.name_column = columns[2];
        self.value_column = columns[3];
        app.table.table_area = area;

        if focused && editing && let Some(index) = selected {
            let column_area = match column {
                RowColumn::Name => self.name_column,
                RowColumn::Value => self.value_column,
            };
            let visible_row = index.saturating_sub(app.table.table_state.offset()) as u16;
            let y = area.y + 1 + visible_row;
            let x = column_area.x + app.table.input.cursor_columns().min(column_area.width.saturating_sub(1));
            if y < area.bottom() {
                frame.set_cursor_position((x, y));
            }
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, app: &mut App) {
        let slots = Layout::horizontal([Constraint::Length(18); 3]).spacing(1).split(area);
        let mut button_areas = Vec::with_capacity(3);
        for ((flag, id, label), slot) in app.table.add_buttons(&app.page).into_iter().zip(slots.iter()) {
            th::render_button(frame, *slot, label, flag.get(), &*app.theme);
            button_areas.push((*slot, id.clone()));
        }
        app.table.button_areas = button_areas;
    }
}

fn name_cell(page: &RubricPage, row: &RubricRow, theme: &dyn Theme) -> Line<'static> {
    let name = page.document().value(&RubricIds::new(row.ordinal).name_input()).unwrap_or_default();
    if name.is_empty() {
        Line::from(Span::styled("(unnamed)", theme.text_muted_style()))
    } else {
        Line::from(Span::styled(name.to_string(), theme.text_primary_style()))
    }
}

fn value_cell(page: &RubricPage, row: &RubricRow, theme: &dyn Theme) -> Line<'static> {
    let ids = RubricIds::new(row.ordinal);
    let document = page.document();
    let (label, value) = match row.presentation {
        Presentation::Dropdown => {
            let labels: Vec<&str> = document.options(&ids.select()).iter().map(|option| option.label.as_str()).collect();
            if labels.is_empty() {
                return Line::from(Span::styled("no values, press e to edit", theme.text_muted_style()));
            }
            ("", labels.join(", "))
        }
        Presentation::Numeric => ("max ", document.value(&ids.max_score()).unwrap_or_default().to_string()),
        Presentation::Checkbox => ("score ", document.value(&ids.checkbox_score()).unwrap_or_default().to_string()),
    };
    Line::from(vec![
        Span::styled(label, theme.text_secondary_style()),
        Span::styled(value, theme.text_primary_style()),
    ])
}

impl Component for RubricTableComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.table.f_table.get() {
            if app.table.is_editing() {
                self.handle_editing_keys(app, key);
                return Vec::new();
            }
            if !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                return self.handle_table_keys(app, key);
            }
        }

        match key.code {
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let focused = app
                    .table
                    .add_buttons(&app.page)
                    .into_iter()
                    .find(|(flag, _, _)| flag.get())
                    .map(|(_, id, _)| id.clone());
                if let Some(button) = focused {
                    return self.add_row(app, button);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);

        let hit = app.table.button_areas.iter().find(|(area, _)| area.contains(position)).map(|(_, id)| id.clone());
        if let Some(button) = hit {
            let flag = app
                .table
                .add_buttons(&app.page)
                .into_iter()
                .find(|(_, id, _)| **id == button)
                .map(|(flag, _, _)| flag.clone());
            if let Some(flag) = flag {
                app.focus.focus(&flag);
            }
            return self.add_row(app, button);
        }

        let area = app.table.table_area;
        if !area.contains(position) || mouse.row <= area.y {
            return Vec::new();
        }
        app.focus.focus(&app.table.f_table);
        let index = app.table.table_state.offset() + usize::from(mouse.row - area.y - 1);
        let count = Self::row_count(app);
        if index >= count {
            return Vec::new();
        }
        app.table.select(index, count);
        if self.name_column.x <= mouse.column && mouse.column < self.name_column.right() {
            app.table.set_column(RowColumn::Name);
        } else if self.value_column.x <= mouse.column && mouse.column < self.value_column.right() {
            app.table.set_column(RowColumn::Value);
            if app.table.target_field(&app.page).is_none() {
                return self.edit_selected(app);
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.table.f_table.get();
        let title = format!("Rubrics ({})", Self::row_count(app));
        let block = th::block(&*app.theme, Some(&title), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [table_area, buttons_area] = Layout::vertical([Constraint::Min(2), Constraint::Length(3)]).areas(inner);
        self.render_rows(frame, table_area, app);
        self.render_buttons(frame, buttons_area, app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.theme;
        if !app.table.f_table.get() {
            return th::build_hint_spans(theme, &[("Enter", " Add row  "), ("Tab", " Focus  ")]);
        }
        if app.table.is_editing() {
            return th::build_hint_spans(theme, &[("Enter/Esc", " Done  "), ("←/→", " Cursor  ")]);
        }
        th::build_hint_spans(
            theme,
            &[
                ("↑/↓", " Row  "),
                ("←/→", " Cell  "),
                ("Enter/i", " Edit  "),
                ("e", " Values  "),
                ("d/n/c", " Add dropdown/numeric/checkbox  "),
                ("q", " Quit  "),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use rubrics_types::{Modal, Ordinal};

    use super::*;
    use crate::app::tests::test_app;

    fn press(component: &mut RubricTableComponent, app: &mut App, code: KeyCode) -> Vec<Effect> {
        component.handle_key_events(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn shortcuts_add_rows_and_select_them() {
        let mut app = test_app();
        let mut component = RubricTableComponent::default();

        let effects = press(&mut component, &mut app, KeyCode::Char('n'));
        assert_eq!(effects, vec![Effect::info("Added Numeric rubric #1")]);
        press(&mut component, &mut app, KeyCode::Char('d'));

        assert_eq!(app.page.manager().rubric_count(), 2);
        assert_eq!(app.table.selected(), Some(1));
    }

    #[test]
    fn typing_writes_through_to_name_field() {
        let mut app = test_app();
        let mut component = RubricTableComponent::default();
        press(&mut component, &mut app, KeyCode::Char('c'));

        press(&mut component, &mut app, KeyCode::Enter);
        for c in "Clarity".chars() {
            press(&mut component, &mut app, KeyCode::Char(c));
        }
        press(&mut component, &mut app, KeyCode::Enter);

        assert!(!app.table.is_editing());
        assert_eq!(app.page.document().value(&ElementId::new("rubric-1-name")), Some("Clarity"));
    }

    #[test]
    fn e_on_dropdown_opens_editor() {
        let mut app = test_app();
        let mut component = RubricTableComponent::default();
        press(&mut component, &mut app, KeyCode::Char('d'));

        let effects = press(&mut component, &mut app, KeyCode::Char('e'));
        assert_eq!(effects, vec![Effect::ShowModal(Modal::ValueSetEditor)]);
        assert!(app.page.editor().is_open());
    }

    #[test]
    fn e_on_numeric_row_warns() {
        let mut app = test_app();
        let mut component = RubricTableComponent::default();
        press(&mut component, &mut app, KeyCode::Char('n'));

        let effects = press(&mut component, &mut app, KeyCode::Char('e'));
        assert!(matches!(effects.as_slice(), [Effect::Log { .. }]));
        assert!(app.page.manager().widget(Ordinal::FIRST).is_none());
    }

    #[test]
    fn renders_rows_and_buttons() {
        let mut app = test_app();
        let mut component = RubricTableComponent::default();
        press(&mut component, &mut app, KeyCode::Char('n'));
        app.page.set_field(&ElementId::new("rubric-1-max-score"), "10");

        let mut terminal = Terminal::new(TestBackend::new(100, 12)).expect("terminal");
        terminal
            .draw(|frame| component.render(frame, frame.area(), &mut app))
            .expect("draw");

        let text = screen(&terminal);
        assert!(text.contains("Rubrics (1)"));
        assert!(text.contains("Numeric"));
        assert!(text.contains("max 10"));
        assert!(text.contains("Add checkbox"));
        assert_eq!(app.table.button_areas.len(), 3);
    }

    #[test]
    fn navigation_hints_name_the_bound_keys() {
        let app = test_app();
        let component = RubricTableComponent::default();
        assert!(app.table.f_table.get());

        let hints: String = component
            .get_hint_spans(&app)
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(hints.contains("Enter/i Edit"));
        assert!(hints.contains("e Values"));
        assert!(hints.contains("d/n/c Add dropdown/numeric/checkbox"));
        assert!(hints.contains("q Quit"));
        assert!(!hints.contains("E Values"));
    }
}
