use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use rubrics_engine::{RubricPage, Surface};
use rubrics_types::{ElementId, Presentation, RubricIds, RubricRow};

use crate::ui::components::common::TextInputState;

/// Which cell of the selected row keyboard input targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowColumn {
    /// The criterion name input
    #[default]
    Name,
    /// The value set (dropdown), max score (numeric) or score (checkbox)
    Value,
}

#[derive(Debug)]
pub struct RubricTableState {
    container: FocusFlag,
    pub f_table: FocusFlag,
    pub f_add_dropdown: FocusFlag,
    pub f_add_numeric: FocusFlag,
    pub f_add_checkbox: FocusFlag,

    pub table_state: TableState,
    column: RowColumn,
    editing: bool,
    pub input: TextInputState,

    /// Last rendered areas, for mouse hit-testing.
    pub table_area: Rect,
    pub button_areas: Vec<(Rect, ElementId)>,
}

impl Default for RubricTableState {
    fn default() -> Self {
        Self {
            container: FocusFlag::new().with_name("rubrics"),
            f_table: FocusFlag::new().with_name("rubrics.table"),
            f_add_dropdown: FocusFlag::new().with_name("rubrics.add_dropdown"),
            f_add_numeric: FocusFlag::new().with_name("rubrics.add_numeric"),
            f_add_checkbox: FocusFlag::new().with_name("rubrics.add_checkbox"),
            table_state: TableState::default(),
            column: RowColumn::default(),
            editing: false,
            input: TextInputState::new(),
            table_area: Rect::default(),
            button_areas: Vec::new(),
        }
    }
}

impl RubricTableState {
    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn column(&self) -> RowColumn {
        self.column
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn select(&mut self, index: usize, row_count: usize) {
        self.editing = false;
        if row_count == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(index.min(row_count - 1)));
        }
    }

    pub fn select_next(&mut self, row_count: usize) {
        let next = self.selected().map_or(0, |index| index + 1);
        self.select(next, row_count);
    }

    pub fn select_prev(&mut self, row_count: usize) {
        let previous = self.selected().map_or(0, |index| index.saturating_sub(1));
        self.select(previous, row_count);
    }

    pub fn toggle_column(&mut self) {
        self.editing = false;
        self.column = match self.column {
            RowColumn::Name => RowColumn::Value,
            RowColumn::Value => RowColumn::Name,
        };
    }

    pub fn set_column(&mut self, column: RowColumn) {
        if self.column != column {
            self.editing = false;
            self.column = column;
        }
    }

    /// The selected rubric row.
    pub fn selected_row<'a>(&self, page: &'a RubricPage) -> Option<&'a RubricRow> {
        self.selected().and_then(|index| page.manager().rows().get(index))
    }

    /// The text field the selected cell edits. Dropdown value cells have
    /// none; they open the value-set editor instead.
    pub fn target_field(&self, page: &RubricPage) -> Option<ElementId> {
        let row = self.selected_row(page)?;
        let ids = RubricIds::new(row.ordinal);
        match (self.column, row.presentation) {
            (RowColumn::Name, _) => Some(ids.name_input()),
            (RowColumn::Value, Presentation::Dropdown) => None,
            (RowColumn::Value, Presentation::Numeric) => Some(ids.max_score()),
            (RowColumn::Value, Presentation::Checkbox) => Some(ids.checkbox_score()),
        }
    }

    /// Starts editing the selected cell, loading its current value. Returns
    /// false when the cell has no text field.
    pub fn begin_edit(&mut self, page: &RubricPage) -> bool {
        let Some(field) = self.target_field(page) else {
            return false;
        };
        self.input.set_input(page.document().value(&field).unwrap_or_default());
        self.editing = true;
        true
    }

    pub fn finish_edit(&mut self) {
        self.editing = false;
    }

    /// Writes the input buffer into the field being edited.
    pub fn commit_input(&self, page: &mut RubricPage) {
        if let Some(field) = self.target_field(page) {
            page.set_field(&field, self.input.input());
        }
    }

    /// Add buttons with their page element ids, in display order.
    pub fn add_buttons<'a>(&'a self, page: &'a RubricPage) -> [(&'a FocusFlag, &'a ElementId, &'static str); 3] {
        let config = page.config();
        [
            (&self.f_add_dropdown, &config.add_dropdown, "Add dropdown"),
            (&self.f_add_numeric, &config.add_numeric, "Add numeric"),
            (&self.f_add_checkbox, &config.add_checkbox, "Add checkbox"),
        ]
    }
}

impl HasFocus for RubricTableState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_table);
        builder.leaf_widget(&self.f_add_dropdown);
        builder.leaf_widget(&self.f_add_numeric);
        builder.leaf_widget(&self.f_add_checkbox);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
