use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use rubrics_engine::{RubricPage, Surface};
use rubrics_types::{DialogIds, ElementId};

use crate::ui::components::common::TextInputState;

/// Terminal-side state of the value-set editor dialog.
///
/// The inputs mirror the dialog's text fields in the page; every keystroke is
/// written through, and [`ValueSetEditorState::sync_from`] pulls values back
/// after the engine resets them.
#[derive(Debug)]
pub struct ValueSetEditorState {
    container: FocusFlag,
    pub f_value: FocusFlag,
    pub f_score: FocusFlag,
    pub f_options: FocusFlag,
    pub f_add: FocusFlag,
    pub f_delete: FocusFlag,
    pub f_clear_all: FocusFlag,
    pub f_ok: FocusFlag,
    pub f_cancel: FocusFlag,

    pub value_input: TextInputState,
    pub score_input: TextInputState,
    pub options: ListState,

    pub value_area: Rect,
    pub score_area: Rect,
    pub button_areas: Vec<(Rect, ElementId)>,
}

impl Default for ValueSetEditorState {
    fn default() -> Self {
        Self {
            container: FocusFlag::new().with_name("value_set_editor"),
            f_value: FocusFlag::new().with_name("value_set_editor.value"),
            f_score: FocusFlag::new().with_name("value_set_editor.score"),
            f_options: FocusFlag::new().with_name("value_set_editor.options"),
            f_add: FocusFlag::new().with_name("value_set_editor.add"),
            f_delete: FocusFlag::new().with_name("value_set_editor.delete"),
            f_clear_all: FocusFlag::new().with_name("value_set_editor.clear_all"),
            f_ok: FocusFlag::new().with_name("value_set_editor.ok"),
            f_cancel: FocusFlag::new().with_name("value_set_editor.cancel"),
            value_input: TextInputState::new(),
            score_input: TextInputState::new(),
            options: ListState::default(),
            value_area: Rect::default(),
            score_area: Rect::default(),
            button_areas: Vec::new(),
        }
    }
}

impl ValueSetEditorState {
    /// Dialog buttons with their element ids, in display order.
    pub fn buttons<'a>(&'a self, ids: &DialogIds) -> [(&'a FocusFlag, ElementId, &'static str); 5] {
        [
            (&self.f_add, ids.add_button(), "Add"),
            (&self.f_delete, ids.delete_button(), "Delete"),
            (&self.f_clear_all, ids.clear_all_button(), "Clear all"),
            (&self.f_ok, ids.confirm_button(), "OK"),
            (&self.f_cancel, ids.cancel_button(), "Cancel"),
        ]
    }

    /// Element id of the focused button, if a button has focus.
    pub fn focused_button(&self, ids: &DialogIds) -> Option<ElementId> {
        self.buttons(ids)
            .into_iter()
            .find(|(flag, _, _)| flag.get())
            .map(|(_, id, _)| id)
    }

    /// Reloads both inputs and clamps the option cursor after the page changed.
    pub fn sync_from(&mut self, page: &RubricPage) {
        let ids = page.editor().ids();
        let document = page.document();
        self.value_input.sync(document.value(&ids.value_input()).unwrap_or_default());
        self.score_input.sync(document.value(&ids.score_input()).unwrap_or_default());

        let count = document.options(&ids.select()).len();
        match self.options.selected() {
            _ if count == 0 => self.options.select(None),
            Some(index) if index >= count => self.options.select(Some(count - 1)),
            None => self.options.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn select_next_option(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let next = self.options.selected().map_or(0, |index| (index + 1).min(count - 1));
        self.options.select(Some(next));
    }

    pub fn select_prev_option(&mut self) {
        let previous = self.options.selected().map_or(0, |index| index.saturating_sub(1));
        self.options.select(Some(previous));
    }

    /// Copies the highlighted scratch entry into the name and score inputs so
    /// it can be deleted or re-scored.
    pub fn load_selected_option(&mut self, page: &mut RubricPage) {
        let Some(index) = self.options.selected() else {
            return;
        };
        let scratch = page.editor().scratch().value_map();
        let Some((name, score)) = scratch.iter().nth(index).map(|(name, score)| (name.to_string(), score.to_string())) else {
            return;
        };
        let ids = page.editor().ids().clone();
        page.set_field(&ids.value_input(), &name);
        page.set_field(&ids.score_input(), &score);
        self.value_input.set_input(name);
        self.score_input.set_input(score);
    }

    pub fn reset(&mut self) {
        self.value_input.clear();
        self.score_input.clear();
        self.options.select(None);
    }
}

impl HasFocus for ValueSetEditorState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_value);
        builder.leaf_widget(&self.f_score);
        builder.leaf_widget(&self.f_options);
        builder.leaf_widget(&self.f_add);
        builder.leaf_widget(&self.f_delete);
        builder.leaf_widget(&self.f_clear_all);
        builder.leaf_widget(&self.f_ok);
        builder.leaf_widget(&self.f_cancel);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use rubrics_engine::PageConfig;
    use rubrics_types::{Msg, Ordinal, Presentation};

    use super::*;

    fn editing_page() -> RubricPage {
        let mut page = RubricPage::new(PageConfig::default()).expect("page");
        page.dispatch(Msg::AddRubric(Presentation::Dropdown));
        page.dispatch(Msg::EditRubric(Ordinal::FIRST));
        page
    }

    #[test]
    fn sync_picks_up_engine_resets() {
        let mut page = editing_page();
        let ids = page.editor().ids().clone();
        let mut state = ValueSetEditorState::default();
        page.set_field(&ids.value_input(), "good");
        page.set_field(&ids.score_input(), "3");
        state.sync_from(&page);
        assert_eq!(state.value_input.input(), "good");

        page.dispatch(Msg::EditorClearAll);
        state.sync_from(&page);
        assert!(state.value_input.is_empty());
        assert!(state.score_input.is_empty());
    }

    #[test]
    fn selected_option_fills_inputs() {
        let mut page = editing_page();
        let ids = page.editor().ids().clone();
        for (name, score) in [("low", "1"), ("high", "5")] {
            page.set_field(&ids.value_input(), name);
            page.set_field(&ids.score_input(), score);
            page.dispatch(Msg::EditorAdd);
        }
        let mut state = ValueSetEditorState::default();
        state.sync_from(&page);
        state.select_next_option(2);

        state.load_selected_option(&mut page);

        assert_eq!(state.value_input.input(), "high");
        assert_eq!(page.document().value(&ids.score_input()), Some("5"));
    }

    #[test]
    fn focused_button_maps_to_element() {
        let state = ValueSetEditorState::default();
        let ids = DialogIds::new("dialog");
        assert_eq!(state.focused_button(&ids), None);
    }
}
