//! Modal editor for a dropdown rubric's value map.
//!
//! The editor owns a scratch [`ValueSetWidget`] bound to the dialog's own
//! select. Opening it against an external widget copies that widget's map
//! into the scratch widget; nothing flows back until the edit is confirmed.
//! Cancelling discards the scratch copy.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rubrics_types::DialogIds;
use tracing::{debug, error, info, warn};

use crate::surface::Surface;
use crate::widget::{ValueSetWidget, WidgetHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// No widget under edit; the scratch map is empty.
    #[default]
    Closed,
    /// A widget is under edit; the scratch map holds its working copy.
    Open,
}

#[derive(Debug)]
pub struct ValueSetEditor {
    ids: DialogIds,
    scratch: ValueSetWidget,
    current: Option<Weak<RefCell<ValueSetWidget>>>,
    state: EditorState,
}

impl ValueSetEditor {
    pub fn new(ids: DialogIds) -> Self {
        let scratch = ValueSetWidget::new(ids.select(), None);
        Self {
            ids,
            scratch,
            current: None,
            state: EditorState::Closed,
        }
    }

    pub fn ids(&self) -> &DialogIds {
        &self.ids
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == EditorState::Open
    }

    pub fn scratch(&self) -> &ValueSetWidget {
        &self.scratch
    }

    /// Whether `widget` is the one currently under edit.
    pub fn is_editing(&self, widget: &WidgetHandle) -> bool {
        self.current
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|current| Rc::ptr_eq(&current, widget))
    }

    /// Opens the dialog and loads a copy of `widget`'s map into the scratch
    /// widget.
    pub fn edit(&mut self, surface: &mut dyn Surface, widget: &WidgetHandle) {
        if self.is_open() {
            warn!(dialog = %self.ids.dialog(), "value set editor reopened while already open");
        }
        surface.open_dialog(&self.ids.dialog());
        self.current = Some(Rc::downgrade(widget));
        self.scratch.set_values(surface, widget.borrow().value_map());
        self.state = EditorState::Open;
        debug!(display = %widget.borrow().display(), "editing value set");
    }

    /// Adds the name/score inputs to the scratch map when both are non-empty,
    /// then returns focus to the name input. Returns whether an entry was
    /// added.
    pub fn add_entry(&mut self, surface: &mut dyn Surface) -> bool {
        let name = surface.value(&self.ids.value_input()).unwrap_or_default().to_string();
        let score = surface.value(&self.ids.score_input()).unwrap_or_default().to_string();
        if name.is_empty() || score.is_empty() {
            return false;
        }
        self.scratch.put(surface, name, score);
        surface.focus(&self.ids.value_input());
        true
    }

    /// Removes the entry named by the name input, if the input is non-empty.
    pub fn delete_entry(&mut self, surface: &mut dyn Surface) -> bool {
        let name = surface.value(&self.ids.value_input()).unwrap_or_default().to_string();
        if name.is_empty() {
            return false;
        }
        self.scratch.remove(surface, &name);
        true
    }

    pub fn clear_all(&mut self, surface: &mut dyn Surface) {
        self.scratch.clear(surface);
        self.reset_inputs(surface);
    }

    /// Copies the scratch map into the widget under edit and closes.
    ///
    /// Returns `false` when there was no widget to save into; the dialog is
    /// closed either way.
    pub fn confirm(&mut self, surface: &mut dyn Surface) -> bool {
        debug!(values = %self.scratch.serialized_form(), "saving value set");
        let saved = match self.current.take().and_then(|widget| widget.upgrade()) {
            Some(widget) => {
                widget.borrow_mut().set_values(surface, self.scratch.value_map());
                info!(
                    display = %widget.borrow().display(),
                    entries = self.scratch.value_map().len(),
                    "value set saved"
                );
                true
            }
            None => {
                error!("No current widget defined; value set not saved");
                false
            }
        };
        self.close(surface);
        saved
    }

    /// Closes without writing anything back.
    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        self.close(surface);
    }

    fn close(&mut self, surface: &mut dyn Surface) {
        surface.close_dialog(&self.ids.dialog());
        self.current = None;
        self.scratch.clear(surface);
        self.reset_inputs(surface);
        self.state = EditorState::Closed;
    }

    fn reset_inputs(&self, surface: &mut dyn Surface) {
        surface.set_value(&self.ids.value_input(), "");
        surface.set_value(&self.ids.score_input(), "");
    }
}

#[cfg(test)]
mod tests {
    use rubrics_types::{ElementId, ValueMap};

    use super::*;
    use crate::document::{Document, Element};

    fn dialog_document(ids: &DialogIds) -> Document {
        let mut document = Document::new();
        let dialog = ids.dialog();
        document
            .insert(
                dialog.clone(),
                Element::Dialog {
                    title: "Values".into(),
                    open: false,
                },
            )
            .expect("dialog");
        document.insert_child(&dialog, ids.select(), Element::select()).expect("select");
        document.insert_child(&dialog, ids.value_input(), Element::text_input("Value")).expect("value");
        document.insert_child(&dialog, ids.score_input(), Element::text_input("Score")).expect("score");
        document
    }

    fn external_widget(document: &mut Document, values: &[(&str, &str)]) -> WidgetHandle {
        let select = ElementId::new("row-select");
        document.insert(select.clone(), Element::select()).expect("select");
        let widget = ValueSetWidget::new(select, None).into_handle();
        let map: ValueMap = values.iter().copied().collect();
        widget.borrow_mut().set_values(document, &map);
        widget
    }

    #[test]
    fn edit_opens_dialog_with_copy() {
        let ids = DialogIds::new("dialog");
        let mut document = dialog_document(&ids);
        let widget = external_widget(&mut document, &[("x", "5")]);
        let mut editor = ValueSetEditor::new(ids.clone());

        editor.edit(&mut document, &widget);

        assert!(editor.is_open());
        assert!(editor.is_editing(&widget));
        assert!(document.is_dialog_open(&ids.dialog()));
        assert_eq!(editor.scratch().value_map(), widget.borrow().value_map());
        assert_eq!(document.options(&ids.select()).len(), 1);
    }

    #[test]
    fn add_entry_requires_name_and_score() {
        let ids = DialogIds::new("dialog");
        let mut document = dialog_document(&ids);
        let widget = external_widget(&mut document, &[]);
        let mut editor = ValueSetEditor::new(ids.clone());
        editor.edit(&mut document, &widget);

        document.set_value(&ids.value_input(), "late");
        assert!(!editor.add_entry(&mut document));

        document.set_value(&ids.score_input(), "0");
        assert!(editor.add_entry(&mut document));
        assert_eq!(editor.scratch().serialized_form(), "late:0");
        assert_eq!(document.focused(), Some(&ids.value_input()));
    }

    #[test]
    fn clear_all_resets_inputs() {
        let ids = DialogIds::new("dialog");
        let mut document = dialog_document(&ids);
        let widget = external_widget(&mut document, &[("a", "1")]);
        let mut editor = ValueSetEditor::new(ids.clone());
        editor.edit(&mut document, &widget);
        document.set_value(&ids.value_input(), "a");
        document.set_value(&ids.score_input(), "1");

        editor.clear_all(&mut document);

        assert!(editor.scratch().value_map().is_empty());
        assert_eq!(document.value(&ids.value_input()), Some(""));
        assert_eq!(document.value(&ids.score_input()), Some(""));
        assert_eq!(widget.borrow().value_map().len(), 1);
    }

    #[test]
    fn confirm_without_widget_is_a_no_op() {
        let ids = DialogIds::new("dialog");
        let mut document = dialog_document(&ids);
        let mut editor = ValueSetEditor::new(ids);
        assert!(!editor.confirm(&mut document));
        assert_eq!(editor.state(), EditorState::Closed);
    }

    #[test]
    fn confirm_after_widget_dropped_is_a_no_op() {
        let ids = DialogIds::new("dialog");
        let mut document = dialog_document(&ids);
        let widget = external_widget(&mut document, &[("a", "1")]);
        let mut editor = ValueSetEditor::new(ids);
        editor.edit(&mut document, &widget);
        drop(widget);

        assert!(!editor.confirm(&mut document));
        assert!(editor.scratch().value_map().is_empty());
    }
}
