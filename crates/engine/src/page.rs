//! The rubric page: one document, its rubric manager and the value-set
//! editor, wired together.
//!
//! Hosts translate user input into [`RubricPage::click`] or
//! [`RubricPage::dispatch`] calls and apply the returned [`Effect`]s.

use rubrics_types::{
    DialogIds, ElementId, Effect, FormSnapshot, Modal, Msg, Ordinal, Presentation, RubricDefinitionFile, RubricIds,
};
use tracing::{debug, error, info, warn};

use crate::document::{Document, DocumentError, Element};
use crate::editor::ValueSetEditor;
use crate::manager::RubricManager;
use crate::surface::Surface;
use crate::templates::RowTemplates;

/// Ids of the page-level elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub table: ElementId,
    pub dialog: ElementId,
    pub dialog_title: String,
    pub add_dropdown: ElementId,
    pub add_numeric: ElementId,
    pub add_checkbox: ElementId,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            table: ElementId::new("rubric-table"),
            dialog: ElementId::new("dropdown-dialog"),
            dialog_title: "Edit values".to_string(),
            add_dropdown: ElementId::new("add-dropdown"),
            add_numeric: ElementId::new("add-numeric"),
            add_checkbox: ElementId::new("add-checkbox"),
        }
    }
}

#[derive(Debug)]
pub struct RubricPage {
    config: PageConfig,
    document: Document,
    manager: RubricManager,
    editor: ValueSetEditor,
}

impl RubricPage {
    pub fn new(config: PageConfig) -> Result<Self, DocumentError> {
        Self::with_templates(config, RowTemplates::default())
    }

    /// Builds the table, the three add buttons and the editor dialog with all
    /// of its controls bound.
    pub fn with_templates(config: PageConfig, templates: RowTemplates) -> Result<Self, DocumentError> {
        let mut document = Document::new();
        document.insert(config.table.clone(), Element::Table { rows: Vec::new() })?;

        let manager = RubricManager::with_templates(config.table.clone(), templates);
        for (button, label) in [
            (&config.add_dropdown, "Add dropdown"),
            (&config.add_numeric, "Add numeric"),
            (&config.add_checkbox, "Add checkbox"),
        ] {
            document.insert(button.clone(), Element::button(label))?;
        }
        manager.set_add_dropdown_button(&mut document, &config.add_dropdown)?;
        manager.set_add_numeric_button(&mut document, &config.add_numeric)?;
        manager.set_add_checkbox_button(&mut document, &config.add_checkbox)?;

        let ids = DialogIds::new(config.dialog.clone());
        build_dialog(&mut document, &ids, &config.dialog_title)?;
        let editor = ValueSetEditor::new(ids);

        Ok(Self {
            config,
            document,
            manager,
            editor,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn manager(&self) -> &RubricManager {
        &self.manager
    }

    pub fn editor(&self) -> &ValueSetEditor {
        &self.editor
    }

    /// Resolves a click on `id` through its binding. Unbound elements do
    /// nothing.
    pub fn click(&mut self, id: &ElementId) -> Vec<Effect> {
        match self.document.click(id) {
            Some(msg) => self.dispatch(msg),
            None => {
                debug!(element = %id, "click on unbound element");
                Vec::new()
            }
        }
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::AddRubric(presentation) => self.add_rubric(presentation),
            Msg::EditRubric(ordinal) => self.edit_rubric(ordinal),
            Msg::EditorAdd => {
                self.editor.add_entry(&mut self.document);
                Vec::new()
            }
            Msg::EditorDelete => {
                self.editor.delete_entry(&mut self.document);
                Vec::new()
            }
            Msg::EditorClearAll => {
                self.editor.clear_all(&mut self.document);
                Vec::new()
            }
            Msg::EditorConfirm => {
                if self.editor.confirm(&mut self.document) {
                    vec![Effect::CloseModal, Effect::info("Value set saved")]
                } else {
                    vec![Effect::CloseModal]
                }
            }
            Msg::EditorCancel => {
                self.editor.cancel(&mut self.document);
                vec![Effect::CloseModal]
            }
            Msg::Tick | Msg::Resize(..) => Vec::new(),
        }
    }

    /// Writes a text input or hidden field, as typing into it would.
    pub fn set_field(&mut self, id: &ElementId, value: &str) {
        self.document.set_value(id, value);
    }

    pub fn focus(&mut self, id: &ElementId) {
        self.document.focus(id);
    }

    /// Adds one row per definition, seeding names, value maps and scores.
    pub fn load_definitions(&mut self, file: &RubricDefinitionFile) -> Result<Vec<Ordinal>, DocumentError> {
        let mut ordinals = Vec::with_capacity(file.rubrics.len());
        for definition in &file.rubrics {
            let ordinal = self.manager.add(&mut self.document, definition.presentation)?;
            let ids = RubricIds::new(ordinal);
            self.document.set_value(&ids.name_input(), &definition.name);

            match definition.presentation {
                Presentation::Dropdown => {
                    if let (Some(values), Some(widget)) = (&definition.values, self.manager.widget(ordinal)) {
                        widget.borrow_mut().set_values(&mut self.document, values);
                    }
                }
                Presentation::Numeric => {
                    if let Some(max_score) = &definition.max_score {
                        self.document.set_value(&ids.max_score(), max_score.as_str());
                    }
                }
                Presentation::Checkbox => {
                    if let Some(score) = &definition.score {
                        self.document.set_value(&ids.checkbox_score(), score.as_str());
                    }
                }
            }
            ordinals.push(ordinal);
        }
        info!(rows = ordinals.len(), "loaded rubric definitions");
        Ok(ordinals)
    }

    pub fn form_snapshot(&self) -> FormSnapshot {
        self.document.form_snapshot(self.manager.table())
    }

    fn add_rubric(&mut self, presentation: Presentation) -> Vec<Effect> {
        match self.manager.add(&mut self.document, presentation) {
            Ok(ordinal) => vec![Effect::info(format!("Added {} rubric #{ordinal}", presentation.header()))],
            Err(err) => {
                error!(error = %err, presentation = %presentation, "failed to add rubric row");
                vec![Effect::error(format!("Could not add {} rubric: {err}", presentation.header()))]
            }
        }
    }

    fn edit_rubric(&mut self, ordinal: Ordinal) -> Vec<Effect> {
        let Some(widget) = self.manager.widget(ordinal).cloned() else {
            warn!(%ordinal, "edit requested for a row without a value set");
            return vec![Effect::warning(format!("Rubric #{ordinal} has no value set to edit"))];
        };
        self.editor.edit(&mut self.document, &widget);
        self.document.focus(&self.editor.ids().value_input());
        vec![Effect::ShowModal(Modal::ValueSetEditor)]
    }
}

fn build_dialog(document: &mut Document, ids: &DialogIds, title: &str) -> Result<(), DocumentError> {
    let dialog = ids.dialog();
    document.insert(
        dialog.clone(),
        Element::Dialog {
            title: title.to_string(),
            open: false,
        },
    )?;
    document.insert_child(&dialog, ids.select(), Element::select())?;
    document.insert_child(&dialog, ids.value_input(), Element::text_input("Value"))?;
    document.insert_child(&dialog, ids.score_input(), Element::text_input("Score"))?;

    for (id, label, msg) in [
        (ids.add_button(), "Add", Msg::EditorAdd),
        (ids.delete_button(), "Delete", Msg::EditorDelete),
        (ids.clear_all_button(), "Clear all", Msg::EditorClearAll),
        (ids.confirm_button(), "OK", Msg::EditorConfirm),
        (ids.cancel_button(), "Cancel", Msg::EditorCancel),
    ] {
        document.insert_child(&dialog, id.clone(), Element::button(label))?;
        document.bind_click(&id, msg)?;
    }
    Ok(())
}
