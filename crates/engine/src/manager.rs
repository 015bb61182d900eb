use indexmap::IndexMap;
use rubrics_types::{ElementId, Msg, Ordinal, Presentation, RubricIds, RubricRow};
use tracing::{info, warn};

use crate::document::{Document, DocumentError};
use crate::templates::RowTemplates;
use crate::widget::{ValueSetWidget, WidgetHandle};

/// Appends rubric rows to a table and owns the widgets of dropdown rows.
///
/// Ordinals start at 1 and are never reused, even when appending a row fails
/// after the ordinal was taken.
#[derive(Debug)]
pub struct RubricManager {
    table: ElementId,
    templates: RowTemplates,
    last: Option<Ordinal>,
    rows: Vec<RubricRow>,
    widgets: IndexMap<Ordinal, WidgetHandle>,
}

impl RubricManager {
    pub fn new(table: ElementId) -> Self {
        Self::with_templates(table, RowTemplates::default())
    }

    pub fn with_templates(table: ElementId, templates: RowTemplates) -> Self {
        Self {
            table,
            templates,
            last: None,
            rows: Vec::new(),
            widgets: IndexMap::new(),
        }
    }

    pub fn table(&self) -> &ElementId {
        &self.table
    }

    pub fn rows(&self) -> &[RubricRow] {
        &self.rows
    }

    pub fn rubric_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, ordinal: Ordinal) -> Option<&RubricRow> {
        self.rows.iter().find(|row| row.ordinal == ordinal)
    }

    /// Widget of the dropdown row `ordinal`.
    pub fn widget(&self, ordinal: Ordinal) -> Option<&WidgetHandle> {
        self.widgets.get(&ordinal)
    }

    pub fn widgets(&self) -> impl Iterator<Item = (Ordinal, &WidgetHandle)> {
        self.widgets.iter().map(|(ordinal, widget)| (*ordinal, widget))
    }

    pub fn add_dropdown(&mut self, document: &mut Document) -> Result<Ordinal, DocumentError> {
        self.add(document, Presentation::Dropdown)
    }

    pub fn add_numeric(&mut self, document: &mut Document) -> Result<Ordinal, DocumentError> {
        self.add(document, Presentation::Numeric)
    }

    pub fn add_checkbox(&mut self, document: &mut Document) -> Result<Ordinal, DocumentError> {
        self.add(document, Presentation::Checkbox)
    }

    /// Renders and appends a row of `presentation`.
    ///
    /// Dropdown rows also get a widget bound to the row's select and hidden
    /// field, and their edit button is bound to [`Msg::EditRubric`]. A dropdown
    /// row whose markup lacks any of those elements is rejected before the
    /// document is touched.
    pub fn add(&mut self, document: &mut Document, presentation: Presentation) -> Result<Ordinal, DocumentError> {
        let ordinal = self.next_ordinal();
        let markup = self.templates.render_row(ordinal, presentation);
        let ids = RubricIds::new(ordinal);
        if presentation == Presentation::Dropdown {
            let required = [ids.select(), ids.hidden(), ids.edit_button()];
            if let Some(missing) = required.into_iter().find(|id| !markup.contains(id)) {
                warn!(%ordinal, element = %missing, "dropdown row markup is incomplete");
                return Err(DocumentError::UnknownElement(missing));
            }
        }
        document.append_markup(&self.table, markup)?;

        if presentation == Presentation::Dropdown {
            let widget = ValueSetWidget::new(ids.select(), Some(ids.hidden())).into_handle();
            document.bind_click(&ids.edit_button(), Msg::EditRubric(ordinal))?;
            widget.borrow().redraw(document);
            self.widgets.insert(ordinal, widget);
        }

        self.rows.push(RubricRow {
            ordinal,
            presentation,
            header: presentation.header().to_string(),
        });
        info!(%ordinal, presentation = %presentation, "added rubric row");
        Ok(ordinal)
    }

    pub fn set_add_dropdown_button(&self, document: &mut Document, button: &ElementId) -> Result<(), DocumentError> {
        document.bind_click(button, Msg::AddRubric(Presentation::Dropdown))
    }

    pub fn set_add_numeric_button(&self, document: &mut Document, button: &ElementId) -> Result<(), DocumentError> {
        document.bind_click(button, Msg::AddRubric(Presentation::Numeric))
    }

    pub fn set_add_checkbox_button(&self, document: &mut Document, button: &ElementId) -> Result<(), DocumentError> {
        document.bind_click(button, Msg::AddRubric(Presentation::Checkbox))
    }

    fn next_ordinal(&mut self) -> Ordinal {
        let ordinal = self.last.map_or(Ordinal::FIRST, |last| last.next());
        self.last = Some(ordinal);
        ordinal
    }
}
