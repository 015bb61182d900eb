//! In-memory page model.
//!
//! The [`Document`] stores every element of the rubric page in insertion
//! order, keyed by [`ElementId`]. It knows which container (table row or
//! dialog) each element belongs to, which element holds input focus, and
//! which message a click on a bound button resolves to. Hosts render it and
//! feed clicks and keystrokes back through [`crate::RubricPage`].

use std::collections::HashMap;

use indexmap::IndexMap;
use rubrics_types::{ElementId, FormSnapshot, Msg, Ordinal, Presentation};
use thiserror::Error;
use tracing::debug;

use crate::surface::{SelectOption, Surface};
use crate::templates::Markup;

/// A single element of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Container of rubric rows, in append order.
    Table { rows: Vec<ElementId> },
    /// One rubric row; `children` lists the row's own elements.
    Row {
        ordinal: Ordinal,
        presentation: Presentation,
        header: String,
        children: Vec<ElementId>,
    },
    Select {
        options: Vec<SelectOption>,
        selected: Option<String>,
    },
    Hidden { value: String },
    TextInput { label: String, value: String },
    Button { label: String },
    Dialog { title: String, open: bool },
}

impl Element {
    pub fn select() -> Self {
        Element::Select {
            options: Vec::new(),
            selected: None,
        }
    }

    pub fn hidden(value: impl Into<String>) -> Self {
        Element::Hidden { value: value.into() }
    }

    pub fn text_input(label: impl Into<String>) -> Self {
        Element::TextInput {
            label: label.into(),
            value: String::new(),
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Element::Button { label: label.into() }
    }
}

/// Error surfaced when markup cannot be placed into the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("element id '{0}' is already in use")]
    DuplicateId(ElementId),
    #[error("no element with id '{0}'")]
    UnknownElement(ElementId),
    #[error("element '{0}' is not a table")]
    NotATable(ElementId),
    #[error("row markup must start with a row element")]
    MissingRowRoot,
}

#[derive(Debug, Default)]
pub struct Document {
    elements: IndexMap<ElementId, Element>,
    parents: HashMap<ElementId, ElementId>,
    bindings: HashMap<ElementId, Msg>,
    focused: Option<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a top-level element.
    pub fn insert(&mut self, id: ElementId, element: Element) -> Result<(), DocumentError> {
        if self.elements.contains_key(&id) {
            return Err(DocumentError::DuplicateId(id));
        }
        self.elements.insert(id, element);
        Ok(())
    }

    /// Inserts an element owned by the container `parent`.
    pub fn insert_child(&mut self, parent: &ElementId, id: ElementId, element: Element) -> Result<(), DocumentError> {
        if !self.elements.contains_key(parent) {
            return Err(DocumentError::UnknownElement(parent.clone()));
        }
        self.insert(id.clone(), element)?;
        self.parents.insert(id, parent.clone());
        Ok(())
    }

    /// Appends rendered row markup to `table`.
    ///
    /// The first node of `markup` must be the row itself; every following
    /// node becomes one of its children. Nothing is inserted when any id
    /// collides with an existing element.
    pub fn append_markup(&mut self, table: &ElementId, markup: Markup) -> Result<ElementId, DocumentError> {
        match self.elements.get(table) {
            Some(Element::Table { .. }) => {}
            Some(_) => return Err(DocumentError::NotATable(table.clone())),
            None => return Err(DocumentError::UnknownElement(table.clone())),
        }

        let mut nodes = markup.into_nodes().into_iter();
        let Some((row_id, mut row)) = nodes.next() else {
            return Err(DocumentError::MissingRowRoot);
        };
        let Element::Row { children, .. } = &mut row else {
            return Err(DocumentError::MissingRowRoot);
        };
        let child_nodes: Vec<(ElementId, Element)> = nodes.collect();

        let mut seen = std::collections::HashSet::new();
        for id in std::iter::once(&row_id).chain(child_nodes.iter().map(|(id, _)| id)) {
            if self.elements.contains_key(id) || !seen.insert(id) {
                return Err(DocumentError::DuplicateId(id.clone()));
            }
        }

        *children = child_nodes.iter().map(|(id, _)| id.clone()).collect();
        self.elements.insert(row_id.clone(), row);
        self.parents.insert(row_id.clone(), table.clone());
        for (id, element) in child_nodes {
            self.parents.insert(id.clone(), row_id.clone());
            self.elements.insert(id, element);
        }
        if let Some(Element::Table { rows }) = self.elements.get_mut(table) {
            rows.push(row_id.clone());
        }
        Ok(row_id)
    }

    /// Binds a click on `id` to `msg`. Bound clicks never fall through to a
    /// default action.
    pub fn bind_click(&mut self, id: &ElementId, msg: Msg) -> Result<(), DocumentError> {
        if !self.elements.contains_key(id) {
            return Err(DocumentError::UnknownElement(id.clone()));
        }
        debug!(element = %id, ?msg, "bound click handler");
        self.bindings.insert(id.clone(), msg);
        Ok(())
    }

    /// Resolves a click on `id` to its bound message, if any.
    pub fn click(&self, id: &ElementId) -> Option<Msg> {
        self.bindings.get(id).cloned()
    }

    pub fn binding(&self, id: &ElementId) -> Option<&Msg> {
        self.bindings.get(id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn parent(&self, id: &ElementId) -> Option<&ElementId> {
        self.parents.get(id)
    }

    pub fn focused(&self) -> Option<&ElementId> {
        self.focused.as_ref()
    }

    /// Rows of `table`, in append order. Empty when `table` is not a table.
    pub fn table_rows(&self, table: &ElementId) -> &[ElementId] {
        match self.elements.get(table) {
            Some(Element::Table { rows }) => rows,
            _ => &[],
        }
    }

    /// Children of a row, in template order.
    pub fn row_children(&self, row: &ElementId) -> &[ElementId] {
        match self.elements.get(row) {
            Some(Element::Row { children, .. }) => children,
            _ => &[],
        }
    }

    /// Rendered options of a select element. Empty when `id` is not a select.
    pub fn options(&self, id: &ElementId) -> &[SelectOption] {
        match self.elements.get(id) {
            Some(Element::Select { options, .. }) => options,
            _ => &[],
        }
    }

    pub fn is_dialog_open(&self, id: &ElementId) -> bool {
        matches!(self.elements.get(id), Some(Element::Dialog { open: true, .. }))
    }

    /// Collects every hidden field and text input inside the rows of `table`.
    pub fn form_snapshot(&self, table: &ElementId) -> FormSnapshot {
        let mut snapshot = FormSnapshot::default();
        for row in self.table_rows(table) {
            for child in self.row_children(row) {
                match self.elements.get(child) {
                    Some(Element::Hidden { value }) | Some(Element::TextInput { value, .. }) => {
                        snapshot.insert(child.clone(), value.clone());
                    }
                    _ => {}
                }
            }
        }
        snapshot
    }
}

impl Surface for Document {
    fn replace_options(&mut self, id: &ElementId, new_options: Vec<SelectOption>) {
        match self.elements.get_mut(id) {
            Some(Element::Select { options, selected }) => {
                if selected
                    .as_ref()
                    .is_some_and(|value| !new_options.iter().any(|option| &option.value == value))
                {
                    *selected = None;
                }
                *options = new_options;
            }
            _ => debug!(element = %id, "ignoring option update for non-select element"),
        }
    }

    fn select_option(&mut self, id: &ElementId, value: &str) {
        match self.elements.get_mut(id) {
            Some(Element::Select { options, selected }) => {
                if options.iter().any(|option| option.value == value) {
                    *selected = Some(value.to_string());
                }
            }
            _ => debug!(element = %id, "ignoring selection for non-select element"),
        }
    }

    fn set_value(&mut self, id: &ElementId, new_value: &str) {
        match self.elements.get_mut(id) {
            Some(Element::Hidden { value }) | Some(Element::TextInput { value, .. }) => {
                *value = new_value.to_string();
            }
            _ => debug!(element = %id, "ignoring value for element without a value"),
        }
    }

    fn value(&self, id: &ElementId) -> Option<&str> {
        match self.elements.get(id)? {
            Element::Hidden { value } | Element::TextInput { value, .. } => Some(value),
            Element::Select { selected, .. } => selected.as_deref(),
            _ => None,
        }
    }

    fn focus(&mut self, id: &ElementId) {
        if self.elements.contains_key(id) {
            self.focused = Some(id.clone());
        }
    }

    fn open_dialog(&mut self, id: &ElementId) {
        if let Some(Element::Dialog { open, .. }) = self.elements.get_mut(id) {
            *open = true;
        }
    }

    fn close_dialog(&mut self, id: &ElementId) {
        if let Some(Element::Dialog { open, .. }) = self.elements.get_mut(id) {
            *open = false;
        }
        if self.focused.as_ref().is_some_and(|focused| self.parents.get(focused) == Some(id)) {
            self.focused = None;
        }
    }
}
