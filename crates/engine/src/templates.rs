//! Row templates.
//!
//! Rendering a rubric row is two-stage: the presentation-specific template
//! renders the row's edit widgets first, and the outer rubric template wraps
//! them into a complete row. Templates are opaque to the manager; any
//! `Fn(&RowValues) -> Markup` can stand in for one.

use std::fmt;

use rubrics_types::{ElementId, Ordinal, Presentation, RubricIds};

use crate::document::Element;

/// An ordered fragment of elements produced by a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    nodes: Vec<(ElementId, Element)>,
}

impl Markup {
    pub fn push(&mut self, id: ElementId, element: Element) {
        self.nodes.push((id, element));
    }

    pub fn with(mut self, id: ElementId, element: Element) -> Self {
        self.push(id, element);
        self
    }

    pub fn extend(&mut self, other: Markup) {
        self.nodes.extend(other.nodes);
    }

    pub fn nodes(&self) -> &[(ElementId, Element)] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<(ElementId, Element)> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.nodes.iter().any(|(node, _)| node == id)
    }
}

/// Values a row template renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValues {
    pub ordinal: Ordinal,
    pub presentation: Presentation,
    pub header: String,
    /// Output of the presentation-specific template; empty while that
    /// template itself renders.
    pub edit_widgets: Markup,
}

impl RowValues {
    pub fn ids(&self) -> RubricIds {
        RubricIds::new(self.ordinal)
    }
}

pub trait RowTemplate {
    fn render(&self, values: &RowValues) -> Markup;
}

impl<F> RowTemplate for F
where
    F: Fn(&RowValues) -> Markup,
{
    fn render(&self, values: &RowValues) -> Markup {
        self(values)
    }
}

/// Outer row: the row element, its criterion name input and presentation
/// field, followed by the edit widgets.
pub fn rubric_row(values: &RowValues) -> Markup {
    let ids = values.ids();
    let mut markup = Markup::default()
        .with(
            ids.row(),
            Element::Row {
                ordinal: values.ordinal,
                presentation: values.presentation,
                header: values.header.clone(),
                children: Vec::new(),
            },
        )
        .with(ids.name_input(), Element::text_input("Criterion"))
        .with(ids.presentation(), Element::hidden(values.presentation.as_str()));
    markup.extend(values.edit_widgets.clone());
    markup
}

/// Select showing the value map, hidden field carrying its serialized form,
/// and the button opening the value-set editor.
pub fn dropdown_widgets(values: &RowValues) -> Markup {
    let ids = values.ids();
    Markup::default()
        .with(ids.select(), Element::select())
        .with(ids.hidden(), Element::hidden(""))
        .with(ids.edit_button(), Element::button("Edit values"))
}

pub fn numeric_widgets(values: &RowValues) -> Markup {
    Markup::default().with(values.ids().max_score(), Element::text_input("Max score"))
}

pub fn checkbox_widgets(values: &RowValues) -> Markup {
    Markup::default().with(values.ids().checkbox_score(), Element::text_input("Score"))
}

/// The outer rubric template plus one edit-widget template per presentation.
pub struct RowTemplates {
    pub rubric: Box<dyn RowTemplate>,
    pub dropdown: Box<dyn RowTemplate>,
    pub numeric: Box<dyn RowTemplate>,
    pub checkbox: Box<dyn RowTemplate>,
}

impl RowTemplates {
    pub fn for_presentation(&self, presentation: Presentation) -> &dyn RowTemplate {
        match presentation {
            Presentation::Dropdown => self.dropdown.as_ref(),
            Presentation::Numeric => self.numeric.as_ref(),
            Presentation::Checkbox => self.checkbox.as_ref(),
        }
    }

    /// Renders a complete row for `ordinal`.
    pub fn render_row(&self, ordinal: Ordinal, presentation: Presentation) -> Markup {
        let mut values = RowValues {
            ordinal,
            presentation,
            header: presentation.header().to_string(),
            edit_widgets: Markup::default(),
        };
        values.edit_widgets = self.for_presentation(presentation).render(&values);
        self.rubric.render(&values)
    }
}

impl Default for RowTemplates {
    fn default() -> Self {
        Self {
            rubric: Box::new(rubric_row),
            dropdown: Box::new(dropdown_widgets),
            numeric: Box::new(numeric_widgets),
            checkbox: Box::new(checkbox_widgets),
        }
    }
}

impl fmt::Debug for RowTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RowTemplates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids_of(markup: &Markup) -> Vec<&str> {
        markup.nodes().iter().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn dropdown_row_wraps_edit_widgets() {
        let templates = RowTemplates::default();
        let markup = templates.render_row(Ordinal::new(2).expect("ordinal"), Presentation::Dropdown);
        assert_eq!(
            ids_of(&markup),
            vec![
                "rubric-2",
                "rubric-2-name",
                "rubric-2-presentation",
                "rubric-2-select",
                "rubric-2-hidden",
                "rubric-2-edit-button",
            ]
        );
    }

    #[test]
    fn presentation_field_carries_kind_token() {
        let markup = RowTemplates::default().render_row(Ordinal::FIRST, Presentation::Checkbox);
        let field = markup
            .nodes()
            .iter()
            .find(|(id, _)| id.as_str() == "rubric-1-presentation")
            .map(|(_, element)| element.clone());
        assert_eq!(field, Some(Element::hidden("CHECKBOX")));
    }

    #[test]
    fn closures_can_replace_templates() {
        let templates = RowTemplates {
            numeric: Box::new(|values: &RowValues| {
                Markup::default().with(values.ids().row().child("slider"), Element::text_input("Slider"))
            }),
            ..RowTemplates::default()
        };
        let markup = templates.render_row(Ordinal::FIRST, Presentation::Numeric);
        assert!(ids_of(&markup).contains(&"rubric-1-slider"));
        assert!(!ids_of(&markup).contains(&"rubric-1-max-score"));
    }
}
