//! The host capabilities widgets and the editor render through.
//!
//! Widgets never hold on to the elements they draw into; they keep element
//! ids and receive a `Surface` for the duration of each operation. Operations
//! addressing an id the surface does not know are ignored.

use rubrics_types::{ElementId, Score};

/// One entry of a rendered option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Text shown to the user, `name [score]`.
    pub label: String,
    /// Value reported when the option is selected, the bare name.
    pub value: String,
}

impl SelectOption {
    pub fn for_entry(name: &str, score: &Score) -> Self {
        Self {
            label: format!("{name} [{score}]"),
            value: name.to_string(),
        }
    }
}

pub trait Surface {
    /// Replaces every option of the select element `id`.
    fn replace_options(&mut self, id: &ElementId, options: Vec<SelectOption>);

    /// Marks the option whose value is `value` as selected.
    fn select_option(&mut self, id: &ElementId, value: &str);

    /// Writes the value of a text input or hidden field.
    fn set_value(&mut self, id: &ElementId, value: &str);

    /// Reads the value of a text input or hidden field, or the selected value
    /// of a select element.
    fn value(&self, id: &ElementId) -> Option<&str>;

    /// Moves input focus to `id`.
    fn focus(&mut self, id: &ElementId);

    fn open_dialog(&mut self, id: &ElementId);

    fn close_dialog(&mut self, id: &ElementId);
}
