//! Value-set widget: a value map rendered into a select, optionally mirrored
//! into a hidden field as `name:score` pairs.

use std::cell::RefCell;
use std::rc::Rc;

use rubrics_types::{ElementId, Score, ValueMap};
use tracing::debug;

use crate::surface::{SelectOption, Surface};

/// Shared handle to a widget owned by its rubric row.
///
/// The editor only ever keeps a `Weak` view of a handle while editing it.
pub type WidgetHandle = Rc<RefCell<ValueSetWidget>>;

/// Wraps a select element displaying a value map.
///
/// Every mutator redraws: the select's options are rebuilt from the map and,
/// when a serialization target is bound, the flattened `name:score` form is
/// written into it.
#[derive(Debug, Clone)]
pub struct ValueSetWidget {
    values: ValueMap,
    display: ElementId,
    serialization: Option<ElementId>,
}

impl ValueSetWidget {
    pub fn new(display: ElementId, serialization: Option<ElementId>) -> Self {
        Self {
            values: ValueMap::new(),
            display,
            serialization,
        }
    }

    pub fn into_handle(self) -> WidgetHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn display(&self) -> &ElementId {
        &self.display
    }

    pub fn serialization(&self) -> Option<&ElementId> {
        self.serialization.as_ref()
    }

    pub fn value_map(&self) -> &ValueMap {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Score> {
        self.values.get(name)
    }

    /// Inserts or overwrites `name` and selects it in the display.
    pub fn put(&mut self, surface: &mut dyn Surface, name: impl Into<String>, score: impl Into<Score>) {
        let name = name.into();
        self.values.insert(name.clone(), score);
        self.redraw(surface);
        surface.select_option(&self.display, &name);
    }

    pub fn remove(&mut self, surface: &mut dyn Surface, name: &str) {
        self.values.remove(name);
        self.redraw(surface);
    }

    pub fn clear(&mut self, surface: &mut dyn Surface) {
        self.values.clear();
        self.redraw(surface);
    }

    /// Replaces the whole map with a copy of `values`, redrawing once.
    pub fn set_values(&mut self, surface: &mut dyn Surface, values: &ValueMap) {
        self.values.clear();
        self.values
            .extend(values.iter().map(|(name, score)| (name.to_string(), score.clone())));
        self.redraw(surface);
    }

    pub fn serialized_form(&self) -> String {
        self.values.serialized_form()
    }

    pub fn redraw(&self, surface: &mut dyn Surface) {
        let options = self
            .values
            .iter()
            .map(|(name, score)| SelectOption::for_entry(name, score))
            .collect();
        surface.replace_options(&self.display, options);
        if let Some(target) = &self.serialization {
            surface.set_value(target, &self.serialized_form());
        }
        debug!(display = %self.display, entries = self.values.len(), "redrew value set");
    }
}
