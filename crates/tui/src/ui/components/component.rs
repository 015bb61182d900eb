//! Component abstraction for the rubric editor's views.
//!
//! Components own only their local UI behavior. They read and mutate the
//! shared [`App`] and report anything the runtime must do as [`Effect`]s.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};
use rubrics_types::Effect;

use crate::app::App;

pub(crate) trait Component {
    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events routed to this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into `rect`. State changes belong in the event
    /// handlers; rendering only records layout for hit-testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the footer while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }

    /// Sub-areas the component lays its content out in, within `area`.
    fn get_preferred_layout(&self, _app: &App, _area: Rect) -> Vec<Rect> {
        Vec::new()
    }
}
