//! Terminal user interface: components, the root view, theming and the
//! runtime that drives them.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
