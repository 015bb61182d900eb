//! UI components: rubric table, value-set editor dialog, logs.

pub mod common;
pub mod component;
pub mod logs;
pub mod rubric_table;
pub mod value_set_editor;

pub(crate) use component::Component;
pub use logs::LogsComponent;
pub use rubric_table::RubricTableComponent;
pub use value_set_editor::ValueSetEditorComponent;
