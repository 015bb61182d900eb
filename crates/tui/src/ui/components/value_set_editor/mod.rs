mod state;
mod value_set_editor_component;

pub use state::ValueSetEditorState;
pub use value_set_editor_component::ValueSetEditorComponent;
