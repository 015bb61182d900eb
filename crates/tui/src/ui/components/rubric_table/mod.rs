mod rubric_table_component;
mod state;

pub use rubric_table_component::RubricTableComponent;
pub use state::{RowColumn, RubricTableState};
