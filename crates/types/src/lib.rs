//! Shared type definitions for the rubric editor: the value map behind
//! dropdown rubrics, rubric kinds and ordinals, the element id scheme, and the
//! messages and effects exchanged between the page model and its host.

pub mod definition;
pub mod events;
pub mod ids;
pub mod rubric;
pub mod value_map;

pub use definition::{DefinitionError, FormSnapshot, RubricDefinition, RubricDefinitionFile};
pub use events::{Effect, Modal, Msg, Severity};
pub use ids::{DialogIds, ElementId, RubricIds};
pub use rubric::{Ordinal, ParsePresentationError, Presentation, RubricRow};
pub use value_map::{ParseValueMapError, Score, ValueMap};
