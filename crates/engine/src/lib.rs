//! # Rubrics Engine
//!
//! The engine holds the rubric page independently of how it is displayed. A
//! [`Document`] models the page's elements, widgets and the editor render
//! into it through the [`Surface`] trait, and [`RubricPage`] ties the pieces
//! together behind a click/message interface.
//!
//! ## Key Features
//!
//! - **Value-set widgets**: [`ValueSetWidget`] keeps a dropdown's name → score
//!   map in sync with its option list and hidden serialized field
//! - **Copy-in/copy-out editing**: [`ValueSetEditor`] edits a scratch copy and
//!   only writes back on confirm
//! - **Row management**: [`RubricManager`] numbers rows, renders them through
//!   [`RowTemplates`] and binds dropdown edit buttons
//!
//! ## Usage
//!
//! ```rust
//! use rubrics_engine::{PageConfig, RubricPage, Surface};
//! use rubrics_types::{ElementId, Msg, Ordinal, Presentation};
//!
//! let mut page = RubricPage::new(PageConfig::default())?;
//! page.dispatch(Msg::AddRubric(Presentation::Dropdown));
//! page.dispatch(Msg::EditRubric(Ordinal::FIRST));
//!
//! let document = page.document_mut();
//! document.set_value(&ElementId::new("dropdown-dialog-value-input"), "excellent");
//! document.set_value(&ElementId::new("dropdown-dialog-score-input"), "4");
//! page.dispatch(Msg::EditorAdd);
//! page.dispatch(Msg::EditorConfirm);
//!
//! let hidden = page.document().value(&ElementId::new("rubric-1-hidden"));
//! assert_eq!(hidden, Some("excellent:4"));
//! # Ok::<(), rubrics_engine::DocumentError>(())
//! ```

pub mod document;
pub mod editor;
pub mod manager;
pub mod page;
pub mod surface;
pub mod templates;
pub mod widget;

pub use document::{Document, DocumentError, Element};
pub use editor::{EditorState, ValueSetEditor};
pub use manager::RubricManager;
pub use page::{PageConfig, RubricPage};
pub use surface::{SelectOption, Surface};
pub use templates::{Markup, RowTemplate, RowTemplates, RowValues};
pub use widget::{ValueSetWidget, WidgetHandle};
