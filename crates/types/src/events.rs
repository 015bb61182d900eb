use crate::rubric::{Ordinal, Presentation};

/// Messages that drive the rubric page.
///
/// Click bindings in the page model resolve to one of these, and the terminal
/// front end routes its own periodic events through the same enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Append a new rubric row of the given kind
    AddRubric(Presentation),
    /// Open the value-set editor against the dropdown row with this ordinal
    EditRubric(Ordinal),
    /// Add the dialog's name/score inputs to the scratch value map
    EditorAdd,
    /// Remove the entry named by the dialog's name input
    EditorDelete,
    /// Empty the scratch value map and both inputs
    EditorClearAll,
    /// Commit the scratch value map back to the widget under edit
    EditorConfirm,
    /// Discard the scratch value map
    EditorCancel,
    /// Periodic UI tick
    Tick,
    /// Terminal resized
    Resize(u16, u16),
}

/// Modal overlays the host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    ValueSetEditor,
}

/// Severity attached to log effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

/// Side effects reported back to the host after handling a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a modal overlay
    ShowModal(Modal),
    /// Close the currently open modal
    CloseModal,
    /// Queue another message
    SendMsg(Msg),
    /// Surface a status line in the host's log pane
    Log { severity: Severity, message: String },
}

impl Effect {
    pub fn info(message: impl Into<String>) -> Self {
        Effect::Log {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Effect::Log {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Effect::Log {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}
