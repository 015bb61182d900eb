use chrono::{DateTime, Local};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use rubrics_types::Severity;

/// Upper bound on retained entries; older ones are dropped first.
pub const MAX_LOG_ENTRIES: usize = 500;

/// A status line shown in the logs pane.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug)]
pub struct LogsState {
    pub entries: Vec<LogEntry>,
    pub list_state: ListState,
    pub is_visible: bool,
    pub focus: FocusFlag,
}

impl Default for LogsState {
    fn default() -> Self {
        let mut state = LogsState {
            entries: Vec::new(),
            list_state: ListState::default(),
            is_visible: true,
            focus: FocusFlag::new().with_name("root.logs"),
        };
        state.push(Severity::Info, "Rubric editor ready");
        state
    }
}

impl LogsState {
    /// Appends an entry and keeps the newest entry selected.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            severity,
            message: message.into(),
        });
        if self.entries.len() > MAX_LOG_ENTRIES {
            let overflow = self.entries.len() - MAX_LOG_ENTRIES;
            self.entries.drain(..overflow);
        }
        self.list_state.select(Some(self.entries.len() - 1));
    }

    pub fn toggle_visible(&mut self) {
        self.is_visible = !self.is_visible;
    }

    pub fn select_prev(&mut self) {
        let previous = self.list_state.selected().map_or(0, |index| index.saturating_sub(1));
        self.list_state.select(Some(previous));
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let next = self
            .list_state
            .selected()
            .map_or(0, |index| (index + 1).min(self.entries.len() - 1));
        self.list_state.select(Some(next));
    }
}

impl HasFocus for LogsState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
