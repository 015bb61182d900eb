//! Application state for the rubric editor's terminal front end.
//!
//! [`App`] owns the rubric page together with the terminal-only state that
//! renders it: table selection, the editor dialog's inputs, the logs pane,
//! the active theme and the focus ring.

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use rubrics_engine::RubricPage;
use rubrics_types::{Effect, ElementId, Modal, Msg, Severity};
use rubrics_util::UserPreferences;
use tracing::{debug, warn};

use crate::ui::components::logs::LogsState;
use crate::ui::components::rubric_table::RubricTableState;
use crate::ui::components::value_set_editor::ValueSetEditorState;
use crate::ui::theme::{self, LoadedTheme, Theme, ThemeDefinition};

pub struct App {
    pub page: RubricPage,
    pub theme: Box<dyn Theme>,
    pub theme_definition: &'static ThemeDefinition,
    preferences: UserPreferences,

    pub table: RubricTableState,
    pub editor: ValueSetEditorState,
    pub logs: LogsState,

    pub open_modal: Option<Modal>,
    pub focus: Focus,
    container: FocusFlag,
    pub should_quit: bool,
}

impl App {
    pub fn new(page: RubricPage, loaded: LoadedTheme, preferences: UserPreferences) -> Self {
        let mut app = Self {
            page,
            theme: loaded.theme,
            theme_definition: loaded.definition,
            preferences,
            table: RubricTableState::default(),
            editor: ValueSetEditorState::default(),
            logs: LogsState::default(),
            open_modal: None,
            focus: Focus::default(),
            container: FocusFlag::new().with_name("app"),
            should_quit: false,
        };
        let row_count = app.page.manager().rubric_count();
        if row_count > 0 {
            app.table.select(0, row_count);
        }
        app.focus = FocusBuilder::build_for(&app);
        app.focus.focus(&app.table.f_table);
        app
    }

    /// Clicks a page element the way a pointer would: the element takes
    /// focus, then its binding runs.
    pub fn click(&mut self, id: &ElementId) -> Vec<Effect> {
        self.page.focus(id);
        let effects = self.page.click(id);
        self.after_page_change(id);
        effects
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        debug!(?msg, "dispatching to page");
        let effects = self.page.dispatch(msg);
        self.editor.sync_from(&self.page);
        effects
    }

    /// Routes messages that are not page interactions.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick | Msg::Resize(..) => Vec::new(),
            other => self.dispatch(other.clone()),
        }
    }

    pub fn append_log(&mut self, severity: Severity, message: impl Into<String>) {
        self.logs.push(severity, message);
    }

    /// Switches to the next theme in the catalog and remembers the choice.
    pub fn cycle_theme(&mut self) {
        let next = theme::catalog::next_after(self.theme_definition.id);
        let loaded = LoadedTheme::from_definition(next);
        self.theme = loaded.theme;
        self.theme_definition = loaded.definition;
        if let Err(error) = self.preferences.set_preferred_theme(Some(next.id.to_string())) {
            warn!(%error, theme = next.id, "failed to persist theme preference");
        }
        self.append_log(Severity::Info, format!("Theme: {}", next.label));
    }

    pub fn rebuild_focus(&mut self) {
        let old = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(&*self, Some(old));
    }

    /// Mirrors focus moves made by the page into the terminal focus ring.
    fn after_page_change(&mut self, clicked: &ElementId) {
        self.editor.sync_from(&self.page);
        let Some(focused) = self.page.document().focused().cloned() else {
            return;
        };
        if &focused == clicked {
            return;
        }
        let ids = self.page.editor().ids();
        if focused == ids.value_input() {
            self.focus.focus(&self.editor.f_value);
        } else if focused == ids.score_input() {
            self.focus.focus(&self.editor.f_score);
        }
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        // The open dialog traps focus.
        if self.open_modal.is_some() {
            builder.widget(&self.editor);
            return;
        }
        builder.widget(&self.table);
        if self.logs.is_visible {
            builder.widget(&self.logs);
        }
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
