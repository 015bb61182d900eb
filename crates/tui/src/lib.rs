//! # Rubrics TUI
//!
//! Terminal front end for the rubric editor, built on Ratatui. It renders the
//! rubric page held by [`rubrics_engine::RubricPage`] as a table of rows with
//! add buttons, a modal value-set editor for dropdown rows, and a logs pane
//! for status messages.
//!
//! ## Key Features
//!
//! - Keyboard and mouse driven row editing
//! - Copy-in/copy-out value-set editing in a modal dialog
//! - Dracula and Nord themes, remembered across runs
//!
//! ## Architecture
//!
//! Each UI element is a component that handles its own events and renders
//! itself. Components turn input into clicks on page elements and return
//! effects that the runtime applies.

mod app;
mod ui;

use anyhow::{Context, Result};
use rubrics_engine::{PageConfig, RubricPage};
use rubrics_types::{FormSnapshot, RubricDefinitionFile};
use rubrics_util::UserPreferences;
use tracing::{info, warn};

pub use ui::theme::ThemeDefinition;
pub use ui::theme::catalog::THEME_DEFINITIONS;

/// Startup options for [`run`].
#[derive(Debug, Default)]
pub struct TuiOptions {
    /// Theme id or alias requested on the command line; remembered when it
    /// resolves.
    pub theme: Option<String>,
    /// Rows to seed the page with.
    pub definitions: Option<RubricDefinitionFile>,
}

/// Runs the editor until the user quits and returns the submitted form.
///
/// # Errors
///
/// Fails when the terminal cannot be set up or restored, or when the seed
/// definitions cannot be placed into the page.
pub async fn run(options: TuiOptions) -> Result<FormSnapshot> {
    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "preferences unavailable; theme choices will not persist");
        UserPreferences::ephemeral()
    });

    let loaded = ui::theme::load(options.theme.as_deref(), preferences.preferred_theme().as_deref());
    if let Some(requested) = options.theme.as_deref().and_then(ui::theme::catalog::resolve)
        && let Err(error) = preferences.set_preferred_theme(Some(requested.id.to_string()))
    {
        warn!(%error, "failed to persist theme preference");
    }

    let mut page = RubricPage::new(PageConfig::default()).context("failed to build rubric page")?;
    if let Some(definitions) = &options.definitions {
        page.load_definitions(definitions).context("failed to load rubric definitions")?;
    }
    info!(theme = loaded.definition.id, rows = page.manager().rubric_count(), "starting rubric editor");

    let app = app::App::new(page, loaded, preferences);
    let app = ui::runtime::run_app(app).await?;
    Ok(app.page.form_snapshot())
}
