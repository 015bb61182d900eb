//! Theme styling for the terminal front end.
//!
//! Palettes (Dracula, Nord) map onto semantic [`ThemeRoles`]; components only
//! ever reach for roles and the helpers in [`theme_helpers`], never raw
//! colors.

use std::env;

use tracing::{debug, warn};

pub mod catalog;
pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};

/// Environment variable naming the theme to use.
pub const THEME_ENV: &str = "TUI_THEME";

/// Theme plus the catalog entry it was built from.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    pub fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

/// Picks a theme: an explicit request first, then `TUI_THEME`, then the
/// persisted preference, then the default. Unknown names fall through.
pub fn load(explicit: Option<&str>, preferred: Option<&str>) -> LoadedTheme {
    let from_env = env::var(THEME_ENV).ok();
    let candidates = [
        ("argument", explicit),
        ("environment", from_env.as_deref()),
        ("preferences", preferred),
    ];

    for (source, name) in candidates {
        let Some(name) = name else { continue };
        match catalog::resolve(name) {
            Some(definition) => {
                debug!(theme = definition.id, source, "selected theme");
                return LoadedTheme::from_definition(definition);
            }
            None => warn!(theme = name, source, "ignoring unknown theme"),
        }
    }

    LoadedTheme::from_definition(catalog::default_theme())
}
