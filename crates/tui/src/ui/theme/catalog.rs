use super::{DraculaTheme, NordTheme, Theme};

/// A selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Alternate spellings accepted from flags and `TUI_THEME`.
    pub aliases: &'static [&'static str],
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

/// Ordered list of themes; the first entry is the default.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "dracula",
        label: "Dracula",
        description: "High-contrast default tuned for dark terminals.",
        aliases: &["dracula", "default"],
        factory: || Box::new(DraculaTheme::new()),
    },
    ThemeDefinition {
        id: "nord",
        label: "Nord",
        description: "Calm polar blues with aurora status colors.",
        aliases: &["nord", "polar"],
        factory: || Box::new(NordTheme::new()),
    },
];

pub fn default_theme() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// Finds a theme by id or alias, ignoring case and `-`/`_` differences.
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    THEME_DEFINITIONS
        .iter()
        .find(|definition| normalize(definition.id) == wanted || definition.aliases.iter().any(|alias| normalize(alias) == wanted))
}

/// The theme after `id` in catalog order, wrapping around.
pub fn next_after(id: &str) -> &'static ThemeDefinition {
    let index = THEME_DEFINITIONS.iter().position(|definition| definition.id == id).unwrap_or(0);
    &THEME_DEFINITIONS[(index + 1) % THEME_DEFINITIONS.len()]
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}
