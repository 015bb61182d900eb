pub mod path_processing;
pub mod preferences;

pub use path_processing::*;
pub use preferences::{PreferencesError, UserPreferences};
