//! Platform-specific configuration

/// Submit shortcut display for help text.
/// Ctrl is used everywhere: terminals rarely forward Cmd.
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Reset shortcut display
pub const RESET_SHORTCUT: &str = "Ctrl+R";
