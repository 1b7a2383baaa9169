//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the copy shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Copy shortcut display inside the submission dialog
/// - macOS: "y / Cmd+C"
/// - Linux/Windows: "y / Ctrl+C"
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "y / Cmd+C";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "y / Ctrl+C";
