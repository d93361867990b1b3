//! Platform-specific configuration

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Command the print rendition is piped into
/// - Linux/BSD: `lp`
/// - macOS: `lpr`
/// - Windows: PowerShell `Out-Printer`
#[cfg(target_os = "macos")]
pub fn default_print_command() -> Vec<String> {
    vec!["lpr".to_string()]
}

#[cfg(target_os = "windows")]
pub fn default_print_command() -> Vec<String> {
    vec![
        "powershell".to_string(),
        "-NoProfile".to_string(),
        "-Command".to_string(),
        "$input | Out-Printer".to_string(),
    ]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn default_print_command() -> Vec<String> {
    vec!["lp".to_string()]
}
