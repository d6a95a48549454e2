//! Terminal styling and color utilities.
//!
//! ANSI escape codes plus color detection, so every command styles its
//! headings the same way and honours `--no-color` and `NO_COLOR`.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for headings and loadout names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for column headers.
    pub const CYAN: &str = "\x1b[36m";
    /// Orange (256-color) for warnings such as empty results.
    pub const ORANGE: &str = "\x1b[38;5;208m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is
/// disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub heading: &'static str,
    pub muted: &'static str,
    pub header: &'static str,
    pub warning: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            heading: colors::WHITE_BOLD,
            muted: colors::GRAY,
            header: colors::CYAN,
            warning: colors::ORANGE,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            heading: "",
            muted: "",
            header: "",
            warning: "",
        }
    }

    /// Pick a palette from the `--no-color` flag and terminal capabilities.
    #[must_use]
    pub fn for_flags(no_color: bool) -> Self {
        if no_color || !supports_color() {
            Self::plain()
        } else {
            Self::colored()
        }
    }

    /// Wrap `text` in the heading style.
    pub fn heading(&self, text: &str) -> String {
        format!("{}{text}{}", self.heading, self.reset)
    }

    pub fn muted(&self, text: &str) -> String {
        format!("{}{text}{}", self.muted, self.reset)
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::for_flags(false)
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and the
/// `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    /// Environment variables are process-global, so tests touching them must not
    /// run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();
        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
        result
    }

    #[test]
    fn plain_palette_leaves_text_untouched() {
        let palette = ColorPalette::plain();
        assert_eq!(palette.heading("Rifter"), "Rifter");
        assert_eq!(palette.muted("—"), "—");
    }

    #[test]
    fn colored_palette_wraps_text() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.heading("Rifter"), "\x1b[1;97mRifter\x1b[0m");
    }

    #[test]
    fn no_color_flag_wins() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("xterm-256color"))], || {
            assert!(ColorPalette::for_flags(true).reset.is_empty());
            assert!(!ColorPalette::for_flags(false).reset.is_empty());
        });
    }

    #[test]
    fn no_color_env_disables_colors() {
        with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn dumb_terminal_disables_colors() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
            assert!(!supports_color());
        });
    }
}
