//! Pipeline configuration.

use super::constants::DEFAULT_TAB_WIDTH;

/// Settings consumed by the parsing pipeline.
///
/// The command line and project files that normally populate this live
/// outside the crate; this is the in-memory shape they produce.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Tab stop used when expanding tabs inside comments.
    pub tab_width: usize,
    /// Never insert auto-topics that have no matching comment.
    pub documented_only: bool,
    /// Keep one output line per input line when cleaning comments.
    pub preserve_line_numbers: bool,
    /// Parse batches of files on the rayon pool before committing them.
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            documented_only: false,
            preserve_line_numbers: true,
            parallel: true,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn with_documented_only(mut self, documented_only: bool) -> Self {
        self.documented_only = documented_only;
        self
    }

    pub fn with_preserve_line_numbers(mut self, preserve: bool) -> Self {
        self.preserve_line_numbers = preserve;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tab_width, 4);
        assert!(!settings.documented_only);
        assert!(settings.preserve_line_numbers);
    }

    #[test]
    fn test_tab_width_never_zero() {
        let settings = Settings::new().with_tab_width(0);
        assert_eq!(settings.tab_width, 1);
    }
}
