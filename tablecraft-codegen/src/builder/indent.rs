//! Indentation unit for emitted PHP.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// PSR-12: four spaces.
    pub const PHP: Self = Self("    ");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::PHP
    }
}
