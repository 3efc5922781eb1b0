//! Parser settings

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Recover from malformed input instead of failing the whole parse
    pub lenient_parsing: bool,
    /// Measure columns in characters rather than UTF-8 bytes
    pub multibyte_support: bool,
    /// Charset assumed until an `@charset` rule says otherwise
    pub default_charset: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lenient_parsing: true,
            multibyte_support: true,
            default_charset: "utf-8".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lenient_parsing(mut self, lenient: bool) -> Self {
        self.lenient_parsing = lenient;
        self
    }

    /// Shorthand for `with_lenient_parsing(false)`
    pub fn be_strict(self) -> Self {
        self.with_lenient_parsing(false)
    }

    pub fn with_multibyte_support(mut self, multibyte: bool) -> Self {
        self.multibyte_support = multibyte;
        self
    }

    pub fn with_default_charset(mut self, charset: impl Into<String>) -> Self {
        self.default_charset = charset.into();
        self
    }
}
