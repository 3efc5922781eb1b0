//! CSS selectors
//!
//! Selectors are kept as text. The parser only checks that a selector is made
//! of plausible characters, and specificity is derived from the text on
//! demand.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CssError, CssResult, SourceLocation};
use crate::format::{OutputFormat, Render};

/// Classes, attributes and pseudo-classes
const CLASS_PATTERN: &str = r"(?i)(\.[\w]+)|\[(\w+)|(:(link|visited|active|hover|focus|lang|target|enabled|disabled|checked|indeterminate|root|nth-child|nth-last-child|nth-of-type|nth-last-of-type|first-child|last-child|first-of-type|last-of-type|only-child|only-of-type|empty|contains))";

/// Element names and pseudo-elements
const ELEMENT_PATTERN: &str =
    r"(?i)((^|[\s+>~]+)\w+|:{1,2}(after|before|first-letter|first-line|selection))";

static CLASS_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static ELEMENT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn count_matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, text: &str) -> u32 {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .map_or(0, |re| re.find_iter(text).count() as u32)
}

/// A single selector such as `div.note > p`
#[derive(Debug, Clone)]
pub struct Selector {
    selector: String,
    specificity: OnceLock<u32>,
}

impl Selector {
    /// Create a selector from text without validating it
    pub fn new(selector: impl AsRef<str>) -> Self {
        Self {
            selector: selector.as_ref().trim().to_string(),
            specificity: OnceLock::new(),
        }
    }

    /// Create a selector, rejecting characters no selector may contain
    pub fn parse(selector: &str, location: SourceLocation) -> CssResult<Self> {
        Self::parse_with(selector, false, location)
    }

    /// Create a keyframe selector (`from`, `to`, `50%`)
    pub fn parse_keyframe(selector: &str, location: SourceLocation) -> CssResult<Self> {
        Self::parse_with(selector, true, location)
    }

    fn parse_with(selector: &str, keyframe: bool, location: SourceLocation) -> CssResult<Self> {
        if !is_valid(selector, keyframe) {
            return Err(CssError::unexpected_token(
                "a valid selector",
                selector.trim(),
                location,
            ));
        }
        Ok(Self::new(selector))
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn set_selector(&mut self, selector: impl AsRef<str>) {
        self.selector = selector.as_ref().trim().to_string();
        self.specificity = OnceLock::new();
    }

    /// Specificity as one number: 100 per id, 10 per class, attribute or
    /// pseudo-class, 1 per element or pseudo-element
    pub fn specificity(&self) -> u32 {
        *self.specificity.get_or_init(|| {
            let ids = self.selector.matches('#').count() as u32;
            let classes = count_matches(&CLASS_REGEX, CLASS_PATTERN, &self.selector);
            let elements = count_matches(&ELEMENT_REGEX, ELEMENT_PATTERN, &self.selector);
            ids * 100 + classes * 10 + elements
        })
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector
    }
}

impl Eq for Selector {}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)
    }
}

impl Render for Selector {
    fn render(&self, _format: &OutputFormat) -> CssResult<String> {
        Ok(self.selector.clone())
    }
}

impl From<&str> for Selector {
    fn from(selector: &str) -> Self {
        Self::new(selector)
    }
}

fn is_selector_char(c: char, keyframe: bool) -> bool {
    c.is_ascii_alphanumeric()
        || ('\u{00A0}'..='\u{FFFF}').contains(&c)
        || c.is_whitespace()
        || "_^$|*=~[]()-.:#+>".contains(c)
        || (keyframe && c == '%')
}

/// Check a selector for characters that cannot appear in one.
///
/// Escaped characters and quoted strings are accepted whatever they contain.
/// Commas are only allowed inside parentheses, as in `:not(a, b)`.
pub fn is_valid(selector: &str, keyframe: bool) -> bool {
    if selector.trim().is_empty() {
        return false;
    }

    let mut chars = selector.chars();
    let mut depth = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return false;
                }
            }
            '"' | '\'' => {
                if !chars.by_ref().any(|next| next == c) {
                    return false;
                }
            }
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth > 0 => {}
            c if is_selector_char(c, keyframe) => {}
            _ => return false,
        }
    }
    true
}

/// Split selector list text on commas outside quotes and brackets
pub fn split_selector_list(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                continue;
            }
            '"' | '\'' if quote.is_none() => quote = Some(c),
            c if Some(c) == quote => quote = None,
            '(' | '[' if quote.is_none() => depth += 1,
            ')' | ']' if quote.is_none() => depth = depth.saturating_sub(1),
            ',' if quote.is_none() && depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    parts.push(current);
    parts
}

/// Comparison used by [`SpecificityFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
}

/// A specificity condition such as `>= 100`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecificityFilter {
    pub comparison: Comparison,
    pub specificity: u32,
}

impl SpecificityFilter {
    pub fn new(comparison: Comparison, specificity: u32) -> Self {
        Self { comparison, specificity }
    }

    pub fn matches(&self, specificity: u32) -> bool {
        match self.comparison {
            Comparison::Less => specificity < self.specificity,
            Comparison::LessOrEqual => specificity <= self.specificity,
            Comparison::Equal => specificity == self.specificity,
            Comparison::GreaterOrEqual => specificity >= self.specificity,
            Comparison::Greater => specificity > self.specificity,
        }
    }
}

impl FromStr for SpecificityFilter {
    type Err = CssError;

    /// Parse `<op> <number>`; without an operator, equality is meant
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let operators = [
            ("<=", Comparison::LessOrEqual),
            (">=", Comparison::GreaterOrEqual),
            ("==", Comparison::Equal),
            ("<", Comparison::Less),
            (">", Comparison::Greater),
            ("=", Comparison::Equal),
        ];
        let (comparison, rest) = operators
            .iter()
            .find_map(|(op, comparison)| s.strip_prefix(op).map(|rest| (*comparison, rest)))
            .unwrap_or((Comparison::Equal, s));

        let rest = rest.trim();
        let specificity = rest.parse().map_err(|_| {
            CssError::unexpected_token("a specificity number", rest, SourceLocation::default())
        })?;
        Ok(Self::new(comparison, specificity))
    }
}
