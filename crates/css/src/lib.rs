//! Quill CSS
//!
//! Parses stylesheets into an editable document tree and renders the tree
//! back to CSS under a configurable output format.
//!
//! ```
//! use quill_css::{parse, OutputFormat};
//!
//! let document = parse("p { color: rgb(255, 0, 0); }").unwrap();
//! assert_eq!(document.render(Some(&OutputFormat::compact())).unwrap(), "p{color:#f00}");
//! ```

pub mod at_rule;
pub mod comment;
pub mod cursor;
pub mod declaration_block;
pub mod document;
mod error;
pub mod format;
mod parser;
pub mod position;
pub mod rule_set;
pub mod selector;
mod settings;
pub mod value;

pub use at_rule::{AtRuleBlockList, AtRuleSet, Charset, Import, KeyFrame, Namespace};
pub use comment::{Comment, Commentable};
pub use declaration_block::DeclarationBlock;
pub use document::{CssList, Document, Statement};
pub use error::{CssError, CssResult, SourceLocation};
pub use format::{OutputFormat, Render};
pub use parser::CssParser;
pub use position::{Position, Positioned};
pub use rule_set::{Declaration, RuleSet};
pub use selector::{Selector, SpecificityFilter};
pub use settings::Settings;
pub use value::{ListSeparator, Value};

/// Parse a stylesheet with the default, lenient settings
pub fn parse(input: &str) -> CssResult<Document> {
    parse_with_settings(input, Settings::default())
}

/// Parse a stylesheet
pub fn parse_with_settings(input: &str, settings: Settings) -> CssResult<Document> {
    CssParser::new(input, settings).parse()
}

/// Render a document, with the default format when none is given
pub fn render(document: &Document, format: Option<&OutputFormat>) -> CssResult<String> {
    document.render(format)
}
