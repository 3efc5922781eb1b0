//! Output formatting
//!
//! [`OutputFormat`] is an immutable snapshot of every knob the renderer
//! reads. Descending into a nested block goes through
//! [`OutputFormat::next_level`], which returns a new value.

use rustc_hash::FxHashMap;

use crate::comment::Commentable;
use crate::error::{CssError, CssResult};
use crate::value::ListSeparator;

/// Anything that can be serialized back to CSS text
pub trait Render {
    fn render(&self, format: &OutputFormat) -> CssResult<String>;
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        (**self).render(format)
    }
}

/// Render configuration
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFormat {
    string_quote: char,
    rgb_hash_notation: bool,
    semicolon_after_last_rule: bool,

    space_after_rule_name: String,

    space_before_rules: String,
    space_after_rules: String,
    space_between_rules: String,

    space_before_blocks: String,
    space_after_blocks: String,
    space_between_blocks: String,

    content_before_at_rule_block: String,
    content_after_at_rule_block: String,

    space_before_selector_separator: String,
    space_after_selector_separator: String,

    space_before_list_argument_separator: String,
    space_before_list_argument_separators: FxHashMap<ListSeparator, String>,
    space_after_list_argument_separator: String,
    space_after_list_argument_separators: FxHashMap<ListSeparator, String>,

    space_before_opening_brace: String,

    content_before_declaration_block: String,
    content_after_declaration_block_selectors: String,
    content_after_declaration_block: String,

    indentation: String,
    ignore_exceptions: bool,
    render_comments: bool,
    indentation_level: usize,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            string_quote: '"',
            rgb_hash_notation: true,
            semicolon_after_last_rule: true,
            space_after_rule_name: " ".to_string(),
            space_before_rules: String::new(),
            space_after_rules: String::new(),
            space_between_rules: String::new(),
            space_before_blocks: String::new(),
            space_after_blocks: String::new(),
            space_between_blocks: "\n".to_string(),
            content_before_at_rule_block: String::new(),
            content_after_at_rule_block: String::new(),
            space_before_selector_separator: String::new(),
            space_after_selector_separator: " ".to_string(),
            space_before_list_argument_separator: String::new(),
            space_before_list_argument_separators: FxHashMap::default(),
            space_after_list_argument_separator: String::new(),
            space_after_list_argument_separators: FxHashMap::default(),
            space_before_opening_brace: " ".to_string(),
            content_before_declaration_block: String::new(),
            content_after_declaration_block_selectors: String::new(),
            content_after_declaration_block: String::new(),
            indentation: "\t".to_string(),
            ignore_exceptions: false,
            render_comments: false,
            indentation_level: 0,
        }
    }
}

macro_rules! string_options {
    ($($field:ident => $setter:ident),* $(,)?) => {
        $(
            pub fn $setter(mut self, value: impl Into<String>) -> Self {
                self.$field = value.into();
                self
            }
        )*
    };
}

impl OutputFormat {
    /// The plain preset: one block per line, no indentation inside blocks
    pub fn plain() -> Self {
        Self::default()
    }

    /// No optional whitespace, no comments, no trailing semicolon
    pub fn compact() -> Self {
        Self::default()
            .with_space_before_rules("")
            .with_space_between_rules("")
            .with_space_after_rules("")
            .with_space_before_blocks("")
            .with_space_between_blocks("")
            .with_space_after_blocks("")
            .with_space_after_rule_name("")
            .with_space_before_opening_brace("")
            .with_space_after_selector_separator("")
            .with_semicolon_after_last_rule(false)
            .with_render_comments(false)
    }

    /// Newline separated, tab indented, comments kept
    pub fn pretty() -> Self {
        Self::default()
            .with_space_before_rules("\n")
            .with_space_between_rules("\n")
            .with_space_after_rules("\n")
            .with_space_before_blocks("\n")
            .with_space_between_blocks("\n\n")
            .with_space_after_blocks("\n")
            .with_space_after_list_argument_separator_for(ListSeparator::Comma, " ")
            .with_render_comments(true)
    }

    string_options! {
        space_after_rule_name => with_space_after_rule_name,
        space_before_rules => with_space_before_rules,
        space_after_rules => with_space_after_rules,
        space_between_rules => with_space_between_rules,
        space_before_blocks => with_space_before_blocks,
        space_after_blocks => with_space_after_blocks,
        space_between_blocks => with_space_between_blocks,
        content_before_at_rule_block => with_content_before_at_rule_block,
        content_after_at_rule_block => with_content_after_at_rule_block,
        space_before_selector_separator => with_space_before_selector_separator,
        space_after_selector_separator => with_space_after_selector_separator,
        space_before_list_argument_separator => with_space_before_list_argument_separator,
        space_after_list_argument_separator => with_space_after_list_argument_separator,
        space_before_opening_brace => with_space_before_opening_brace,
        content_before_declaration_block => with_content_before_declaration_block,
        content_after_declaration_block_selectors => with_content_after_declaration_block_selectors,
        content_after_declaration_block => with_content_after_declaration_block,
        indentation => with_indentation,
    }

    /// Spacing before one particular list separator, overriding the default
    pub fn with_space_before_list_argument_separator_for(
        mut self,
        separator: ListSeparator,
        space: impl Into<String>,
    ) -> Self {
        self.space_before_list_argument_separators.insert(separator, space.into());
        self
    }

    /// Spacing after one particular list separator, overriding the default
    pub fn with_space_after_list_argument_separator_for(
        mut self,
        separator: ListSeparator,
        space: impl Into<String>,
    ) -> Self {
        self.space_after_list_argument_separators.insert(separator, space.into());
        self
    }

    pub fn with_string_quote(mut self, quote: char) -> Self {
        self.string_quote = quote;
        self
    }

    pub fn with_rgb_hash_notation(mut self, enabled: bool) -> Self {
        self.rgb_hash_notation = enabled;
        self
    }

    pub fn with_semicolon_after_last_rule(mut self, enabled: bool) -> Self {
        self.semicolon_after_last_rule = enabled;
        self
    }

    pub fn with_render_comments(mut self, enabled: bool) -> Self {
        self.render_comments = enabled;
        self
    }

    pub fn with_ignore_exceptions(mut self, enabled: bool) -> Self {
        self.ignore_exceptions = enabled;
        self
    }

    /// Swallow render errors, dropping the failing subtree
    pub fn be_lenient(self) -> Self {
        self.with_ignore_exceptions(true)
    }

    pub fn indent_with_spaces(self, count: usize) -> Self {
        self.with_indentation(" ".repeat(count))
    }

    /// A copy one nesting level deeper
    pub fn next_level(&self) -> Self {
        let mut next = self.clone();
        next.indentation_level += 1;
        next
    }

    pub fn indentation_level(&self) -> usize {
        self.indentation_level
    }

    pub fn string_quote(&self) -> char {
        self.string_quote
    }

    pub fn uses_rgb_hash_notation(&self) -> bool {
        self.rgb_hash_notation
    }

    pub fn renders_comments(&self) -> bool {
        self.render_comments
    }

    pub fn ignores_exceptions(&self) -> bool {
        self.ignore_exceptions
    }

    fn indent(&self) -> String {
        self.indentation.repeat(self.indentation_level)
    }

    /// Newlines in configured spacing continue at the current indentation
    fn prepare_space(&self, space: &str) -> String {
        space.replace('\n', &format!("\n{}", self.indent()))
    }

    pub(crate) fn space_after_rule_name(&self) -> String {
        self.prepare_space(&self.space_after_rule_name)
    }

    pub(crate) fn space_before_rules(&self) -> String {
        self.prepare_space(&self.space_before_rules)
    }

    pub(crate) fn space_after_rules(&self) -> String {
        self.prepare_space(&self.space_after_rules)
    }

    pub(crate) fn space_between_rules(&self) -> String {
        self.prepare_space(&self.space_between_rules)
    }

    pub(crate) fn space_before_blocks(&self) -> String {
        self.prepare_space(&self.space_before_blocks)
    }

    pub(crate) fn space_after_blocks(&self) -> String {
        self.prepare_space(&self.space_after_blocks)
    }

    pub(crate) fn space_between_blocks(&self) -> String {
        self.prepare_space(&self.space_between_blocks)
    }

    pub(crate) fn space_before_selector_separator(&self) -> String {
        self.prepare_space(&self.space_before_selector_separator)
    }

    pub(crate) fn space_after_selector_separator(&self) -> String {
        self.prepare_space(&self.space_after_selector_separator)
    }

    pub(crate) fn space_before_opening_brace(&self) -> String {
        self.prepare_space(&self.space_before_opening_brace)
    }

    pub(crate) fn space_before_list_argument_separator(&self, separator: ListSeparator) -> String {
        match self.space_before_list_argument_separators.get(&separator) {
            Some(space) => space.clone(),
            None => self.prepare_space(&self.space_before_list_argument_separator),
        }
    }

    pub(crate) fn space_after_list_argument_separator(&self, separator: ListSeparator) -> String {
        match self.space_after_list_argument_separators.get(&separator) {
            Some(space) => space.clone(),
            None => self.prepare_space(&self.space_after_list_argument_separator),
        }
    }

    pub(crate) fn content_before_at_rule_block(&self) -> &str {
        &self.content_before_at_rule_block
    }

    pub(crate) fn content_after_at_rule_block(&self) -> &str {
        &self.content_after_at_rule_block
    }

    pub(crate) fn content_before_declaration_block(&self) -> &str {
        &self.content_before_declaration_block
    }

    pub(crate) fn content_after_declaration_block_selectors(&self) -> &str {
        &self.content_after_declaration_block_selectors
    }

    pub(crate) fn content_after_declaration_block(&self) -> &str {
        &self.content_after_declaration_block
    }

    /// The separator rendered between list components
    pub(crate) fn list_separator(&self, separator: ListSeparator) -> String {
        format!(
            "{}{}{}",
            self.space_before_list_argument_separator(separator),
            separator.as_str(),
            self.space_after_list_argument_separator(separator)
        )
    }

    /// Render each item and join with `separator`
    pub(crate) fn implode<T: Render>(&self, separator: &str, items: &[T]) -> CssResult<String> {
        let mut result = String::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                result.push_str(separator);
            }
            result.push_str(&item.render(self)?);
        }
        Ok(result)
    }

    /// Leading comments of a node, or nothing when comments are off
    pub(crate) fn comments(&self, node: &impl Commentable) -> String {
        if !self.render_comments {
            return String::new();
        }
        let comments = node.comments();
        let mut result = String::new();
        for (i, comment) in comments.iter().enumerate() {
            result.push_str(&comment.to_css());
            if i + 1 == comments.len() {
                result.push_str(&self.space_after_blocks());
            } else {
                result.push_str(&self.space_between_blocks());
            }
        }
        result
    }

    /// Run a render step, turning render errors into `None` when they are
    /// to be ignored
    pub(crate) fn safely(
        &self,
        render: impl FnOnce() -> CssResult<String>,
    ) -> CssResult<Option<String>> {
        match render() {
            Ok(text) => Ok(Some(text)),
            Err(CssError::Render { message, .. }) if self.ignore_exceptions => {
                log::debug!("Skipping unrenderable node: {}", message);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the final `;` unless configured to keep it
    pub(crate) fn remove_last_semicolon(&self, text: String) -> String {
        if self.semicolon_after_last_rule {
            return text;
        }
        match text.rfind(';') {
            Some(index) => {
                let mut text = text;
                text.remove(index);
                text
            }
            None => text,
        }
    }
}
