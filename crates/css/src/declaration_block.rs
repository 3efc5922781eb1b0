//! Selector lists with their declarations

use crate::comment::{Comment, Commentable};
use crate::error::{CssError, CssResult, SourceLocation};
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};
use crate::rule_set::RuleSet;
use crate::selector::{split_selector_list, Selector};

/// A style rule: `h1, h2 { ... }`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationBlock {
    selectors: Vec<Selector>,
    rule_set: RuleSet,
}

impl DeclarationBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selectors(mut self, selectors: impl IntoIterator<Item = Selector>) -> Self {
        self.selectors = selectors.into_iter().collect();
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.rule_set.set_position(Some(position));
        self
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn selectors_mut(&mut self) -> &mut Vec<Selector> {
        &mut self.selectors
    }

    pub fn set_selectors(&mut self, selectors: Vec<Selector>) {
        self.selectors = selectors;
    }

    /// Replace the selectors with the comma separated list in `text`.
    ///
    /// Inside `@keyframes` the selectors are keyframe offsets.
    pub fn set_selectors_from_text(
        &mut self,
        text: &str,
        keyframe: bool,
        location: SourceLocation,
    ) -> CssResult<()> {
        let selectors = split_selector_list(text)
            .iter()
            .map(|part| {
                if keyframe {
                    Selector::parse_keyframe(part, location)
                } else {
                    Selector::parse(part, location)
                }
            })
            .collect::<CssResult<Vec<_>>>()?;
        self.selectors = selectors;
        Ok(())
    }

    /// Remove the selector with the given text, returning whether one was
    /// removed
    pub fn remove_selector(&mut self, selector: &str) -> bool {
        let selector = selector.trim();
        match self.selectors.iter().position(|s| s.selector() == selector) {
            Some(index) => {
                self.selectors.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn rule_set_mut(&mut self) -> &mut RuleSet {
        &mut self.rule_set
    }
}

impl Positioned for DeclarationBlock {
    fn position(&self) -> Option<Position> {
        self.rule_set.position()
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.rule_set.set_position(position);
    }
}

impl Commentable for DeclarationBlock {
    fn comments(&self) -> &[Comment] {
        self.rule_set.comments()
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        self.rule_set.comments_mut()
    }
}

impl Render for DeclarationBlock {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        if self.selectors.is_empty() {
            return Err(CssError::render(
                "declaration block without selectors",
                self.line(),
            ));
        }

        let separator = format!(
            "{},{}",
            format.space_before_selector_separator(),
            format.space_after_selector_separator()
        );
        let mut result = format.comments(self);
        result.push_str(format.content_before_declaration_block());
        result.push_str(&format.implode(&separator, &self.selectors)?);
        result.push_str(format.content_after_declaration_block_selectors());
        result.push_str(&format.space_before_opening_brace());
        result.push('{');
        result.push_str(&self.rule_set.render_declarations(format)?);
        result.push('}');
        result.push_str(format.content_after_declaration_block());
        Ok(result)
    }
}
