//! Statement lists and the document root
//!
//! A [`CssList`] is an ordered list of statements. The document is the root
//! list; `@media`-style at-rules and `@keyframes` nest further lists.

use crate::at_rule::{AtRuleBlockList, AtRuleSet, Charset, Import, KeyFrame, Namespace};
use crate::comment::{Comment, Commentable};
use crate::declaration_block::DeclarationBlock;
use crate::error::{CssResult, SourceLocation};
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};
use crate::rule_set::{matches_pattern, RuleSet};
use crate::selector::{split_selector_list, Selector, SpecificityFilter};
use crate::value::Value;

/// One entry of a statement list
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    DeclarationBlock(DeclarationBlock),
    AtRuleSet(AtRuleSet),
    AtRuleBlockList(AtRuleBlockList),
    KeyFrame(KeyFrame),
    Import(Import),
    Charset(Charset),
    Namespace(Namespace),
}

impl Statement {
    /// The at-rule name, without `@`, or `None` for a style rule
    pub fn at_rule_name(&self) -> Option<&str> {
        match self {
            Self::DeclarationBlock(_) => None,
            Self::AtRuleSet(rule) => Some(rule.name()),
            Self::AtRuleBlockList(list) => Some(list.name()),
            Self::KeyFrame(frames) => Some(frames.vendor_keyframes()),
            Self::Import(_) => Some("import"),
            Self::Charset(_) => Some("charset"),
            Self::Namespace(_) => Some("namespace"),
        }
    }

    pub fn as_declaration_block(&self) -> Option<&DeclarationBlock> {
        match self {
            Self::DeclarationBlock(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_declaration_block_mut(&mut self) -> Option<&mut DeclarationBlock> {
        match self {
            Self::DeclarationBlock(block) => Some(block),
            _ => None,
        }
    }

    /// Attach comments that preceded this statement in the source. They go
    /// before any comments the statement already holds.
    pub fn add_comments(&mut self, comments: Vec<Comment>) {
        match self {
            Self::DeclarationBlock(v) => prepend_comments(v, comments),
            Self::AtRuleSet(v) => prepend_comments(v, comments),
            Self::AtRuleBlockList(v) => prepend_comments(v, comments),
            Self::KeyFrame(v) => prepend_comments(v, comments),
            Self::Import(v) => prepend_comments(v, comments),
            Self::Charset(v) => prepend_comments(v, comments),
            Self::Namespace(v) => prepend_comments(v, comments),
        }
    }

    pub fn comments(&self) -> &[Comment] {
        match self {
            Self::DeclarationBlock(v) => v.comments(),
            Self::AtRuleSet(v) => v.comments(),
            Self::AtRuleBlockList(v) => v.comments(),
            Self::KeyFrame(v) => v.comments(),
            Self::Import(v) => v.comments(),
            Self::Charset(v) => v.comments(),
            Self::Namespace(v) => v.comments(),
        }
    }
}

impl Positioned for Statement {
    fn position(&self) -> Option<Position> {
        match self {
            Self::DeclarationBlock(v) => v.position(),
            Self::AtRuleSet(v) => v.position(),
            Self::AtRuleBlockList(v) => v.position(),
            Self::KeyFrame(v) => v.position(),
            Self::Import(v) => v.position(),
            Self::Charset(v) => v.position(),
            Self::Namespace(v) => v.position(),
        }
    }

    fn set_position(&mut self, position: Option<Position>) {
        match self {
            Self::DeclarationBlock(v) => v.set_position(position),
            Self::AtRuleSet(v) => v.set_position(position),
            Self::AtRuleBlockList(v) => v.set_position(position),
            Self::KeyFrame(v) => v.set_position(position),
            Self::Import(v) => v.set_position(position),
            Self::Charset(v) => v.set_position(position),
            Self::Namespace(v) => v.set_position(position),
        }
    }
}

impl Render for Statement {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        match self {
            Self::DeclarationBlock(v) => v.render(format),
            Self::AtRuleSet(v) => v.render(format),
            Self::AtRuleBlockList(v) => v.render(format),
            Self::KeyFrame(v) => v.render(format),
            Self::Import(v) => v.render(format),
            Self::Charset(v) => v.render(format),
            Self::Namespace(v) => v.render(format),
        }
    }
}

macro_rules! statement_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Statement {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

statement_from!(DeclarationBlock, AtRuleSet, AtRuleBlockList, KeyFrame, Import, Charset, Namespace);

fn prepend_comments(node: &mut impl Commentable, comments: Vec<Comment>) {
    node.comments_mut().splice(0..0, comments);
}

/// An ordered list of statements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssList {
    contents: Vec<Statement>,
    position: Option<Position>,
    comments: Vec<Comment>,
    // After the last statement, before the closing brace or end of input
    trailing_comments: Vec<Comment>,
}

impl CssList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn contents(&self) -> &[Statement] {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> &mut Vec<Statement> {
        &mut self.contents
    }

    pub fn set_contents(&mut self, contents: Vec<Statement>) {
        self.contents = contents;
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn trailing_comments(&self) -> &[Comment] {
        &self.trailing_comments
    }

    pub fn add_trailing_comments(&mut self, comments: impl IntoIterator<Item = Comment>) {
        self.trailing_comments.extend(comments);
    }

    pub fn append(&mut self, item: impl Into<Statement>) {
        self.contents.push(item.into());
    }

    pub fn prepend(&mut self, item: impl Into<Statement>) {
        self.contents.insert(0, item.into());
    }

    /// Insert `item` before the statement at `sibling`, or append it when
    /// there is no such statement
    pub fn insert_before(&mut self, item: impl Into<Statement>, sibling: usize) {
        if sibling < self.contents.len() {
            self.contents.insert(sibling, item.into());
        } else {
            log::debug!("Sibling {} not in list, appending instead", sibling);
            self.contents.push(item.into());
        }
    }

    /// Replace the statement at `index` with `replacements`, returning the
    /// removed statement
    pub fn replace(&mut self, index: usize, replacements: Vec<Statement>) -> Option<Statement> {
        if index >= self.contents.len() {
            return None;
        }
        self.contents.splice(index..=index, replacements).next()
    }

    pub fn remove(&mut self, index: usize) -> Option<Statement> {
        (index < self.contents.len()).then(|| self.contents.remove(index))
    }

    /// Remove the first statement equal to `item`
    pub fn remove_item(&mut self, item: &Statement) -> bool {
        match self.contents.iter().position(|s| s == item) {
            Some(index) => {
                self.contents.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove `length` statements from `offset` (all remaining when `None`)
    /// and put `replacement` in their place
    pub fn splice(
        &mut self,
        offset: usize,
        length: Option<usize>,
        replacement: Vec<Statement>,
    ) -> Vec<Statement> {
        let start = offset.min(self.contents.len());
        let end = match length {
            Some(length) => start.saturating_add(length).min(self.contents.len()),
            None => self.contents.len(),
        };
        self.contents.splice(start..end, replacement).collect()
    }

    /// Remove declaration blocks whose selector list equals `selectors`.
    ///
    /// Only the first match goes unless `remove_all` is set. Returns the
    /// number of blocks removed.
    pub fn remove_declaration_block_by_selector(&mut self, selectors: &[Selector], remove_all: bool) -> usize {
        let mut removed = 0;
        self.contents.retain(|statement| {
            if removed > 0 && !remove_all {
                return true;
            }
            match statement {
                Statement::DeclarationBlock(block) if block.selectors() == selectors => {
                    removed += 1;
                    false
                }
                _ => true,
            }
        });
        removed
    }

    /// Like [`CssList::remove_declaration_block_by_selector`], with the
    /// selectors given as comma separated text
    pub fn remove_declaration_block_by_selector_text(&mut self, text: &str, remove_all: bool) -> CssResult<usize> {
        let selectors = split_selector_list(text)
            .iter()
            .map(|part| Selector::parse(part, SourceLocation::default()))
            .collect::<CssResult<Vec<_>>>()?;
        Ok(self.remove_declaration_block_by_selector(&selectors, remove_all))
    }

    /// Every declaration block, descending into nested block lists but not
    /// into `@keyframes`
    pub fn all_declaration_blocks(&self) -> Vec<&DeclarationBlock> {
        let mut result = Vec::new();
        self.collect_declaration_blocks(&mut result);
        result
    }

    fn collect_declaration_blocks<'a>(&'a self, out: &mut Vec<&'a DeclarationBlock>) {
        for statement in &self.contents {
            match statement {
                Statement::DeclarationBlock(block) => out.push(block),
                Statement::AtRuleBlockList(list) => list.list().collect_declaration_blocks(out),
                _ => {}
            }
        }
    }

    pub fn all_declaration_blocks_mut(&mut self) -> Vec<&mut DeclarationBlock> {
        let mut result = Vec::new();
        self.collect_declaration_blocks_mut(&mut result);
        result
    }

    fn collect_declaration_blocks_mut<'a>(&'a mut self, out: &mut Vec<&'a mut DeclarationBlock>) {
        for statement in &mut self.contents {
            match statement {
                Statement::DeclarationBlock(block) => out.push(block),
                Statement::AtRuleBlockList(list) => list.list_mut().collect_declaration_blocks_mut(out),
                _ => {}
            }
        }
    }

    /// Every rule set: declaration blocks and declaration at-rules such as
    /// `@font-face`
    pub fn all_rule_sets(&self) -> Vec<&RuleSet> {
        let mut result = Vec::new();
        self.collect_rule_sets(&mut result);
        result
    }

    fn collect_rule_sets<'a>(&'a self, out: &mut Vec<&'a RuleSet>) {
        for statement in &self.contents {
            match statement {
                Statement::DeclarationBlock(block) => out.push(block.rule_set()),
                Statement::AtRuleSet(rule) => out.push(rule.rule_set()),
                Statement::AtRuleBlockList(list) => list.list().collect_rule_sets(out),
                _ => {}
            }
        }
    }

    pub fn all_rule_sets_mut(&mut self) -> Vec<&mut RuleSet> {
        let mut result = Vec::new();
        self.collect_rule_sets_mut(&mut result);
        result
    }

    fn collect_rule_sets_mut<'a>(&'a mut self, out: &mut Vec<&'a mut RuleSet>) {
        for statement in &mut self.contents {
            match statement {
                Statement::DeclarationBlock(block) => out.push(block.rule_set_mut()),
                Statement::AtRuleSet(rule) => out.push(rule.rule_set_mut()),
                Statement::AtRuleBlockList(list) => list.list_mut().collect_rule_sets_mut(out),
                _ => {}
            }
        }
    }

    /// Leaf values of every declaration whose name matches `pattern`.
    ///
    /// Function arguments are only searched when asked to; otherwise a
    /// function counts as one value.
    pub fn all_values(&self, pattern: Option<&str>, search_in_function_arguments: bool) -> Vec<&Value> {
        let mut result = Vec::new();
        for rule_set in self.all_rule_sets() {
            for (name, value) in rule_set.values() {
                if pattern.map_or(true, |pattern| matches_pattern(name, pattern)) {
                    value.collect_values(search_in_function_arguments, &mut result);
                }
            }
        }
        result
    }

    /// Selectors of all declaration blocks, optionally filtered by
    /// specificity
    pub fn selectors_by_specificity(&self, filter: Option<&SpecificityFilter>) -> Vec<&Selector> {
        self.all_declaration_blocks()
            .into_iter()
            .flat_map(|block| block.selectors())
            .filter(|selector| filter.map_or(true, |f| f.matches(selector.specificity())))
            .collect()
    }

    /// Render the statements. Nested lists indent one level deeper than
    /// the root.
    pub(crate) fn render_contents(&self, format: &OutputFormat, is_root: bool) -> CssResult<String> {
        let next_level = if is_root { format.clone() } else { format.next_level() };
        let mut result = String::new();
        let mut is_first = true;

        for statement in &self.contents {
            let Some(rendered) = format.safely(|| statement.render(&next_level))? else {
                continue;
            };
            if is_first {
                is_first = false;
                result.push_str(&next_level.space_before_blocks());
            } else {
                result.push_str(&next_level.space_between_blocks());
            }
            result.push_str(&rendered);
        }

        if format.renders_comments() && !self.trailing_comments.is_empty() {
            if is_first {
                is_first = false;
                result.push_str(&next_level.space_before_blocks());
            } else {
                result.push_str(&next_level.space_between_blocks());
            }
            let comments: Vec<String> = self.trailing_comments.iter().map(Comment::to_css).collect();
            result.push_str(&comments.join(&next_level.space_between_blocks()));
        }

        if !is_first && !is_root {
            result.push_str(&format.space_after_blocks());
        }
        Ok(result)
    }
}

impl Positioned for CssList {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Commentable for CssList {
    fn comments(&self) -> &[Comment] {
        &self.comments
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }
}

/// A parsed stylesheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    list: CssList,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_list(list: CssList) -> Self {
        Self { list }
    }

    pub fn list(&self) -> &CssList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut CssList {
        &mut self.list
    }

    pub fn contents(&self) -> &[Statement] {
        self.list.contents()
    }

    pub fn append(&mut self, item: impl Into<Statement>) {
        self.list.append(item);
    }

    pub fn all_declaration_blocks(&self) -> Vec<&DeclarationBlock> {
        self.list.all_declaration_blocks()
    }

    pub fn all_declaration_blocks_mut(&mut self) -> Vec<&mut DeclarationBlock> {
        self.list.all_declaration_blocks_mut()
    }

    pub fn all_rule_sets(&self) -> Vec<&RuleSet> {
        self.list.all_rule_sets()
    }

    pub fn all_rule_sets_mut(&mut self) -> Vec<&mut RuleSet> {
        self.list.all_rule_sets_mut()
    }

    pub fn all_values(&self, pattern: Option<&str>, search_in_function_arguments: bool) -> Vec<&Value> {
        self.list.all_values(pattern, search_in_function_arguments)
    }

    pub fn selectors_by_specificity(&self, filter: Option<&SpecificityFilter>) -> Vec<&Selector> {
        self.list.selectors_by_specificity(filter)
    }

    /// Render with `format`, or with the default format when `None`
    pub fn render(&self, format: Option<&OutputFormat>) -> CssResult<String> {
        match format {
            Some(format) => Render::render(self, format),
            None => Render::render(self, &OutputFormat::default()),
        }
    }
}

impl Render for Document {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        let mut result = format.comments(&self.list);
        result.push_str(&self.list.render_contents(format, true)?);
        Ok(result)
    }
}

impl Commentable for Document {
    fn comments(&self) -> &[Comment] {
        self.list.comments()
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        self.list.comments_mut()
    }
}
