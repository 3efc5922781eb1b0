//! At-rules
//!
//! `@import`, `@charset` and `@namespace` are single statements. Block
//! at-rules either hold declarations (`@font-face`, `@page`) or further
//! statements (`@media`, `@supports`, `@keyframes`).

use crate::comment::{Comment, Commentable};
use crate::document::CssList;
use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};
use crate::rule_set::RuleSet;
use crate::value::{CssString, Url, Value};

/// At-rules whose body is a list of statements
pub const BLOCK_RULES: &[&str] = &["media", "document", "supports", "region-style", "font-feature-values"];

/// `name` without a leading `-vendor-` prefix, as in `-moz-document`
pub fn strip_vendor_prefix(name: &str) -> &str {
    name.strip_prefix('-')
        .and_then(|rest| rest.split_once('-'))
        .filter(|(vendor, rest)| {
            !vendor.is_empty()
                && !rest.is_empty()
                && vendor.chars().all(|c| c.is_alphanumeric() || c == '_')
        })
        .map_or(name, |(_, rest)| rest)
}

/// Whether `@name { ... }` holds statements rather than declarations.
/// Vendor prefixes are ignored.
pub fn is_block_rule(name: &str) -> bool {
    BLOCK_RULES.contains(&strip_vendor_prefix(name))
}

macro_rules! positioned_and_commented {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Positioned for $ty {
                fn position(&self) -> Option<Position> {
                    self.position
                }

                fn set_position(&mut self, position: Option<Position>) {
                    self.position = position;
                }
            }

            impl Commentable for $ty {
                fn comments(&self) -> &[Comment] {
                    &self.comments
                }

                fn comments_mut(&mut self) -> &mut Vec<Comment> {
                    &mut self.comments
                }
            }
        )*
    };
}

positioned_and_commented!(Import, Charset, Namespace);

fn with_leading_space(arguments: &str) -> String {
    if arguments.is_empty() {
        String::new()
    } else {
        format!(" {}", arguments)
    }
}

/// `@import url(...) media;`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    location: Url,
    media_query: Option<String>,
    position: Option<Position>,
    comments: Vec<Comment>,
}

impl Import {
    pub fn new(location: Url, media_query: Option<String>) -> Self {
        Self {
            location,
            media_query,
            position: None,
            comments: Vec::new(),
        }
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn set_location(&mut self, location: Url) {
        self.location = location;
    }

    pub fn media_query(&self) -> Option<&str> {
        self.media_query.as_deref()
    }
}

impl Render for Import {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        let media = self
            .media_query
            .as_deref()
            .map(|media| format!(" {}", media))
            .unwrap_or_default();
        Ok(format!(
            "{}@import {}{};",
            format.comments(self),
            self.location.render(format)?,
            media
        ))
    }
}

/// `@charset "utf-8";`
#[derive(Debug, Clone, PartialEq)]
pub struct Charset {
    charset: CssString,
    position: Option<Position>,
    comments: Vec<Comment>,
}

impl Charset {
    pub fn new(charset: CssString) -> Self {
        Self {
            charset,
            position: None,
            comments: Vec::new(),
        }
    }

    pub fn charset(&self) -> &str {
        self.charset.text()
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) {
        self.charset.set_text(charset);
    }
}

impl Render for Charset {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        Ok(format!(
            "{}@charset {};",
            format.comments(self),
            self.charset.render(format)?
        ))
    }
}

/// `@namespace prefix url(...);`
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    prefix: Option<String>,
    /// A [`Value::String`] or [`Value::Url`]
    url: Value,
    position: Option<Position>,
    comments: Vec<Comment>,
}

impl Namespace {
    pub fn new(prefix: Option<String>, url: Value) -> Self {
        Self {
            prefix,
            url,
            position: None,
            comments: Vec::new(),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn url(&self) -> &Value {
        &self.url
    }
}

impl Render for Namespace {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        let prefix = self
            .prefix
            .as_deref()
            .map(|prefix| format!("{} ", prefix))
            .unwrap_or_default();
        Ok(format!(
            "{}@namespace {}{};",
            format.comments(self),
            prefix,
            self.url.render(format)?
        ))
    }
}

/// An at-rule holding declarations, such as `@font-face` or `@page :first`
#[derive(Debug, Clone, PartialEq)]
pub struct AtRuleSet {
    name: String,
    arguments: String,
    rule_set: RuleSet,
}

impl AtRuleSet {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
            rule_set: RuleSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn rule_set_mut(&mut self) -> &mut RuleSet {
        &mut self.rule_set
    }
}

impl Positioned for AtRuleSet {
    fn position(&self) -> Option<Position> {
        self.rule_set.position()
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.rule_set.set_position(position);
    }
}

impl Commentable for AtRuleSet {
    fn comments(&self) -> &[Comment] {
        self.rule_set.comments()
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        self.rule_set.comments_mut()
    }
}

impl Render for AtRuleSet {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        Ok(format!(
            "{}@{}{}{}{{{}}}",
            format.comments(self),
            self.name,
            with_leading_space(&self.arguments),
            format.space_before_opening_brace(),
            self.rule_set.render_declarations(format)?
        ))
    }
}

/// An at-rule holding statements, such as `@media screen { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct AtRuleBlockList {
    name: String,
    arguments: String,
    list: CssList,
}

impl AtRuleBlockList {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
            list: CssList::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    pub fn list(&self) -> &CssList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut CssList {
        &mut self.list
    }
}

impl Positioned for AtRuleBlockList {
    fn position(&self) -> Option<Position> {
        self.list.position()
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.list.set_position(position);
    }
}

impl Commentable for AtRuleBlockList {
    fn comments(&self) -> &[Comment] {
        self.list.comments()
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        self.list.comments_mut()
    }
}

impl Render for AtRuleBlockList {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        Ok(format!(
            "{}{}@{}{}{}{{{}}}{}",
            format.comments(self),
            format.content_before_at_rule_block(),
            self.name,
            with_leading_space(&self.arguments),
            format.space_before_opening_brace(),
            self.list.render_contents(format, false)?,
            format.content_after_at_rule_block()
        ))
    }
}

/// `@keyframes name { ... }`, possibly vendor prefixed
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFrame {
    vendor_keyframes: String,
    animation_name: String,
    list: CssList,
}

impl KeyFrame {
    pub fn new(vendor_keyframes: impl Into<String>, animation_name: impl Into<String>) -> Self {
        Self {
            vendor_keyframes: vendor_keyframes.into(),
            animation_name: animation_name.into(),
            list: CssList::new(),
        }
    }

    /// `keyframes` or a prefixed form such as `-webkit-keyframes`
    pub fn vendor_keyframes(&self) -> &str {
        &self.vendor_keyframes
    }

    pub fn animation_name(&self) -> &str {
        &self.animation_name
    }

    pub fn set_animation_name(&mut self, name: impl Into<String>) {
        self.animation_name = name.into();
    }

    pub fn list(&self) -> &CssList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut CssList {
        &mut self.list
    }
}

impl Positioned for KeyFrame {
    fn position(&self) -> Option<Position> {
        self.list.position()
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.list.set_position(position);
    }
}

impl Commentable for KeyFrame {
    fn comments(&self) -> &[Comment] {
        self.list.comments()
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        self.list.comments_mut()
    }
}

impl Render for KeyFrame {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        Ok(format!(
            "{}@{} {}{}{{{}}}",
            format.comments(self),
            self.vendor_keyframes,
            self.animation_name,
            format.space_before_opening_brace(),
            self.list.render_contents(format, false)?
        ))
    }
}
