//! CSS Parser
//!
//! Recursive-descent parser for stylesheets: at-rules, declaration blocks and
//! declarations. Values are handed to [`ValueParser`], selectors to
//! [`DeclarationBlock::set_selectors_from_text`].
//!
//! In lenient mode (the default) malformed input is skipped with a warning
//! and parsing resumes at the next sensible point. In strict mode the first
//! problem is returned as an error.

use log::{debug, trace, warn};

use crate::at_rule::{is_block_rule, strip_vendor_prefix, AtRuleBlockList, AtRuleSet, Charset, Import, KeyFrame, Namespace};
use crate::comment::{Comment, Commentable};
use crate::cursor::{Cursor, StopAt};
use crate::declaration_block::DeclarationBlock;
use crate::document::{CssList, Document, Statement};
use crate::error::{CssError, CssResult};
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};
use crate::rule_set::{Declaration, RuleSet};
use crate::settings::Settings;
use crate::value::{Value, ValueParser};

/// What kind of list is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    /// The document itself
    Root,
    /// The body of a block at-rule such as `@media`
    Block,
    /// The body of `@keyframes`, whose selectors are offsets
    KeyFrames,
}

/// Outcome of parsing one list item
enum ListItem {
    Statement(Statement),
    /// Something was consumed but nothing is kept
    Skipped,
    /// A `}` closing a nested list
    End,
}

/// Whether `name` is `keyframes`, optionally vendor prefixed
fn is_keyframes(name: &str) -> bool {
    strip_vendor_prefix(name) == "keyframes"
}

fn balanced_parentheses(text: &str) -> bool {
    text.matches('(').count() == text.matches(')').count()
}

/// CSS stylesheet parser
pub struct CssParser {
    cursor: Cursor,
}

impl CssParser {
    /// Create a new parser over already decoded text
    pub fn new(input: &str, settings: Settings) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            cursor: Cursor::new(input, settings, 1),
        }
    }

    /// Parse the whole input into a document
    pub fn parse(mut self) -> CssResult<Document> {
        let mut list = CssList::new().with_position(Position::new(1, 0));
        self.parse_list(&mut list, ListKind::Root)?;
        debug!("Parsed stylesheet with {} top-level statements", list.len());
        Ok(Document::from_list(list))
    }

    /// Charset declared by `@charset`, or the configured default
    pub fn charset(&self) -> &str {
        self.cursor.charset()
    }

    /// Parse statements until end of input, or until the `}` closing a
    /// nested list
    fn parse_list(&mut self, list: &mut CssList, kind: ListKind) -> CssResult<()> {
        let lenient = self.cursor.is_lenient();
        let mut comments = Vec::new();

        while !self.cursor.is_end() {
            comments.extend(self.cursor.consume_whitespace()?);
            if self.cursor.is_end() {
                break;
            }

            let start = self.cursor.location().offset;
            match self.parse_list_item(list, kind) {
                Ok(ListItem::Statement(mut statement)) => {
                    statement.add_comments(std::mem::take(&mut comments));
                    list.append(statement);
                }
                Ok(ListItem::Skipped) => comments.clear(),
                Ok(ListItem::End) => {
                    list.add_trailing_comments(comments);
                    return Ok(());
                }
                Err(e) if lenient && e.is_eof() => {
                    warn!("Stopping at end of input: {}", e);
                    self.cursor.jump_to_end();
                    break;
                }
                Err(e) if lenient && e.is_recoverable() => {
                    warn!("Skipping invalid statement: {}", e);
                    comments.clear();
                    if self.cursor.location().offset == start {
                        self.cursor.consume(1)?;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        list.add_trailing_comments(comments);
        if kind != ListKind::Root && !lenient {
            return Err(CssError::unexpected_eof(
                "`}` before end of document",
                self.cursor.location(),
            ));
        }
        Ok(())
    }

    fn parse_list_item(&mut self, list: &CssList, kind: ListKind) -> CssResult<ListItem> {
        if self.cursor.comes("@", false) {
            let location = self.cursor.location();
            let statement = self.parse_at_rule()?;
            if let Some(Statement::Charset(charset)) = &statement {
                if kind != ListKind::Root {
                    return Err(CssError::source_structure(
                        "@charset may only occur in the root document",
                        location,
                    ));
                }
                if !list.is_empty() {
                    return Err(CssError::source_structure(
                        "@charset must be the first statement in a document",
                        location,
                    ));
                }
                self.cursor.set_charset(charset.charset());
            }
            return Ok(statement.map_or(ListItem::Skipped, ListItem::Statement));
        }

        if self.cursor.comes("}", false) {
            if kind != ListKind::Root {
                return Ok(ListItem::End);
            }
            let location = self.cursor.location();
            if !self.cursor.is_lenient() {
                return Err(CssError::source_structure("Unopened {", location));
            }
            warn!("Skipping stray `}}` at {}", location);
            self.cursor.consume(1)?;
            return Ok(ListItem::Skipped);
        }

        let block = self.parse_declaration_block(kind == ListKind::KeyFrames)?;
        Ok(block.map_or(ListItem::Skipped, |block| ListItem::Statement(block.into())))
    }

    /// Parse an at-rule starting at `@`.
    ///
    /// Returns `None` when a malformed rule was skipped in lenient mode.
    fn parse_at_rule(&mut self) -> CssResult<Option<Statement>> {
        let position = self.cursor.current_position();
        self.cursor.consume_literal("@")?;
        let name = self.cursor.parse_identifier(true)?;
        self.cursor.consume_whitespace()?;
        trace!("Parsing @{} at {}", name, self.cursor.location());

        let statement: Statement = match name.as_str() {
            "import" => self.parse_import(position)?.into(),
            "charset" => self.parse_charset(position)?.into(),
            "namespace" => self.parse_namespace(position)?.into(),
            name if is_keyframes(name) => self.parse_keyframes(name, position)?.into(),
            _ => return self.parse_generic_at_rule(&name, position),
        };
        Ok(Some(statement))
    }

    /// Parse @import rule
    fn parse_import(&mut self, position: Position) -> CssResult<Import> {
        let location = ValueParser::parse_url(&mut self.cursor)?;
        self.cursor.consume_whitespace()?;
        let media = self
            .cursor
            .consume_until(&[';'], StopAt::Consume, true, &mut Vec::new())?;
        let media = media.trim();
        let media = (!media.is_empty()).then(|| media.to_string());

        let mut import = Import::new(location, media);
        import.set_position(Some(position));
        Ok(import)
    }

    /// Parse @charset rule
    fn parse_charset(&mut self, position: Position) -> CssResult<Charset> {
        let charset = ValueParser::parse_string(&mut self.cursor)?;
        self.cursor.consume_whitespace()?;
        self.cursor
            .consume_until(&[';'], StopAt::Consume, true, &mut Vec::new())?;

        let mut charset = Charset::new(charset);
        charset.set_position(Some(position));
        Ok(charset)
    }

    /// Parse @namespace rule
    fn parse_namespace(&mut self, position: Position) -> CssResult<Namespace> {
        let location = self.cursor.location();
        let mut prefix = None;
        let mut url = ValueParser::parse_primitive_value(&mut self.cursor)?;
        if !matches!(url, Value::String(_) | Value::Url(_)) {
            prefix = url.as_keyword().map(str::to_string);
            self.cursor.consume_whitespace()?;
            url = ValueParser::parse_primitive_value(&mut self.cursor)?;
        }
        if !matches!(url, Value::String(_) | Value::Url(_)) {
            return Err(CssError::unexpected_token(
                "a namespace url or string",
                url.render(&OutputFormat::compact()).unwrap_or_default(),
                location,
            ));
        }
        self.cursor.consume_whitespace()?;
        self.cursor
            .consume_until(&[';'], StopAt::Consume, true, &mut Vec::new())?;

        let mut namespace = Namespace::new(prefix, url);
        namespace.set_position(Some(position));
        Ok(namespace)
    }

    /// Parse @keyframes rule
    fn parse_keyframes(&mut self, name: &str, position: Position) -> CssResult<KeyFrame> {
        let animation_name = self
            .cursor
            .consume_until(&['{'], StopAt::Consume, false, &mut Vec::new())?;
        let mut frames = KeyFrame::new(name, animation_name.trim());
        frames.set_position(Some(position));

        self.parse_list(frames.list_mut(), ListKind::KeyFrames)?;
        if self.cursor.comes("}", false) {
            self.cursor.consume(1)?;
        }
        Ok(frames)
    }

    /// Parse any other at-rule. Its body holds statements if the name is a
    /// known block rule, declarations otherwise.
    fn parse_generic_at_rule(&mut self, name: &str, position: Position) -> CssResult<Option<Statement>> {
        let location = self.cursor.location();
        let arguments = self
            .cursor
            .consume_until(&['{', ';'], StopAt::Before, false, &mut Vec::new())?;
        let arguments = arguments.trim();

        if self.cursor.comes(";", false) {
            self.cursor.consume(1)?;
            return Err(CssError::source_structure(
                format!("@{} has no block", name),
                location,
            ));
        }
        self.cursor.consume_literal("{")?;

        if !balanced_parentheses(arguments) {
            if !self.cursor.is_lenient() {
                return Err(CssError::source_structure(
                    format!("Unmatched parentheses in @{} arguments", name),
                    location,
                ));
            }
            warn!("Skipping @{} with unmatched parentheses at {}", name, location);
            self.skip_block();
            return Ok(None);
        }

        if is_block_rule(name) {
            let mut block = AtRuleBlockList::new(name, arguments);
            block.set_position(Some(position));
            self.parse_list(block.list_mut(), ListKind::Block)?;
            if self.cursor.comes("}", false) {
                self.cursor.consume(1)?;
            }
            Ok(Some(block.into()))
        } else {
            let mut rule = AtRuleSet::new(name, arguments);
            rule.set_position(Some(position));
            self.parse_rule_set(rule.rule_set_mut())?;
            Ok(Some(rule.into()))
        }
    }

    /// Skip the rest of a block whose `{` was already consumed
    fn skip_block(&mut self) {
        let mut depth = 1usize;
        while let Some(c) = self.cursor.peek_char() {
            if self.cursor.consume(1).is_err() {
                break;
            }
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    /// Parse a selector list and its declarations
    fn parse_declaration_block(&mut self, keyframe: bool) -> CssResult<Option<DeclarationBlock>> {
        let position = self.cursor.current_position();
        let location = self.cursor.location();
        let lenient = self.cursor.is_lenient();
        let mut comments = Vec::new();

        let selectors = self
            .consume_selector_text(&mut comments)
            .and_then(|text| {
                let mut block = DeclarationBlock::new().with_position(position);
                block.set_selectors_from_text(&text, keyframe, location)?;
                Ok(block)
            });
        let mut block = match selectors {
            Ok(block) => block,
            Err(e) if lenient && e.is_recoverable() => {
                warn!("Skipping declaration block: {}", e);
                self.cursor
                    .consume_until(&['}'], StopAt::Consume, true, &mut Vec::new())?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.cursor.consume_literal("{")?;
        block.add_comments(comments);
        self.parse_rule_set(block.rule_set_mut())?;
        Ok(Some(block))
    }

    /// Read raw selector text up to the `{` opening the block.
    ///
    /// Quoted strings and escapes are copied as they are. Comments are
    /// collected and left out of the text.
    fn consume_selector_text(&mut self, comments: &mut Vec<Comment>) -> CssResult<String> {
        let mut text = String::new();
        let mut quote: Option<char> = None;
        let mut depth = 0usize;

        loop {
            if quote.is_none() {
                if let Some(comment) = self.cursor.consume_comment()? {
                    comments.push(comment);
                    continue;
                }
            }

            let location = self.cursor.location();
            let Some(c) = self.cursor.peek_char() else {
                return Err(CssError::unexpected_eof("`{` after selectors", location));
            };

            match c {
                '{' if quote.is_none() => {
                    if depth > 0 {
                        return Err(CssError::unexpected_token("`)`", "{", location));
                    }
                    return Ok(text);
                }
                '}' if quote.is_none() => {
                    return Err(CssError::unexpected_token("`{` after selectors", "}", location));
                }
                '\\' => {
                    text.push_str(&self.cursor.consume(2)?);
                    continue;
                }
                '"' | '\'' => match quote {
                    None => quote = Some(c),
                    Some(open) if open == c => quote = None,
                    Some(_) => {}
                },
                '(' if quote.is_none() => depth += 1,
                ')' if quote.is_none() => {
                    if depth == 0 {
                        return Err(CssError::unexpected_token("a selector", ")", location));
                    }
                    depth -= 1;
                }
                _ => {}
            }

            text.push(c);
            self.cursor.consume(1)?;
        }
    }

    /// Parse declarations up to and including the closing `}`
    fn parse_rule_set(&mut self, rule_set: &mut RuleSet) -> CssResult<()> {
        let lenient = self.cursor.is_lenient();
        while self.cursor.comes(";", false) {
            self.cursor.consume(1)?;
        }

        loop {
            let comments = self.cursor.consume_whitespace()?;
            if self.cursor.comes("}", false) {
                break;
            }

            match self.parse_declaration(comments) {
                Ok(declaration) => {
                    rule_set.add_declaration(declaration, None);
                }
                Err(e) if lenient => {
                    warn!("Skipping invalid declaration: {}", e);
                    let skipped =
                        self.cursor
                            .consume_until(&['\n', ';', '}'], StopAt::Before, false, &mut Vec::new());
                    if skipped.is_err() {
                        // The rule set runs to the end of input
                        self.cursor.jump_to_end();
                        return Ok(());
                    }
                    if !self.cursor.comes("}", false) {
                        self.cursor.consume(1)?;
                        while self.cursor.comes(";", false) {
                            self.cursor.consume(1)?;
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }

        self.cursor.consume_literal("}")?;
        Ok(())
    }

    /// Parse `name: value [!important];`
    fn parse_declaration(&mut self, comments: Vec<Comment>) -> CssResult<Declaration> {
        let position = self.cursor.current_position();
        let custom_property = self.cursor.comes("--", false);
        let name = self.cursor.parse_identifier(!custom_property)?;

        let mut declaration = Declaration::new(name).with_position(position);
        declaration.add_comments(comments);
        declaration.add_comments(self.cursor.consume_whitespace()?);
        self.cursor.consume_literal(":")?;

        let delimiters = ValueParser::list_delimiters_for_property(declaration.name());
        let value = ValueParser::parse_value(&mut self.cursor, delimiters)?;
        declaration.set_value(value);
        declaration.add_comments(self.cursor.consume_whitespace()?);

        if self.cursor.is_lenient() {
            while self.cursor.comes("\\", false) {
                self.cursor.consume(1)?;
                declaration.add_ie_hack(self.cursor.consume(1)?);
                self.cursor.consume_whitespace()?;
            }
        }

        if self.cursor.comes("!", false) {
            self.cursor.consume(1)?;
            self.cursor.consume_whitespace()?;
            if !self.cursor.comes("important", true) {
                return Err(CssError::unexpected_token(
                    "`important`",
                    self.cursor.peek(9, 0),
                    self.cursor.location(),
                ));
            }
            self.cursor.consume(9)?;
            declaration.set_important(true);
        }

        self.cursor.consume_whitespace()?;
        while self.cursor.comes(";", false) {
            self.cursor.consume(1)?;
        }

        trace!("Parsed declaration {} at {}:{}", declaration.name(), position.line, position.column);
        Ok(declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(css: &str) -> Document {
        CssParser::new(css, Settings::default()).parse().unwrap()
    }

    fn parse_strict(css: &str) -> CssResult<Document> {
        CssParser::new(css, Settings::default().be_strict()).parse()
    }

    fn first_block(document: &Document) -> &DeclarationBlock {
        document.contents()[0].as_declaration_block().unwrap()
    }

    #[test]
    fn test_simple_rule() {
        let document = parse("p { color: red; }");
        assert_eq!(document.contents().len(), 1);
        let block = first_block(&document);
        assert_eq!(block.selectors()[0].selector(), "p");
        let declarations = block.rule_set().declarations(None);
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name(), "color");
    }

    #[test]
    fn test_multiple_declarations() {
        let document = parse("p { color: red; font-size: 16px }");
        let declarations = first_block(&document).rule_set().declarations(None);
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].name(), "color");
        assert_eq!(declarations[1].name(), "font-size");
    }

    #[test]
    fn test_property_names_lowercased_except_custom() {
        let document = parse("p { COLOR: red; --Main-Color: blue }");
        let rule_set = first_block(&document).rule_set();
        assert!(rule_set.applied_declaration("color").is_some());
        assert!(rule_set.applied_declaration("--Main-Color").is_some());
    }

    #[test]
    fn test_important() {
        let document = parse("p { color: red ! IMPORTANT; margin: 0 }");
        let rule_set = first_block(&document).rule_set();
        assert!(rule_set.applied_declaration("color").unwrap().is_important());
        assert!(!rule_set.applied_declaration("margin").unwrap().is_important());
    }

    #[test]
    fn test_declaration_positions() {
        let document = parse("p {\n  color: red;\n  margin: 0; padding: 0;\n}");
        let positions: Vec<_> = first_block(&document)
            .rule_set()
            .declarations(None)
            .iter()
            .map(|d| d.position().unwrap())
            .collect();
        assert_eq!(
            positions,
            vec![Position::new(2, 2), Position::new(3, 2), Position::new(3, 13)]
        );
    }

    #[test]
    fn test_comments_attached() {
        let document = parse("/* header */ p { /* c */ color: red; }");
        let block = first_block(&document);
        assert_eq!(block.comments()[0].text(), " header ");
        let color = block.rule_set().applied_declaration("color").unwrap();
        assert_eq!(color.comments()[0].text(), " c ");
    }

    #[test]
    fn test_media_block() {
        let document = parse("@media screen and (min-width: 10px) { p { color: red } a { color: blue } }");
        let Statement::AtRuleBlockList(media) = &document.contents()[0] else {
            panic!("Expected block list");
        };
        assert_eq!(media.name(), "media");
        assert_eq!(media.arguments(), "screen and (min-width: 10px)");
        assert_eq!(media.list().len(), 2);
    }

    #[test]
    fn test_font_face_is_rule_set() {
        let document = parse("@font-face { font-family: x; src: url(a.woff) }");
        let Statement::AtRuleSet(face) = &document.contents()[0] else {
            panic!("Expected at-rule set");
        };
        assert_eq!(face.name(), "font-face");
        assert_eq!(face.rule_set().len(), 2);
    }

    #[test]
    fn test_keyframes() {
        let document = parse("@-webkit-keyframes spin { from { opacity: 0 } 50% { opacity: .5 } to { opacity: 1 } }");
        let Statement::KeyFrame(frames) = &document.contents()[0] else {
            panic!("Expected keyframes");
        };
        assert_eq!(frames.vendor_keyframes(), "-webkit-keyframes");
        assert_eq!(frames.animation_name(), "spin");
        assert_eq!(frames.list().len(), 3);
    }

    #[test]
    fn test_is_keyframes() {
        assert!(is_keyframes("keyframes"));
        assert!(is_keyframes("-moz-keyframes"));
        assert!(!is_keyframes("--keyframes"));
        assert!(!is_keyframes("keyframe"));
    }

    #[test]
    fn test_import_and_namespace() {
        let document = parse(
            "@import url(\"a.css\") screen, print;\n@import 'b.css';\n@namespace svg url(http://www.w3.org/2000/svg);",
        );
        let Statement::Import(import) = &document.contents()[0] else {
            panic!("Expected import");
        };
        assert_eq!(import.location().url().text(), "a.css");
        assert_eq!(import.media_query(), Some("screen, print"));
        let Statement::Import(import) = &document.contents()[1] else {
            panic!("Expected import");
        };
        assert_eq!(import.media_query(), None);
        let Statement::Namespace(namespace) = &document.contents()[2] else {
            panic!("Expected namespace");
        };
        assert_eq!(namespace.prefix(), Some("svg"));
    }

    #[test]
    fn test_charset() {
        let parser = CssParser::new("@charset \"iso-8859-1\";", Settings::default());
        let document = parser.parse().unwrap();
        assert!(matches!(document.contents()[0], Statement::Charset(_)));

        let mut parser = CssParser::new("@charset \"iso-8859-1\"; p {}", Settings::default());
        let mut list = CssList::new();
        parser.parse_list(&mut list, ListKind::Root).unwrap();
        assert_eq!(parser.charset(), "iso-8859-1");
    }

    #[test]
    fn test_misplaced_charset() {
        let css = "p { color: red } @charset \"utf-8\"; a { color: blue }";
        assert!(matches!(parse_strict(css), Err(CssError::SourceStructure { .. })));
        let document = parse(css);
        assert_eq!(document.contents().len(), 2);

        let css = "@media print { @charset \"utf-8\"; }";
        assert!(parse_strict(css).is_err());
    }

    #[test]
    fn test_stray_closing_brace() {
        assert!(matches!(parse_strict("} p { color: red }"), Err(CssError::SourceStructure { .. })));
        let document = parse("} p { color: red }");
        assert_eq!(document.contents().len(), 1);
    }

    #[test]
    fn test_unbalanced_at_rule() {
        let css = "@media (min-width: 10px { p { color: red } } a { color: blue }";
        assert!(matches!(parse_strict(css), Err(CssError::SourceStructure { .. })));
        let document = parse(css);
        assert_eq!(document.contents().len(), 1);
        assert_eq!(first_block(&document).selectors()[0].selector(), "a");
    }

    #[test]
    fn test_lenient_skips_bad_declaration() {
        let document = parse("p { color: red; width: ; height: 1px }");
        let rule_set = first_block(&document).rule_set();
        let names: Vec<_> = rule_set.declarations(None).iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["color", "height"]);
        assert!(parse_strict("p { color: red; width: ; height: 1px }").is_err());
    }

    #[test]
    fn test_lenient_skips_bad_selector() {
        let document = parse("a; b { color: red } p { color: blue }");
        assert_eq!(document.contents().len(), 1);
        assert_eq!(first_block(&document).selectors()[0].selector(), "p");
        assert!(matches!(
            parse_strict("a; b { color: red }"),
            Err(CssError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_unterminated_input() {
        let document = parse("p { color: red; margin: 0");
        assert_eq!(first_block(&document).rule_set().len(), 2);
        assert!(matches!(parse_strict("p { color: red;"), Err(CssError::UnexpectedEof { .. })));
        assert!(matches!(
            parse_strict("@media print { p { color: red }"),
            Err(CssError::UnexpectedEof { .. })
        ));
        let document = parse("@media print { p { color: red }");
        assert_eq!(document.contents().len(), 1);
    }

    #[test]
    fn test_ie_hack() {
        let document = parse("p { width: 10px\\9; }");
        let width = first_block(&document).rule_set().applied_declaration("width").unwrap();
        assert_eq!(width.ie_hacks(), ["9"]);
        assert_eq!(document.render(None).unwrap(), "p {width: 10px \\9;}");
    }

    #[test]
    fn test_at_rule_without_block() {
        let document = parse("@layer base; p { color: red }");
        assert_eq!(document.contents().len(), 1);
        assert!(parse_strict("@layer base; p { color: red }").is_err());
    }

    #[test]
    fn test_selector_with_braces_in_string() {
        let document = parse("a[title=\"{x}\"], li:not(.a, .b) { color: red }");
        let selectors = first_block(&document).selectors();
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].selector(), "a[title=\"{x}\"]");
        assert_eq!(selectors[1].selector(), "li:not(.a, .b)");
    }

    #[test]
    fn test_trailing_comments_stay_in_nested_list() {
        let document = parse("/* lead */ @media print { a { b: c } /* trail */ }");
        let Statement::AtRuleBlockList(media) = &document.contents()[0] else {
            panic!("Expected block list");
        };
        let leading: Vec<_> = media.comments().iter().map(Comment::text).collect();
        assert_eq!(leading, [" lead "]);
        let trailing: Vec<_> = media.list().trailing_comments().iter().map(Comment::text).collect();
        assert_eq!(trailing, [" trail "]);

        let rendered = document.render(Some(&OutputFormat::pretty())).unwrap();
        assert!(rendered.starts_with("\n/* lead */\n@media print {"));
        let rule = rendered.find("a {").unwrap();
        let trail = rendered.find("/* trail */").unwrap();
        assert!(rule < trail);
        assert!(rendered.ends_with("/* trail */\n}"));
    }

    #[test]
    fn test_leading_comments_come_before_selector_comments() {
        let document = parse("/* lead */ a /* mid */ { b: c }");
        let comments: Vec<_> = first_block(&document).comments().iter().map(Comment::text).collect();
        assert_eq!(comments, [" lead ", " mid "]);
    }

    #[test]
    fn test_vendor_prefixed_block_rule() {
        let css = "@-moz-document url-prefix() { .x { color: red } } p { color: blue }";
        let document = parse(css);
        assert_eq!(document.contents().len(), 2);
        let Statement::AtRuleBlockList(rule) = &document.contents()[0] else {
            panic!("Expected block list");
        };
        assert_eq!(rule.name(), "-moz-document");
        assert_eq!(rule.arguments(), "url-prefix()");
        assert_eq!(rule.list().len(), 1);
        assert!(parse_strict(css).is_ok());
    }
}
