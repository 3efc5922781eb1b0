//! Declarations and the ordered sets that hold them

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::comment::{Comment, Commentable};
use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};
use crate::value::Value;

/// A `property: value` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    name: String,
    value: Option<Value>,
    important: bool,
    /// Old IE hacks such as the `9` in `color: red\9`
    ie_hacks: Vec<String>,
    position: Option<Position>,
    comments: Vec<Comment>,
}

impl Declaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            important: false,
            ie_hacks: Vec::new(),
            position: None,
            comments: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut Value> {
        self.value.as_mut()
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = Some(value.into());
    }

    pub fn is_important(&self) -> bool {
        self.important
    }

    pub fn set_important(&mut self, important: bool) {
        self.important = important;
    }

    pub fn ie_hacks(&self) -> &[String] {
        &self.ie_hacks
    }

    pub fn add_ie_hack(&mut self, hack: impl Into<String>) {
        self.ie_hacks.push(hack.into());
    }
}

impl Positioned for Declaration {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Commentable for Declaration {
    fn comments(&self) -> &[Comment] {
        &self.comments
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }
}

impl Render for Declaration {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        let mut result = format!(
            "{}{}:{}",
            format.comments(self),
            self.name,
            format.space_after_rule_name()
        );
        if let Some(value) = &self.value {
            result.push_str(&value.render(format)?);
        }
        if !self.ie_hacks.is_empty() {
            result.push_str(" \\");
            result.push_str(&self.ie_hacks.join("\\"));
        }
        if self.important {
            result.push_str(" !important");
        }
        result.push(';');
        Ok(result)
    }
}

/// Whether a declaration name matches a search pattern.
///
/// A pattern ending in `-` matches every name it prefixes as well as the
/// name without the dash, so `font-` finds `font` and `font-size`.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    match pattern.strip_suffix('-') {
        Some(base) => name == base || name.starts_with(pattern),
        None => name == pattern,
    }
}

/// Declarations in source order, indexed by property name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    declarations: Vec<Declaration>,
    by_name: FxHashMap<String, SmallVec<[usize; 4]>>,
    position: Option<Position>,
    comments: Vec<Comment>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    fn reindex(&mut self) {
        self.by_name.clear();
        for (index, declaration) in self.declarations.iter().enumerate() {
            self.by_name
                .entry(declaration.name.clone())
                .or_default()
                .push(index);
        }
    }

    /// Add a declaration and return the index it landed at.
    ///
    /// With a `sibling` index the declaration goes right before that
    /// declaration and takes over its position; declarations on the same
    /// line from that column on move one column right. Without one, a
    /// declaration lacking a position is appended on a fresh line, and one
    /// with a position is placed in source order.
    pub fn add_declaration(&mut self, mut declaration: Declaration, sibling: Option<usize>) -> usize {
        let index = match sibling.filter(|&i| i < self.declarations.len()) {
            Some(sibling) => {
                if let Some(anchor) = self.declarations[sibling].position {
                    for other in &mut self.declarations {
                        if let Some(position) = &mut other.position {
                            if position.line == anchor.line && position.column >= anchor.column {
                                position.column += 1;
                            }
                        }
                    }
                    declaration.position = Some(anchor);
                }
                sibling
            }
            None => match declaration.position {
                None => {
                    let line = self
                        .declarations
                        .iter()
                        .filter_map(|d| d.position)
                        .map(|p| p.line + 1)
                        .max()
                        .unwrap_or(1);
                    declaration.position = Some(Position::new(line, 0));
                    self.declarations.len()
                }
                Some(position) => self
                    .declarations
                    .iter()
                    .position(|d| d.position.is_some_and(|p| p > position))
                    .unwrap_or(self.declarations.len()),
            },
        };

        log::trace!("Adding declaration `{}` at index {}", declaration.name, index);
        self.declarations.insert(index, declaration);
        self.reindex();
        index
    }

    pub fn add_declarations(&mut self, declarations: impl IntoIterator<Item = Declaration>) {
        for declaration in declarations {
            self.add_declaration(declaration, None);
        }
    }

    /// Declarations in order, optionally filtered by a name pattern
    pub fn declarations(&self, pattern: Option<&str>) -> Vec<&Declaration> {
        match pattern {
            None => self.declarations.iter().collect(),
            Some(pattern) if !pattern.ends_with('-') => self
                .by_name
                .get(pattern)
                .map(|indices| indices.iter().map(|&i| &self.declarations[i]).collect())
                .unwrap_or_default(),
            Some(pattern) => self
                .declarations
                .iter()
                .filter(|d| matches_pattern(&d.name, pattern))
                .collect(),
        }
    }

    /// The declaration that wins for each matching property name.
    ///
    /// See [`RuleSet::applied_declaration`] for the rule applied.
    pub fn declarations_by_name(&self, pattern: Option<&str>) -> FxHashMap<&str, &Declaration> {
        let mut result: FxHashMap<&str, &Declaration> = FxHashMap::default();
        for declaration in self.declarations(pattern) {
            let replace = result
                .get(declaration.name())
                .map_or(true, |current| !current.is_important() || declaration.is_important());
            if replace {
                result.insert(declaration.name(), declaration);
            }
        }
        result
    }

    /// The declaration in effect for `name`: the last one, unless an
    /// earlier one is `!important` and the later one is not
    pub fn applied_declaration(&self, name: &str) -> Option<&Declaration> {
        let indices = self.by_name.get(name)?;
        let mut applied: Option<&Declaration> = None;
        for &index in indices {
            let candidate = &self.declarations[index];
            if applied.map_or(true, |current| !current.is_important() || candidate.is_important()) {
                applied = Some(candidate);
            }
        }
        applied
    }

    pub fn declaration_at(&self, index: usize) -> Option<&Declaration> {
        self.declarations.get(index)
    }

    /// Index of the first declaration equal to `declaration`
    pub fn index_of(&self, declaration: &Declaration) -> Option<usize> {
        self.declarations.iter().position(|d| d == declaration)
    }

    /// Edit declarations in place; the name index is rebuilt afterwards
    pub fn edit_declarations(&mut self, mut edit: impl FnMut(&mut Declaration)) {
        for declaration in &mut self.declarations {
            edit(declaration);
        }
        self.reindex();
    }

    /// Remove the first declaration equal to `declaration`
    pub fn remove_declaration(&mut self, declaration: &Declaration) -> Option<Declaration> {
        let index = self.index_of(declaration)?;
        self.remove_declaration_at(index)
    }

    pub fn remove_declaration_at(&mut self, index: usize) -> Option<Declaration> {
        if index >= self.declarations.len() {
            return None;
        }
        let removed = self.declarations.remove(index);
        self.reindex();
        Some(removed)
    }

    /// Remove every declaration whose name matches `pattern`
    pub fn remove_matching_declarations(&mut self, pattern: &str) -> Vec<Declaration> {
        let (removed, kept) = std::mem::take(&mut self.declarations)
            .into_iter()
            .partition(|d| matches_pattern(&d.name, pattern));
        self.declarations = kept;
        self.reindex();
        removed
    }

    pub fn remove_all_declarations(&mut self) {
        self.declarations.clear();
        self.by_name.clear();
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.declarations
            .iter()
            .filter_map(|d| d.value.as_ref().map(|v| (d.name.as_str(), v)))
    }

    /// The declarations between the braces, with spacing for `format`
    pub(crate) fn render_declarations(&self, format: &OutputFormat) -> CssResult<String> {
        let next_level = format.next_level();
        let mut result = String::new();
        let mut is_first = true;

        for declaration in &self.declarations {
            let Some(rendered) = next_level.safely(|| declaration.render(&next_level))? else {
                continue;
            };
            if is_first {
                is_first = false;
                result.push_str(&next_level.space_before_rules());
            } else {
                result.push_str(&next_level.space_between_rules());
            }
            result.push_str(&rendered);
        }

        if !is_first {
            result.push_str(&format.space_after_rules());
        }
        Ok(format.remove_last_semicolon(result))
    }
}

impl Positioned for RuleSet {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Commentable for RuleSet {
    fn comments(&self) -> &[Comment] {
        &self.comments
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Size;

    fn declaration(name: &str, px: f64) -> Declaration {
        Declaration::new(name).with_value(Size::new(px, Some("px")))
    }

    fn positioned(name: &str, line: usize, column: usize) -> Declaration {
        declaration(name, 1.0).with_position(Position::new(line, column))
    }

    #[test]
    fn test_pattern_matching() {
        assert!(matches_pattern("font", "font-"));
        assert!(matches_pattern("font-size", "font-"));
        assert!(!matches_pattern("fontsize", "font-"));
        assert!(matches_pattern("font", "font"));
        assert!(!matches_pattern("font-size", "font"));
    }

    #[test]
    fn test_declarations_by_pattern() {
        let mut set = RuleSet::new();
        set.add_declaration(declaration("font", 1.0), None);
        set.add_declaration(declaration("font-size", 2.0), None);
        set.add_declaration(declaration("color", 3.0), None);

        assert_eq!(set.declarations(Some("font-")).len(), 2);
        let exact = set.declarations(Some("font"));
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].name(), "font");
        assert_eq!(set.declarations(None).len(), 3);
    }

    #[test]
    fn test_unpositioned_declarations_get_new_lines() {
        let mut set = RuleSet::new();
        set.add_declaration(declaration("a", 1.0), None);
        set.add_declaration(declaration("b", 1.0), None);
        assert_eq!(set.declaration_at(0).unwrap().position(), Some(Position::new(1, 0)));
        assert_eq!(set.declaration_at(1).unwrap().position(), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_positioned_declaration_sorted_in() {
        let mut set = RuleSet::new();
        set.add_declaration(positioned("a", 1, 0), None);
        set.add_declaration(positioned("c", 3, 0), None);
        let index = set.add_declaration(positioned("b", 2, 4), None);
        assert_eq!(index, 1);
        let names: Vec<_> = set.declarations(None).iter().map(|d| d.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_sibling_insertion_renumbers() {
        let mut set = RuleSet::new();
        set.add_declaration(positioned("a", 1, 2), None);
        set.add_declaration(positioned("b", 1, 10), None);
        set.add_declaration(positioned("c", 1, 11), None);

        let index = set.add_declaration(declaration("x", 5.0), Some(1));
        assert_eq!(index, 1);

        let positions: Vec<_> = set.declarations(None).iter().map(|d| d.position().unwrap()).collect();
        assert_eq!(
            positions,
            [
                Position::new(1, 2),
                Position::new(1, 10),
                Position::new(1, 11),
                Position::new(1, 12),
            ]
        );
        let mut unique = positions.clone();
        unique.dedup();
        assert_eq!(unique.len(), positions.len());
        assert_eq!(set.declarations(None)[1].name(), "x");
    }

    #[test]
    fn test_sibling_out_of_range_appends() {
        let mut set = RuleSet::new();
        set.add_declaration(declaration("a", 1.0), None);
        assert_eq!(set.add_declaration(declaration("b", 1.0), Some(9)), 1);
    }

    #[test]
    fn test_applied_declaration() {
        let mut set = RuleSet::new();
        set.add_declaration(declaration("border-width", 1.0), None);
        set.add_declaration(declaration("border-width", 2.0), None);
        let applied = set.applied_declaration("border-width").unwrap();
        assert_eq!(applied.value().unwrap().as_size().unwrap().magnitude(), 2.0);

        let mut set = RuleSet::new();
        set.add_declaration(declaration("width", 1.0).with_important(true), None);
        set.add_declaration(declaration("width", 2.0), None);
        let applied = set.applied_declaration("width").unwrap();
        assert!(applied.is_important());
        assert_eq!(set.declarations_by_name(None)["width"].value(), applied.value());
    }

    #[test]
    fn test_remove_matching() {
        let mut set = RuleSet::new();
        set.add_declaration(declaration("margin", 1.0), None);
        set.add_declaration(declaration("margin-top", 1.0), None);
        set.add_declaration(declaration("padding", 1.0), None);
        let removed = set.remove_matching_declarations("margin-");
        assert_eq!(removed.len(), 2);
        assert_eq!(set.len(), 1);
        assert!(set.declarations(Some("margin")).is_empty());
    }

    #[test]
    fn test_remove_and_edit() {
        let mut set = RuleSet::new();
        set.add_declaration(declaration("a", 1.0), None);
        set.add_declaration(declaration("b", 1.0), None);
        let target = set.declaration_at(0).unwrap().clone();
        assert!(set.remove_declaration(&target).is_some());
        assert!(set.remove_declaration(&target).is_none());

        set.edit_declarations(|d| d.set_name("c"));
        assert_eq!(set.declarations(Some("c")).len(), 1);
        assert!(set.declarations(Some("b")).is_empty());
    }

    #[test]
    fn test_declaration_render() {
        let mut decl = Declaration::new("color").with_value(Value::keyword("red")).with_important(true);
        decl.add_ie_hack("9");
        assert_eq!(decl.render(&OutputFormat::default()).unwrap(), "color: red \\9 !important;");
        assert_eq!(
            Declaration::new("x").with_value(Value::keyword("y")).render(&OutputFormat::compact()).unwrap(),
            "x:y;"
        );
    }

    #[test]
    fn test_render_declarations_spacing() {
        let mut set = RuleSet::new();
        set.add_declaration(declaration("a", 1.0), None);
        set.add_declaration(declaration("b", 2.0), None);
        assert_eq!(set.render_declarations(&OutputFormat::compact()).unwrap(), "a:1px;b:2px");
        assert_eq!(
            set.render_declarations(&OutputFormat::pretty()).unwrap(),
            "\n\ta: 1px;\n\tb: 2px;\n"
        );
    }
}
