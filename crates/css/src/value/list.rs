use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};

use super::{ListSeparator, Value};

/// Components joined by one separator, e.g. `1px solid red` or `a, b`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueList {
    components: Vec<Value>,
    separator: ListSeparator,
    position: Option<Position>,
}

impl ValueList {
    pub fn new(components: Vec<Value>, separator: ListSeparator) -> Self {
        Self {
            components,
            separator,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn components(&self) -> &[Value] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut Vec<Value> {
        &mut self.components
    }

    pub fn add_component(&mut self, component: Value) {
        self.components.push(component);
    }

    pub fn separator(&self) -> ListSeparator {
        self.separator
    }

    pub fn set_separator(&mut self, separator: ListSeparator) {
        self.separator = separator;
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Positioned for ValueList {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for ValueList {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        format.implode(&format.list_separator(self.separator), &self.components)
    }
}

/// Grid line names in brackets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineName {
    names: Vec<String>,
    position: Option<Position>,
}

impl LineName {
    pub fn new(names: Vec<String>) -> Self {
        Self { names, position: None }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Positioned for LineName {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for LineName {
    fn render(&self, _format: &OutputFormat) -> CssResult<String> {
        Ok(format!("[{}]", self.names.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Size;

    #[test]
    fn test_nested_list_render() {
        let family = ValueList::new(
            vec![Value::keyword("Helvetica"), Value::keyword("sans-serif")],
            ListSeparator::Comma,
        );
        let ratio = ValueList::new(
            vec![Size::new(12.0, Some("px")).into(), Size::new(1.5, None).into()],
            ListSeparator::Slash,
        );
        let font = ValueList::new(
            vec![Value::keyword("bold"), ratio.into(), family.into()],
            ListSeparator::Space,
        );
        assert_eq!(
            font.render(&OutputFormat::default()).unwrap(),
            "bold 12px/1.5 Helvetica,sans-serif"
        );
    }

    #[test]
    fn test_line_name_render() {
        let names = LineName::new(vec!["full-start".into(), "main".into()]);
        assert_eq!(names.render(&OutputFormat::pretty()).unwrap(), "[full-start main]");
    }
}
