use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};

use super::{ListSeparator, Value};

/// A function call such as `var(--x)` or `translate(1px, 2px)`.
///
/// A parenthesized expression is a function with an empty name.
#[derive(Debug, Clone, PartialEq)]
pub struct CssFunction {
    name: String,
    arguments: Vec<Value>,
    separator: ListSeparator,
    position: Option<Position>,
}

impl CssFunction {
    pub fn new(name: impl Into<String>, arguments: Vec<Value>, separator: ListSeparator) -> Self {
        Self {
            name: name.into(),
            arguments,
            separator,
            position: None,
        }
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

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut Vec<Value> {
        &mut self.arguments
    }

    pub fn separator(&self) -> ListSeparator {
        self.separator
    }

    pub fn set_separator(&mut self, separator: ListSeparator) {
        self.separator = separator;
    }
}

impl Positioned for CssFunction {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for CssFunction {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        let separator = format.list_separator(self.separator);
        Ok(format!("{}({})", self.name, format.implode(&separator, &self.arguments)?))
    }
}

/// One piece of a `calc()` expression
#[derive(Debug, Clone, PartialEq)]
pub enum CalcToken {
    Operand(Value),
    /// One of `+ - * /`
    Operator(char),
    OpenParen,
    CloseParen,
}

impl Render for CalcToken {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        match self {
            Self::Operand(value) => value.render(format),
            Self::Operator(op) => Ok(op.to_string()),
            Self::OpenParen => Ok("(".to_string()),
            Self::CloseParen => Ok(")".to_string()),
        }
    }
}

/// `calc()`, `-webkit-calc()` or `-moz-calc()`
#[derive(Debug, Clone, PartialEq)]
pub struct CalcFunction {
    name: String,
    tokens: Vec<CalcToken>,
    position: Option<Position>,
}

impl CalcFunction {
    pub fn new(name: impl Into<String>, tokens: Vec<CalcToken>) -> Self {
        Self {
            name: name.into(),
            tokens,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokens(&self) -> &[CalcToken] {
        &self.tokens
    }

    pub fn operands(&self) -> impl Iterator<Item = &Value> {
        self.tokens.iter().filter_map(|token| match token {
            CalcToken::Operand(value) => Some(value),
            _ => None,
        })
    }
}

impl Positioned for CalcFunction {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for CalcFunction {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        Ok(format!("{}({})", self.name, format.implode(" ", &self.tokens)?))
    }
}
