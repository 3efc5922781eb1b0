//! CSS values
//!
//! Declaration values form a small tree: primitives (sizes, colors, strings,
//! URLs, bare keywords) combined by lists and functions.

mod color;
mod function;
mod list;
mod parser;
mod size;
mod text;

pub use color::Color;
pub use function::{CalcFunction, CalcToken, CssFunction};
pub use list::{LineName, ValueList};
pub use parser::ValueParser;
pub use size::Size;
pub use text::{CssString, Url};

use std::fmt;

use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};

/// Separator between the components of a value list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSeparator {
    Space,
    Comma,
    Slash,
    /// `=`, only seen inside function arguments (`opacity=50`)
    Equals,
}

impl ListSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Comma => ",",
            Self::Slash => "/",
            Self::Equals => "=",
        }
    }
}

impl fmt::Display for ListSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CSS value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Identifier or bare token (`bold`, `auto`, `U+0025-00FF`, a stray `+`)
    Keyword(String),
    /// Number with optional unit
    Size(Size),
    /// Color in hex or functional notation
    Color(Color),
    /// Quoted string
    String(CssString),
    /// `url(...)`
    Url(Url),
    /// Generic function call, including bare parenthesized expressions
    Function(CssFunction),
    /// `calc()` and its vendor variants
    Calc(CalcFunction),
    /// Space, comma or slash separated list
    List(ValueList),
    /// Grid line names, `[a b]`
    LineName(LineName),
}

impl Value {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self::Keyword(keyword.into())
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<&Size> {
        match self {
            Self::Size(size) => Some(size),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Self::Color(color) => Some(color),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ValueList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&CssFunction> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Whether this value is a function call of some kind
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_) | Self::Calc(_) | Self::Color(_))
    }

    /// Collect the leaf values below this one.
    ///
    /// Lists are always descended into. Functions (colors and `calc()`
    /// included) are reported whole unless `search_in_function_arguments`
    /// is set, in which case their arguments are visited instead.
    pub fn collect_values<'a>(&'a self, search_in_function_arguments: bool, out: &mut Vec<&'a Value>) {
        match self {
            Self::List(list) => {
                for component in list.components() {
                    component.collect_values(search_in_function_arguments, out);
                }
            }
            Self::Function(function) if search_in_function_arguments => {
                for argument in function.arguments() {
                    argument.collect_values(true, out);
                }
            }
            Self::Color(color) if search_in_function_arguments => {
                for (_, component) in color.components() {
                    component.collect_values(true, out);
                }
            }
            Self::Calc(calc) if search_in_function_arguments => {
                for operand in calc.operands() {
                    operand.collect_values(true, out);
                }
            }
            Self::Keyword(_)
            | Self::Size(_)
            | Self::Color(_)
            | Self::String(_)
            | Self::Url(_)
            | Self::Function(_)
            | Self::Calc(_)
            | Self::LineName(_) => out.push(self),
        }
    }
}

impl Positioned for Value {
    fn position(&self) -> Option<Position> {
        match self {
            Self::Keyword(_) => None,
            Self::Size(v) => v.position(),
            Self::Color(v) => v.position(),
            Self::String(v) => v.position(),
            Self::Url(v) => v.position(),
            Self::Function(v) => v.position(),
            Self::Calc(v) => v.position(),
            Self::List(v) => v.position(),
            Self::LineName(v) => v.position(),
        }
    }

    fn set_position(&mut self, position: Option<Position>) {
        match self {
            Self::Keyword(_) => {}
            Self::Size(v) => v.set_position(position),
            Self::Color(v) => v.set_position(position),
            Self::String(v) => v.set_position(position),
            Self::Url(v) => v.set_position(position),
            Self::Function(v) => v.set_position(position),
            Self::Calc(v) => v.set_position(position),
            Self::List(v) => v.set_position(position),
            Self::LineName(v) => v.set_position(position),
        }
    }
}

impl Render for Value {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        match self {
            Self::Keyword(keyword) => Ok(keyword.clone()),
            Self::Size(v) => v.render(format),
            Self::Color(v) => v.render(format),
            Self::String(v) => v.render(format),
            Self::Url(v) => v.render(format),
            Self::Function(v) => v.render(format),
            Self::Calc(v) => v.render(format),
            Self::List(v) => v.render(format),
            Self::LineName(v) => v.render(format),
        }
    }
}

impl From<Size> for Value {
    fn from(value: Size) -> Self {
        Self::Size(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<CssString> for Value {
    fn from(value: CssString) -> Self {
        Self::String(value)
    }
}

impl From<Url> for Value {
    fn from(value: Url) -> Self {
        Self::Url(value)
    }
}

impl From<CssFunction> for Value {
    fn from(value: CssFunction) -> Self {
        Self::Function(value)
    }
}

impl From<CalcFunction> for Value {
    fn from(value: CalcFunction) -> Self {
        Self::Calc(value)
    }
}

impl From<ValueList> for Value {
    fn from(value: ValueList) -> Self {
        Self::List(value)
    }
}

impl From<LineName> for Value {
    fn from(value: LineName) -> Self {
        Self::LineName(value)
    }
}
