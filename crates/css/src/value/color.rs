use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};

use super::{ListSeparator, Value};

/// A color, stored as named channels.
///
/// The function name is derived from the channel letters, so `#f00` and
/// `rgb(255, 0, 0)` both become `rgb` with channels `r`, `g` and `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    components: Vec<(char, Value)>,
    legacy_syntax: bool,
    position: Option<Position>,
}

impl Color {
    pub fn new(components: impl IntoIterator<Item = (char, Value)>) -> Self {
        Self {
            components: components.into_iter().collect(),
            legacy_syntax: true,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub(crate) fn with_legacy_syntax(mut self, legacy: bool) -> Self {
        self.legacy_syntax = legacy;
        self
    }

    /// `rgb`, `rgba`, `hsl` or `hsla`
    pub fn name(&self) -> String {
        self.components.iter().map(|(key, _)| *key).collect()
    }

    pub fn components(&self) -> &[(char, Value)] {
        &self.components
    }

    pub fn component(&self, key: char) -> Option<&Value> {
        self.components.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn set_component(&mut self, key: char, value: Value) {
        match self.components.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.components.push((key, value)),
        }
    }

    /// Whether the source used comma separated arguments
    pub fn has_legacy_syntax(&self) -> bool {
        self.legacy_syntax
    }

    fn all_components_are_numbers(&self) -> bool {
        self.components
            .iter()
            .all(|(_, value)| value.as_size().is_some_and(|size| size.unit().is_none()))
    }

    fn has_none_component(&self) -> bool {
        self.components
            .iter()
            .any(|(_, value)| value.as_keyword().is_some_and(|k| k.eq_ignore_ascii_case("none")))
    }

    fn should_render_as_hex(&self, format: &OutputFormat) -> bool {
        format.uses_rgb_hash_notation() && self.name() == "rgb" && self.all_components_are_numbers()
    }

    fn should_render_in_modern_syntax(&self) -> bool {
        if self.has_none_component() {
            return true;
        }
        if !matches!(self.name().as_str(), "rgb" | "rgba") {
            return false;
        }

        let mut has_percentage = false;
        let mut has_number = false;
        for (key, value) in &self.components {
            if *key == 'a' {
                continue;
            }
            if let Some(size) = value.as_size() {
                if size.is_percentage() {
                    has_percentage = true;
                } else {
                    has_number = true;
                }
            }
        }
        has_percentage && has_number
    }

    fn render_as_hex(&self) -> String {
        let channels: Vec<u8> = self
            .components
            .iter()
            .filter_map(|(_, value)| value.as_size())
            .map(|size| size.magnitude().round().clamp(0.0, 255.0) as u8)
            .collect();
        let hex: String = channels.iter().map(|c| format!("{:02x}", c)).collect();

        let short = channels.iter().all(|c| c >> 4 == c & 0x0f);
        if short {
            let digits: String = hex.chars().step_by(2).collect();
            format!("#{}", digits)
        } else {
            format!("#{}", hex)
        }
    }

    fn render_in_modern_syntax(&self, format: &OutputFormat) -> CssResult<String> {
        let values: Vec<&Value> = self.components.iter().map(|(_, v)| v).collect();
        let arguments = match self.components.last() {
            Some(('a', alpha)) => format!(
                "{} / {}",
                format.implode(" ", &values[..values.len() - 1])?,
                alpha.render(format)?
            ),
            _ => format.implode(" ", &values)?,
        };
        Ok(format!("{}({})", self.name(), arguments))
    }
}

impl Positioned for Color {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for Color {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        if self.should_render_as_hex(format) {
            return Ok(self.render_as_hex());
        }
        if self.should_render_in_modern_syntax() {
            return self.render_in_modern_syntax(format);
        }

        let values: Vec<&Value> = self.components.iter().map(|(_, v)| v).collect();
        let separator = format.list_separator(ListSeparator::Comma);
        Ok(format!("{}({})", self.name(), format.implode(&separator, &values)?))
    }
}
