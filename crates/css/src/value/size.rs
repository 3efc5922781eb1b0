use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};

/// Absolute length units
pub const ABSOLUTE_SIZE_UNITS: &[&str] = &[
    "px", "pt", "pc", "cm", "mm", "mozmm", "in", "vh", "dvh", "svh", "lvh", "vw", "vmin", "vmax",
    "rem",
];

/// Units relative to something else in the document
pub const RELATIVE_SIZE_UNITS: &[&str] = &["%", "em", "ex", "ch", "fr"];

/// Units that do not measure length
pub const NON_SIZE_UNITS: &[&str] = &[
    "deg", "grad", "rad", "s", "ms", "turn", "Hz", "kHz", "dpi", "dpcm", "dppx",
];

/// A number with an optional unit
#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    magnitude: f64,
    unit: Option<String>,
    color_component: bool,
    position: Option<Position>,
}

impl Size {
    pub fn new(magnitude: f64, unit: Option<&str>) -> Self {
        Self {
            magnitude,
            unit: unit.map(str::to_string),
            color_component: false,
            position: None,
        }
    }

    /// A channel of a color rather than a length
    pub fn color_component(magnitude: f64, unit: Option<&str>) -> Self {
        Self {
            color_component: true,
            ..Self::new(magnitude, unit)
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn set_magnitude(&mut self, magnitude: f64) {
        self.magnitude = magnitude;
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn set_unit(&mut self, unit: Option<&str>) {
        self.unit = unit.map(str::to_string);
    }

    pub fn is_color_component(&self) -> bool {
        self.color_component
    }

    /// Whether this is a length. Angles, times, frequencies, resolutions
    /// and color channels are not.
    pub fn is_size(&self) -> bool {
        if self.unit.as_deref().is_some_and(|unit| NON_SIZE_UNITS.contains(&unit)) {
            return false;
        }
        !self.color_component
    }

    /// Relative units, and unitless non-zero numbers, scale with context
    pub fn is_relative(&self) -> bool {
        match self.unit.as_deref() {
            Some(unit) => RELATIVE_SIZE_UNITS.contains(&unit),
            None => self.magnitude != 0.0,
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.unit.as_deref() == Some("%")
    }
}

impl Positioned for Size {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for Size {
    fn render(&self, _format: &OutputFormat) -> CssResult<String> {
        let mut result = format_number(self.magnitude);
        if let Some(unit) = &self.unit {
            result.push_str(unit);
        }
        Ok(result)
    }
}

/// Shortest round-tripping form, with the leading zero of fractions dropped
pub(crate) fn format_number(number: f64) -> String {
    let text = number.to_string();
    if let Some(rest) = text.strip_prefix("0.") {
        format!(".{}", rest)
    } else if let Some(rest) = text.strip_prefix("-0.") {
        format!("-.{}", rest)
    } else {
        text
    }
}

/// All known units, longest first so that `vmin` wins over `vm...`
pub(crate) fn units_longest_first() -> impl Iterator<Item = &'static str> {
    let mut units: Vec<&'static str> = ABSOLUTE_SIZE_UNITS
        .iter()
        .chain(RELATIVE_SIZE_UNITS)
        .chain(NON_SIZE_UNITS)
        .copied()
        .collect();
    units.sort_by(|a, b| b.len().cmp(&a.len()));
    units.into_iter()
}
