//! Value parser
//!
//! Values are read as a flat run of primitives and separators, then folded
//! into nested lists one separator at a time. The order of the separators
//! decides which binds tightest: for `font` the comma groups first, so
//! `bold 12px/1.5 a, b` becomes `bold (12px/1.5) (a, b)`.

use crate::cursor::Cursor;
use crate::error::{CssError, CssResult};
use crate::position::Position;

use super::size::units_longest_first;
use super::{
    CalcFunction, CalcToken, Color, CssFunction, CssString, LineName, ListSeparator, Size, Url,
    Value, ValueList,
};

const FUNCTION_ARGUMENT_DELIMITERS: &[ListSeparator] =
    &[ListSeparator::Equals, ListSeparator::Space, ListSeparator::Comma];

const CALC_FUNCTIONS: &[&str] = &["calc", "-webkit-calc", "-moz-calc"];

/// Value parser
pub struct ValueParser;

impl ValueParser {
    /// Separators to fold a property's value by, tightest first
    pub fn list_delimiters_for_property(property: &str) -> &'static [ListSeparator] {
        if property == "font" || property.starts_with("font-") {
            &[ListSeparator::Comma, ListSeparator::Slash, ListSeparator::Space]
        } else if property == "src" {
            &[ListSeparator::Space, ListSeparator::Comma]
        } else {
            &[ListSeparator::Comma, ListSeparator::Space, ListSeparator::Slash]
        }
    }

    /// Parse a value up to `}`, `;`, `!`, `)` or the end of input
    pub fn parse_value(cursor: &mut Cursor, delimiters: &[ListSeparator]) -> CssResult<Value> {
        let position = cursor.current_position();
        let mut values: Vec<Value> = Vec::new();
        let mut separators: Vec<ListSeparator> = Vec::new();

        cursor.consume_whitespace()?;
        while !Self::at_value_end(cursor) {
            if !values.is_empty() {
                let found = delimiters
                    .iter()
                    .copied()
                    .find(|d| *d != ListSeparator::Space && cursor.comes(d.as_str(), false));
                match found {
                    Some(delimiter) => {
                        cursor.consume_literal(delimiter.as_str())?;
                        cursor.consume_whitespace()?;
                        separators.push(delimiter);
                    }
                    None => separators.push(ListSeparator::Space),
                }
            }
            values.push(Self::parse_primitive_value(cursor)?);
            cursor.consume_whitespace()?;
        }

        if values.is_empty() {
            return Err(CssError::unexpected_token(
                "a value",
                cursor.peek(5, 0),
                cursor.location(),
            ));
        }

        let mut order = delimiters.to_vec();
        if !order.contains(&ListSeparator::Space) {
            order.push(ListSeparator::Space);
        }
        for delimiter in order {
            if values.len() == 1 {
                break;
            }
            (values, separators) = fold(values, separators, delimiter, position);
        }

        match values.pop() {
            Some(value) if values.is_empty() => Ok(value),
            _ => Err(CssError::unexpected_token(
                "a single value",
                cursor.peek(5, 0),
                cursor.location(),
            )),
        }
    }

    fn at_value_end(cursor: &Cursor) -> bool {
        cursor.is_end()
            || cursor.comes("}", false)
            || cursor.comes(";", false)
            || cursor.comes("!", false)
            || cursor.comes(")", false)
            || (cursor.is_lenient() && (cursor.comes("\\9", false) || cursor.comes("\\0", false)))
    }

    /// Parse one value that is not a list
    pub fn parse_primitive_value(cursor: &mut Cursor) -> CssResult<Value> {
        cursor.consume_whitespace()?;

        let value = if Self::comes_number(cursor) {
            Value::Size(Self::parse_size(cursor, false)?)
        } else if cursor.comes("#", false) || cursor.comes("rgb", true) || cursor.comes("hsl", true) {
            Self::parse_color(cursor)?
        } else if cursor.comes("'", false) || cursor.comes("\"", false) {
            Value::String(Self::parse_string(cursor)?)
        } else if cursor.is_lenient() && cursor.comes("progid:", true) {
            Value::Function(Self::parse_microsoft_filter(cursor)?)
        } else if cursor.comes("[", false) {
            Value::LineName(Self::parse_line_name(cursor)?)
        } else if cursor.comes("U+", false) {
            Self::parse_unicode_range(cursor)?
        } else if cursor.comes("(", false) {
            Value::Function(Self::parse_expression(cursor)?)
        } else {
            let next = cursor.peek_char();
            match Self::parse_identifier_or_function(cursor, false) {
                Ok(value) => value,
                Err(CssError::UnexpectedToken { .. })
                    if matches!(next, Some('+' | '-' | '*' | '/')) =>
                {
                    Value::Keyword(cursor.consume(1)?)
                }
                Err(e) => return Err(e),
            }
        };

        cursor.consume_whitespace()?;
        Ok(value)
    }

    fn comes_number(cursor: &Cursor) -> bool {
        let digit_at = |offset| cursor.peek_char_at(offset).is_some_and(|c: char| c.is_ascii_digit());
        digit_at(0)
            || (cursor.comes("-.", false) && digit_at(2))
            || ((cursor.comes("-", false) || cursor.comes(".", false)) && digit_at(1))
    }

    /// Parse an identifier, or a function call if `(` follows it
    pub fn parse_identifier_or_function(cursor: &mut Cursor, ignore_case: bool) -> CssResult<Value> {
        let anchor = cursor.anchor();
        let identifier = cursor.parse_identifier(ignore_case)?;
        if !cursor.comes("(", false) {
            return Ok(Value::Keyword(identifier));
        }

        anchor.backtrack(cursor);
        let lowercase = identifier.to_lowercase();
        if lowercase == "url" {
            Ok(Value::Url(Self::parse_url(cursor)?))
        } else if CALC_FUNCTIONS.contains(&lowercase.as_str()) {
            Ok(Value::Calc(Self::parse_calc(cursor)?))
        } else {
            Ok(Value::Function(Self::parse_function(cursor, ignore_case)?))
        }
    }

    /// Parse a number with an optional unit
    pub fn parse_size(cursor: &mut Cursor, is_color_component: bool) -> CssResult<Size> {
        let position = cursor.current_position();
        let location = cursor.location();

        let mut number = String::new();
        if cursor.comes("-", false) {
            number.push_str(&cursor.consume(1)?);
        }
        while let Some(c) = cursor.peek_char() {
            if c.is_ascii_digit() || c == '.' {
                number.push_str(&cursor.consume(1)?);
            } else if (c == 'e' || c == 'E')
                && cursor
                    .peek_char_at(1)
                    .is_some_and(|n| n.is_ascii_digit() || n == '+' || n == '-')
            {
                number.push_str(&cursor.consume(2)?);
            } else {
                break;
            }
        }

        let magnitude: f64 = number
            .parse()
            .map_err(|_| CssError::unexpected_token("a number", number.clone(), location))?;

        let mut unit = None;
        for candidate in units_longest_first() {
            let length = candidate.chars().count();
            if cursor.peek(length, 0).eq_ignore_ascii_case(candidate) {
                cursor.consume(length)?;
                unit = Some(candidate);
                break;
            }
        }

        let size = if is_color_component {
            Size::color_component(magnitude, unit)
        } else {
            Size::new(magnitude, unit)
        };
        Ok(size.with_position(position))
    }

    /// Parse a hex color or an `rgb()`/`hsl()` family function.
    ///
    /// A color function with a `var()` argument cannot be resolved and
    /// comes back as a plain function.
    pub fn parse_color(cursor: &mut Cursor) -> CssResult<Value> {
        if cursor.comes("#", false) {
            Self::parse_hex_color(cursor).map(Value::Color)
        } else {
            Self::parse_color_function(cursor)
        }
    }

    fn parse_hex_color(cursor: &mut Cursor) -> CssResult<Color> {
        let position = cursor.current_position();
        let location = cursor.location();
        cursor.consume_literal("#")?;
        let mut hex = cursor.parse_identifier(false)?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CssError::unexpected_token("a hex color value", hex, location));
        }
        if hex.len() == 3 || hex.len() == 4 {
            hex = hex.chars().flat_map(|c| [c, c]).collect();
        }
        if hex.len() != 6 && hex.len() != 8 {
            return Err(CssError::unexpected_token(
                "a hex color value of 3, 4, 6 or 8 digits",
                hex,
                location,
            ));
        }

        let channel = |index: usize| -> CssResult<f64> {
            u8::from_str_radix(&hex[index * 2..index * 2 + 2], 16)
                .map(f64::from)
                .map_err(|_| CssError::unexpected_token("a hex color value", hex.clone(), location))
        };

        let mut components: Vec<(char, Value)> = vec![
            ('r', Size::color_component(channel(0)?, None).with_position(position).into()),
            ('g', Size::color_component(channel(1)?, None).with_position(position).into()),
            ('b', Size::color_component(channel(2)?, None).with_position(position).into()),
        ];
        if hex.len() == 8 {
            let alpha = (channel(3)? / 255.0 * 100.0).round() / 100.0;
            components.push(('a', Size::color_component(alpha, None).with_position(position).into()));
        }
        Ok(Color::new(components).with_position(position))
    }

    fn parse_color_function(cursor: &mut Cursor) -> CssResult<Value> {
        let position = cursor.current_position();
        let mode = cursor.parse_identifier(true)?;
        cursor.consume_whitespace()?;
        cursor.consume_literal("(")?;

        // rgb and hsl take an optional alpha channel
        let may_have_optional_alpha = mode == "rgb" || mode == "hsl";
        let keys: Vec<char> = if may_have_optional_alpha {
            mode.chars().chain(['a']).collect()
        } else {
            mode.chars().collect()
        };
        let expected = keys.len();

        let mut arguments: Vec<Value> = Vec::with_capacity(expected);
        let mut contains_var = false;
        let mut contains_none = false;
        let mut is_legacy = false;

        for index in 0..expected {
            cursor.consume_whitespace()?;
            let argument = if cursor.comes("var", true) {
                contains_var = true;
                Self::parse_identifier_or_function(cursor, true)?
            } else if !is_legacy && cursor.comes("none", true) {
                contains_none = true;
                Value::Keyword(cursor.parse_identifier(true)?)
            } else {
                Value::Size(Self::parse_size(cursor, true)?)
            };
            arguments.push(argument);
            cursor.consume_whitespace()?;

            let can_close_now = contains_var || (may_have_optional_alpha && index + 2 >= expected);
            if can_close_now && cursor.comes(")", false) {
                break;
            }

            // Comma after the first argument means legacy syntax throughout
            if index == 0 && !contains_none {
                is_legacy = cursor.comes(",", false);
            }

            if is_legacy {
                if index + 1 < expected {
                    cursor.consume_literal(",")?;
                }
            } else if contains_var {
                if cursor.comes("/", false) {
                    cursor.consume_literal("/")?;
                }
            } else if keys.get(index + 1) == Some(&'a') {
                cursor.consume_literal("/")?;
            }
        }
        cursor.consume_literal(")")?;

        if contains_var {
            return Ok(Value::Function(
                CssFunction::new(mode, arguments, ListSeparator::Comma).with_position(position),
            ));
        }
        Ok(Value::Color(
            Color::new(keys.into_iter().zip(arguments))
                .with_legacy_syntax(is_legacy)
                .with_position(position),
        ))
    }

    /// Parse a quoted string, or an unquoted one ending at whitespace or a
    /// bracket (as inside `url()`)
    pub fn parse_string(cursor: &mut Cursor) -> CssResult<CssString> {
        let position = cursor.current_position();
        let location = cursor.location();
        let quote = match cursor.peek_char() {
            Some(q @ ('"' | '\'')) => Some(q),
            _ => None,
        };

        let mut text = String::new();
        match quote {
            Some(quote) => {
                cursor.consume(1)?;
                while cursor.peek_char() != Some(quote) {
                    if cursor.is_end() {
                        return Err(CssError::unexpected_eof(format!("closing `{}`", quote), location));
                    }
                    if let Some(part) = cursor.parse_character(false)? {
                        text.push_str(&part);
                    }
                }
                cursor.consume(1)?;
            }
            None => {
                while let Some(c) = cursor.peek_char() {
                    if c.is_whitespace() || "{}()<>[]".contains(c) {
                        break;
                    }
                    if let Some(part) = cursor.parse_character(false)? {
                        text.push_str(&part);
                    }
                }
            }
        }
        Ok(CssString::new(text).with_position(position))
    }

    /// Parse `url(...)`, or a bare string where a URL is expected
    pub fn parse_url(cursor: &mut Cursor) -> CssResult<Url> {
        let position = cursor.current_position();
        let anchor = cursor.anchor();

        let mut use_url = cursor.comes("url", true);
        if use_url {
            cursor.consume(3)?;
            cursor.consume_whitespace()?;
            if cursor.comes("(", false) {
                cursor.consume(1)?;
            } else {
                anchor.backtrack(cursor);
                use_url = false;
            }
        }

        cursor.consume_whitespace()?;
        let url = Self::parse_string(cursor)?;
        if use_url {
            cursor.consume_whitespace()?;
            cursor.consume_literal(")")?;
        }
        Ok(Url::new(url).with_position(position))
    }

    /// Parse `name(arguments)`
    pub fn parse_function(cursor: &mut Cursor, ignore_case: bool) -> CssResult<CssFunction> {
        let position = cursor.current_position();
        let name = cursor.parse_identifier(ignore_case)?;
        cursor.consume_literal("(")?;
        let (arguments, separator) = Self::parse_arguments(cursor)?;
        cursor.consume_literal(")")?;
        Ok(CssFunction::new(name, arguments, separator).with_position(position))
    }

    /// A parenthesized expression, kept as a function without a name
    fn parse_expression(cursor: &mut Cursor) -> CssResult<CssFunction> {
        let position = cursor.current_position();
        cursor.consume_literal("(")?;
        let (arguments, separator) = Self::parse_arguments(cursor)?;
        cursor.consume_literal(")")?;
        Ok(CssFunction::new("", arguments, separator).with_position(position))
    }

    fn parse_arguments(cursor: &mut Cursor) -> CssResult<(Vec<Value>, ListSeparator)> {
        cursor.consume_whitespace()?;
        if cursor.comes(")", false) {
            return Ok((Vec::new(), ListSeparator::Comma));
        }
        Ok(into_arguments(Self::parse_value(cursor, FUNCTION_ARGUMENT_DELIMITERS)?))
    }

    /// Parse `calc()`, keeping parentheses and operators as tokens.
    ///
    /// `+` and `-` must be surrounded by whitespace.
    pub fn parse_calc(cursor: &mut Cursor) -> CssResult<CalcFunction> {
        let position = cursor.current_position();
        let name = cursor.parse_identifier(true)?;
        if cursor.peek_char() != Some('(') {
            return Err(CssError::unexpected_token("`(`", cursor.peek(5, 0), cursor.location()));
        }
        cursor.consume(1)?;

        let mut tokens = Vec::new();
        let mut nesting = 0usize;
        let mut after_operand = false;
        while !cursor.comes(")", false) || nesting > 0 {
            if cursor.is_end() {
                if nesting == 0 {
                    break;
                }
                return Err(CssError::unexpected_eof("`)`", cursor.location()));
            }
            cursor.consume_whitespace()?;

            if cursor.comes("(", false) {
                nesting += 1;
                cursor.consume(1)?;
                tokens.push(CalcToken::OpenParen);
                cursor.consume_whitespace()?;
                continue;
            }
            if cursor.comes(")", false) {
                nesting = nesting.saturating_sub(1);
                cursor.consume(1)?;
                tokens.push(CalcToken::CloseParen);
                cursor.consume_whitespace()?;
                continue;
            }

            if after_operand {
                let location = cursor.location();
                let operator = match cursor.peek_char() {
                    Some(op @ ('+' | '-' | '*' | '/')) => op,
                    _ => {
                        return Err(CssError::unexpected_token(
                            "a calc operator",
                            cursor.peek(5, 0),
                            location,
                        ))
                    }
                };
                if operator == '+' || operator == '-' {
                    let spaced_before = cursor.peek_char_at(-1).is_some_and(char::is_whitespace);
                    let spaced_after = cursor.peek_char_at(1).is_some_and(char::is_whitespace);
                    if !spaced_before || !spaced_after {
                        return Err(CssError::unexpected_token(
                            format!("` {} `", operator),
                            cursor.peek(3, -1),
                            location,
                        ));
                    }
                }
                cursor.consume(1)?;
                tokens.push(CalcToken::Operator(operator));
                after_operand = false;
            } else {
                tokens.push(CalcToken::Operand(Self::parse_primitive_value(cursor)?));
                after_operand = true;
            }
            cursor.consume_whitespace()?;
        }

        if !cursor.is_end() {
            cursor.consume_literal(")")?;
        }
        Ok(CalcFunction::new(name, tokens).with_position(position))
    }

    /// Parse `[name name]`
    pub fn parse_line_name(cursor: &mut Cursor) -> CssResult<LineName> {
        let position = cursor.current_position();
        cursor.consume_literal("[")?;
        cursor.consume_whitespace()?;

        let mut names = Vec::new();
        loop {
            match cursor.parse_identifier(false) {
                Ok(name) => names.push(name),
                // `[]` is tolerated when lenient
                Err(e) if e.is_recoverable() && cursor.is_lenient() && cursor.comes("]", false) => {}
                Err(e) => return Err(e),
            }
            cursor.consume_whitespace()?;
            if cursor.comes("]", false) {
                break;
            }
        }
        cursor.consume_literal("]")?;
        Ok(LineName::new(names).with_position(position))
    }

    /// `U+0025-00FF`, `U+4??` and friends, kept verbatim
    fn parse_unicode_range(cursor: &mut Cursor) -> CssResult<Value> {
        cursor.consume_literal("U+")?;
        let mut max_length = 6;
        let mut range = String::new();
        loop {
            if cursor.comes("-", false) {
                // two code points and the dash
                max_length = 13;
            }
            range.push_str(&cursor.consume(1)?);
            let continues = cursor
                .peek_char()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '?' || c == '-');
            if range.len() >= max_length || !continues {
                break;
            }
        }
        Ok(Value::Keyword(format!("U+{}", range)))
    }

    /// Old IE `progid:DXImageTransform...(key=value, ...)` filters
    fn parse_microsoft_filter(cursor: &mut Cursor) -> CssResult<CssFunction> {
        let position = cursor.current_position();
        let mut comments = Vec::new();
        let name = cursor.consume_until(&['('], crate::cursor::StopAt::Consume, false, &mut comments)?;
        let arguments = Self::parse_value(cursor, &[ListSeparator::Comma, ListSeparator::Equals])?;
        cursor.consume_literal(")")?;
        let (arguments, separator) = into_arguments(arguments);
        Ok(CssFunction::new(name, arguments, separator).with_position(position))
    }
}

/// Unpack a parsed argument value into a component list and its separator
fn into_arguments(value: Value) -> (Vec<Value>, ListSeparator) {
    match value {
        Value::List(list) => {
            let separator = list.separator();
            (list.components().to_vec(), separator)
        }
        other => (vec![other], ListSeparator::Comma),
    }
}

/// Merge every run of values joined by `delimiter` into one list
fn fold(
    values: Vec<Value>,
    separators: Vec<ListSeparator>,
    delimiter: ListSeparator,
    position: Position,
) -> (Vec<Value>, Vec<ListSeparator>) {
    let mut folded_values = Vec::with_capacity(values.len());
    let mut folded_separators = Vec::with_capacity(separators.len());

    let mut values = values.into_iter();
    let mut group: Vec<Value> = values.next().into_iter().collect();
    for (separator, value) in separators.into_iter().zip(values) {
        if separator == delimiter {
            group.push(value);
        } else {
            folded_values.push(close_group(std::mem::take(&mut group), delimiter, position));
            folded_separators.push(separator);
            group.push(value);
        }
    }
    if !group.is_empty() {
        folded_values.push(close_group(group, delimiter, position));
    }
    (folded_values, folded_separators)
}

fn close_group(mut group: Vec<Value>, delimiter: ListSeparator, position: Position) -> Value {
    if group.len() == 1 {
        if let Some(value) = group.pop() {
            return value;
        }
    }
    Value::List(ValueList::new(group, delimiter).with_position(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{OutputFormat, Render};
    use crate::settings::Settings;

    fn cursor(input: &str) -> Cursor {
        Cursor::new(input, Settings::default(), 1)
    }

    fn strict(input: &str) -> Cursor {
        Cursor::new(input, Settings::default().be_strict(), 1)
    }

    fn render(value: &Value) -> String {
        value.render(&OutputFormat::default()).unwrap()
    }

    fn parse_property(property: &str, input: &str) -> Value {
        let mut c = cursor(input);
        ValueParser::parse_value(&mut c, ValueParser::list_delimiters_for_property(property)).unwrap()
    }

    #[test]
    fn test_font_shorthand_folding() {
        let value = parse_property("font", "bold 12px/1.5 Helvetica, sans-serif");
        let list = value.as_list().unwrap();
        assert_eq!(list.separator(), ListSeparator::Space);
        assert_eq!(list.len(), 3);
        assert_eq!(list.components()[1].as_list().unwrap().separator(), ListSeparator::Slash);
        assert_eq!(list.components()[2].as_list().unwrap().separator(), ListSeparator::Comma);
        assert_eq!(render(&value), "bold 12px/1.5 Helvetica,sans-serif");
    }

    #[test]
    fn test_default_folding_binds_comma_tightest() {
        let value = parse_property("transition", "opacity 1s, transform 2s");
        let list = value.as_list().unwrap();
        assert_eq!(list.separator(), ListSeparator::Space);
        assert_eq!(list.len(), 3);
        assert_eq!(list.components()[1].as_list().unwrap().separator(), ListSeparator::Comma);
        assert_eq!(render(&value), "opacity 1s,transform 2s");
    }

    #[test]
    fn test_src_folding() {
        let value = parse_property("src", "url(a.woff) format(\"woff\"), url(b.ttf)");
        let list = value.as_list().unwrap();
        assert_eq!(list.separator(), ListSeparator::Comma);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_size_units() {
        let mut c = cursor("1.5EM");
        let size = ValueParser::parse_size(&mut c, false).unwrap();
        assert_eq!(size.magnitude(), 1.5);
        assert_eq!(size.unit(), Some("em"));

        let mut c = cursor("-.5vmin");
        let size = ValueParser::parse_size(&mut c, false).unwrap();
        assert_eq!(size.magnitude(), -0.5);
        assert_eq!(size.unit(), Some("vmin"));

        let mut c = cursor("1e3px");
        assert_eq!(ValueParser::parse_size(&mut c, false).unwrap().magnitude(), 1000.0);

        let mut c = cursor("2em");
        assert_eq!(ValueParser::parse_size(&mut c, false).unwrap().unit(), Some("em"));
    }

    #[test]
    fn test_zero_point_five_renders_without_leading_zero() {
        let value = parse_property("opacity", "0.5");
        assert_eq!(render(&value), ".5");
    }

    #[test]
    fn test_hex_colors() {
        let mut c = cursor("#aabbcc");
        let color = ValueParser::parse_color(&mut c).unwrap();
        assert_eq!(render(&color), "#abc");

        let mut c = cursor("#F00");
        let color = ValueParser::parse_color(&mut c).unwrap();
        assert_eq!(color.as_color().unwrap().name(), "rgb");
        assert_eq!(render(&color), "#f00");

        let mut c = cursor("#ff000080");
        let color = ValueParser::parse_color(&mut c).unwrap();
        assert_eq!(render(&color), "rgba(255,0,0,.5)");
    }

    #[test]
    fn test_invalid_hex_length() {
        let mut c = cursor("#abcde");
        assert!(matches!(
            ValueParser::parse_color(&mut c),
            Err(CssError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_color_functions() {
        let mut c = cursor("rgb(0, 118, 0)");
        let color = ValueParser::parse_color(&mut c).unwrap();
        assert_eq!(color.as_color().unwrap().name(), "rgb");
        assert_eq!(render(&color), "#007600");

        let mut c = cursor("rgba(0,0,0,.3)");
        let color = ValueParser::parse_color(&mut c).unwrap();
        assert_eq!(render(&color), "rgba(0,0,0,.3)");

        let mut c = cursor("hsl(120 100% 25% / .5)");
        let color = ValueParser::parse_color(&mut c).unwrap();
        let color = color.as_color().unwrap();
        assert_eq!(color.name(), "hsla");
        assert!(!color.has_legacy_syntax());
    }

    #[test]
    fn test_color_with_none_is_modern() {
        let mut c = cursor("rgb(none 10 20)");
        let color = ValueParser::parse_color(&mut c).unwrap();
        assert_eq!(render(&color), "rgb(none 10 20)");
    }

    #[test]
    fn test_color_with_var_is_a_function() {
        let mut c = cursor("rgba(var(--rgb), .5)");
        let value = ValueParser::parse_color(&mut c).unwrap();
        let function = value.as_function().unwrap();
        assert_eq!(function.name(), "rgba");
        assert_eq!(function.arguments().len(), 2);
        assert_eq!(render(&value), "rgba(var(--rgb),.5)");
    }

    #[test]
    fn test_color_with_empty_arguments_fails() {
        let mut c = cursor("rgb()");
        assert!(ValueParser::parse_color(&mut c).is_err());
    }

    #[test]
    fn test_strings() {
        let mut c = cursor(r#""a\"b" rest"#);
        assert_eq!(ValueParser::parse_string(&mut c).unwrap().text(), "a\"b");

        let mut c = cursor("'x\\41'");
        assert_eq!(ValueParser::parse_string(&mut c).unwrap().text(), "xA");

        let mut c = cursor("\"open");
        assert!(ValueParser::parse_string(&mut c).unwrap_err().is_eof());
    }

    #[test]
    fn test_urls() {
        let mut c = cursor("url( 'a b.png' )");
        let url = ValueParser::parse_url(&mut c).unwrap();
        assert_eq!(url.url().text(), "a b.png");

        let mut c = cursor("url(img/x.png)");
        let url = ValueParser::parse_url(&mut c).unwrap();
        assert_eq!(url.url().text(), "img/x.png");

        let mut c = cursor("\"foo.css\"");
        let url = ValueParser::parse_url(&mut c).unwrap();
        assert_eq!(url.url().text(), "foo.css");
    }

    #[test]
    fn test_functions_and_expressions() {
        let value = parse_property("transform", "translate(10px, -5px) rotate(45deg)");
        assert_eq!(render(&value), "translate(10px,-5px) rotate(45deg)");

        let value = parse_property("width", "(1px)");
        assert_eq!(value.as_function().unwrap().name(), "");
        assert_eq!(render(&value), "(1px)");
    }

    #[test]
    fn test_calc() {
        let value = parse_property("width", "calc(100% - (2 * 10px))");
        assert!(matches!(value, Value::Calc(_)));
        assert_eq!(render(&value), "calc(100% - ( 2 * 10px ))");

        let value = parse_property("width", "-webkit-calc(1px*2)");
        assert_eq!(render(&value), "-webkit-calc(1px * 2)");
    }

    #[test]
    fn test_calc_requires_spaced_minus() {
        let mut c = strict("calc(100% -10px)");
        assert!(matches!(
            ValueParser::parse_value(&mut c, &[ListSeparator::Space]),
            Err(CssError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_line_names() {
        let value = parse_property("grid-template-columns", "[full-start] 1fr [full-end]");
        assert_eq!(render(&value), "[full-start] 1fr [full-end]");

        let mut c = strict("[]");
        assert!(ValueParser::parse_line_name(&mut c).is_err());
        let mut c = cursor("[]");
        assert!(ValueParser::parse_line_name(&mut c).unwrap().names().is_empty());
    }

    #[test]
    fn test_unicode_range() {
        let value = parse_property("unicode-range", "U+0025-00FF, U+4??");
        assert_eq!(render(&value), "U+0025-00FF,U+4??");
    }

    #[test]
    fn test_microsoft_filter() {
        let value = parse_property(
            "filter",
            "progid:DXImageTransform.Microsoft.gradient(startColorstr='#1e5799',GradientType=0)",
        );
        let function = value.as_function().unwrap();
        assert_eq!(function.name(), "progid:DXImageTransform.Microsoft.gradient");
        assert_eq!(
            render(&value),
            "progid:DXImageTransform.Microsoft.gradient(startColorstr=\"#1e5799\",GradientType=0)"
        );
    }

    #[test]
    fn test_stray_operator_is_keyword() {
        let value = parse_property("grid-area", "1 / 3");
        assert_eq!(render(&value), "1/3");
        let value = parse_property("margin", "+ 1px");
        assert_eq!(value.as_list().unwrap().components()[0].as_keyword(), Some("+"));
    }

    #[test]
    fn test_empty_value_fails() {
        let mut c = cursor(";");
        assert!(ValueParser::parse_value(&mut c, &[ListSeparator::Space]).is_err());
    }

    #[test]
    fn test_ie_hack_ends_value() {
        let mut c = cursor("red\\9;");
        let value = ValueParser::parse_value(&mut c, &[ListSeparator::Space]).unwrap();
        assert_eq!(value.as_keyword(), Some("red"));
        assert!(c.comes("\\9", false));
    }
}
