use crate::error::CssResult;
use crate::format::{OutputFormat, Render};
use crate::position::{Position, Positioned};

/// A quoted string. The stored text has escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssString {
    text: String,
    position: Option<Position>,
}

impl CssString {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), position: None }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Positioned for CssString {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for CssString {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        let quote = format.string_quote();
        let mut result = String::with_capacity(self.text.len() + 2);
        result.push(quote);
        for c in self.text.chars() {
            match c {
                '\\' | '"' | '\'' => {
                    result.push('\\');
                    result.push(c);
                }
                '\0' => result.push_str("\\0"),
                '\n' => result.push_str("\\A "),
                _ => result.push(c),
            }
        }
        result.push(quote);
        Ok(result)
    }
}

/// `url(...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    url: CssString,
    position: Option<Position>,
}

impl Url {
    pub fn new(url: CssString) -> Self {
        Self { url, position: None }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn url(&self) -> &CssString {
        &self.url
    }

    pub fn set_url(&mut self, url: CssString) {
        self.url = url;
    }
}

impl Positioned for Url {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Render for Url {
    fn render(&self, format: &OutputFormat) -> CssResult<String> {
        Ok(format!("url({})", self.url.render(format)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::settings::Settings;
    use crate::value::ValueParser;

    #[test]
    fn test_string_escapes() {
        let format = OutputFormat::default();
        let s = CssString::new("say \"hi\"\nback\\slash");
        assert_eq!(s.render(&format).unwrap(), r#""say \"hi\"\A back\\slash""#);
    }

    #[test]
    fn test_newline_escape_ends_before_hex_digit() {
        let format = OutputFormat::default();
        let rendered = CssString::new("\n1").render(&format).unwrap();
        assert_eq!(rendered, r#""\A 1""#);

        let mut cursor = Cursor::new(&rendered, Settings::default(), 1);
        let reparsed = ValueParser::parse_string(&mut cursor).unwrap();
        assert_eq!(reparsed.text(), "\n1");
    }

    #[test]
    fn test_string_quote_setting() {
        let format = OutputFormat::default().with_string_quote('\'');
        assert_eq!(CssString::new("it's").render(&format).unwrap(), r"'it\'s'");
    }

    #[test]
    fn test_url_render() {
        let format = OutputFormat::default();
        let url = Url::new(CssString::new("a.png"));
        assert_eq!(url.render(&format).unwrap(), "url(\"a.png\")");
    }
}
