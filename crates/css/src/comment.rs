//! CSS comments kept alongside the nodes they precede

use crate::position::{Position, Positioned};

/// A `/* ... */` comment. `text` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    text: String,
    position: Option<Position>,
}

impl Comment {
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

    pub fn to_css(&self) -> String {
        format!("/*{}*/", self.text)
    }
}

impl Positioned for Comment {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

/// A node that carries leading comments
pub trait Commentable {
    fn comments(&self) -> &[Comment];

    fn comments_mut(&mut self) -> &mut Vec<Comment>;

    fn add_comments(&mut self, comments: impl IntoIterator<Item = Comment>) {
        self.comments_mut().extend(comments);
    }

    fn set_comments(&mut self, comments: Vec<Comment>) {
        *self.comments_mut() = comments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_renders_delimiters() {
        let comment = Comment::new(" hello ");
        assert_eq!(comment.to_css(), "/* hello */");
    }
}
