//! Hand-written parser for the HCL subset the engine operates on
//!
//! Supports attributes with arbitrary single- or multi-line expressions
//! (brackets and braces balanced, string-literal aware), labeled and
//! unlabeled nested blocks, and `#` / `//` comments. Heredocs are not
//! supported.

use crate::document::{Attribute, Block, Body, Document, Expression};
use crate::error::{Error, Result};

pub fn parse(source: &str) -> Result<Document> {
    let mut parser = Parser::new(source);
    let body = parser.parse_body(false)?;
    tracing::trace!(items = body.items().len(), "parsed document");
    Ok(Document { body })
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn parse_body(&mut self, nested: bool) -> Result<Body> {
        let mut body = Body::new();

        loop {
            self.skip_trivia();

            match self.peek() {
                None => {
                    if nested {
                        return Err(Error::parse(self.line, "unexpected end of input in block"));
                    }
                    return Ok(body);
                }
                Some('}') => {
                    if nested {
                        self.advance();
                        return Ok(body);
                    }
                    return Err(Error::parse(self.line, "unmatched `}`"));
                }
                Some(c) if is_ident_start(c) => {
                    let name = self.read_identifier();
                    self.skip_spaces();

                    if self.peek() == Some('=') {
                        self.advance();
                        let expr = self.read_expression()?;
                        body.push_attribute(name, Expression::raw(expr));
                    } else {
                        let block = self.parse_block(name)?;
                        body.append_block(block);
                    }
                }
                Some(c) => {
                    return Err(Error::parse(self.line, format!("unexpected character `{c}`")));
                }
            }
        }
    }

    fn parse_block(&mut self, type_name: String) -> Result<Block> {
        let mut labels = Vec::new();

        loop {
            self.skip_spaces();
            match self.peek() {
                Some('"') => labels.push(self.read_string()?),
                Some('{') => {
                    self.advance();
                    let body = self.parse_body(true)?;
                    let mut block = Block::with_labels(type_name, labels);
                    block.body = body;
                    return Ok(block);
                }
                Some(c) if is_ident_start(c) => labels.push(self.read_identifier()),
                _ => {
                    return Err(Error::parse(
                        self.line,
                        format!("expected `{{` after block header `{type_name}`"),
                    ));
                }
            }
        }
    }

    /// Read an attribute expression: everything up to the first newline that
    /// is outside strings and balanced brackets.
    fn read_expression(&mut self) -> Result<String> {
        let mut text = String::new();
        let mut depth: i32 = 0;

        loop {
            match self.peek() {
                None => break,
                Some('\n') if depth == 0 => break,
                Some('#') if depth == 0 => break,
                // Enclosing block closes on the same line.
                Some('}') if depth == 0 => break,
                Some('"') => {
                    text.push('"');
                    self.advance();
                    text.push_str(&self.read_string_body()?);
                    text.push('"');
                }
                Some(c) => {
                    if matches!(c, '[' | '{' | '(') {
                        depth += 1;
                    } else if matches!(c, ']' | '}' | ')') {
                        depth -= 1;
                        if depth < 0 {
                            return Err(Error::parse(self.line, "unbalanced expression"));
                        }
                    }
                    text.push(c);
                    self.advance();
                }
            }
        }

        let trimmed = text.trim().to_string();
        Ok(trimmed)
    }

    /// Read a quoted string and return its unescaped content.
    fn read_string(&mut self) -> Result<String> {
        self.advance(); // opening quote
        self.read_string_body()
    }

    /// Read string content up to and including the closing quote. Returns
    /// the content with escape sequences preserved verbatim.
    fn read_string_body(&mut self) -> Result<String> {
        let start_line = self.line;
        let mut content = String::new();

        loop {
            match self.peek() {
                None => return Err(Error::parse(start_line, "unterminated string")),
                Some('"') => {
                    self.advance();
                    return Ok(content);
                }
                Some('\\') => {
                    content.push('\\');
                    self.advance();
                    if let Some(next) = self.peek() {
                        content.push(next);
                        self.advance();
                    }
                }
                Some(c) => {
                    content.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    /// Skip whitespace, newlines, and comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => self.skip_to_eol(),
                Some('/') if self.peek_at(1) == Some('/') => self.skip_to_eol(),
                _ => break,
            }
        }
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.advance();
        }
    }

    fn skip_to_eol(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.peek() == Some('\n') {
            self.line += 1;
        }
        self.pos += 1;
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_attribute_and_block() {
        let doc = parse(
            r#"
resource "azurerm_storage_account" "example" {
  name = "examplestorage"
  tags = {
    env = "prod"
  }

  identity {
    type = "SystemAssigned"
  }
}
"#,
        )
        .unwrap();

        let resource = doc.body.blocks().next().unwrap();
        assert_eq!(resource.type_name, "resource");
        assert_eq!(
            resource.labels,
            vec!["azurerm_storage_account", "example"]
        );
        assert_eq!(
            resource.body.get_attribute("name").unwrap().expr.text(),
            "\"examplestorage\""
        );
        assert!(resource.body.has_blocks_of_type("identity"));
    }

    #[test]
    fn test_multi_line_expression_is_one_attribute() {
        let doc = parse("tags = {\n  env = \"prod\"\n}\nregion = \"weu\"\n").unwrap();
        assert_eq!(doc.body.attributes().count(), 2);
        assert!(
            doc.body
                .get_attribute("tags")
                .unwrap()
                .expr
                .text()
                .contains("env")
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let doc = parse("# leading comment\nname = \"x\" # trailing\n// other\n").unwrap();
        assert_eq!(doc.body.attributes().count(), 1);
        assert_eq!(doc.body.get_attribute("name").unwrap().expr.text(), "\"x\"");
    }

    #[test]
    fn test_string_with_braces_does_not_confuse_nesting() {
        let doc = parse("value = \"${var.name}-suffix\"\n").unwrap();
        assert_eq!(
            doc.body.get_attribute("value").unwrap().expr.text(),
            "\"${var.name}-suffix\""
        );
    }

    #[test]
    fn test_unterminated_block_is_an_error() {
        let err = parse("resource \"a\" \"b\" {\n name = 1\n").unwrap_err();
        assert!(err.to_string().contains("unexpected end of input"));
    }

    #[test]
    fn test_unmatched_close_brace_is_an_error() {
        assert!(parse("}\n").is_err());
    }

    #[test]
    fn test_single_line_block() {
        let doc = parse("identity { type = \"SystemAssigned\" }\n").unwrap();
        let identity = doc.body.blocks().next().unwrap();
        assert_eq!(
            identity.body.get_attribute("type").unwrap().expr.text(),
            "\"SystemAssigned\""
        );
    }

    #[test]
    fn test_unlabeled_nested_block() {
        let doc = parse("provider \"azurerm\" {\n  features {}\n}\n").unwrap();
        let provider = doc.body.blocks().next().unwrap();
        assert!(provider.body.has_blocks_of_type("features"));
    }
}
