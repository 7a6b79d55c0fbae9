//! Serialization of a document tree back to HCL text

use crate::document::{Body, Document, Item};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render a document with canonical two-space indentation. Attribute
/// expressions are emitted verbatim, so untouched values keep their
/// original text.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    render_body(&mut out, &document.body, 0);
    out
}

fn render_body(out: &mut String, body: &Body, level: usize) {
    let mut previous_was_block = false;

    for (index, item) in body.items().iter().enumerate() {
        match item {
            Item::Attribute(attr) => {
                if previous_was_block {
                    out.push('\n');
                }
                indent(out, level);
                let _ = writeln!(out, "{} = {}", attr.name, reindent(attr.expr.text(), level));
                previous_was_block = false;
            }
            Item::Block(block) => {
                if index > 0 {
                    out.push('\n');
                }
                indent(out, level);
                out.push_str(&block.type_name);
                for label in &block.labels {
                    let _ = write!(out, " \"{label}\"");
                }
                if block.body.items().is_empty() {
                    out.push_str(" {}\n");
                } else {
                    out.push_str(" {\n");
                    render_body(out, &block.body, level + 1);
                    indent(out, level);
                    out.push_str("}\n");
                }
                previous_was_block = true;
            }
        }
    }
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

/// Re-indent the continuation lines of a multi-line expression to the
/// current nesting level, preserving their relative indentation.
fn reindent(expr: &str, level: usize) -> String {
    if !expr.contains('\n') {
        return expr.to_string();
    }

    let continuation: Vec<&str> = expr.lines().skip(1).collect();
    let common = continuation
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut result = expr.lines().next().unwrap_or_default().to_string();
    for line in continuation {
        result.push('\n');
        for _ in 0..level {
            result.push_str(INDENT);
        }
        result.push_str(if line.len() >= common { &line[common..] } else { line });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_renders_resource_block() {
        let doc = Document::parse(
            "resource \"azurerm_storage_account\" \"example\" {\n  name = \"store\"\n}\n",
        )
        .unwrap();

        assert_eq!(
            render(&doc),
            "resource \"azurerm_storage_account\" \"example\" {\n  name = \"store\"\n}\n"
        );
    }

    #[test]
    fn test_blocks_are_separated_by_blank_lines() {
        let doc =
            Document::parse("provider \"azurerm\" {\n  features {}\n}\nresource \"a\" \"b\" {}\n")
                .unwrap();

        assert_eq!(
            render(&doc),
            "provider \"azurerm\" {\n  features {}\n}\n\nresource \"a\" \"b\" {}\n"
        );
    }

    #[test]
    fn test_parse_render_is_stable() {
        let source = "resource \"x\" \"y\" {\n  count = 2\n\n  identity {\n    type = \"SystemAssigned\"\n  }\n}\n";
        let doc = Document::parse(source).unwrap();
        let rendered = render(&doc);
        let reparsed = Document::parse(&rendered).unwrap();
        assert_eq!(doc, reparsed);
    }
}
