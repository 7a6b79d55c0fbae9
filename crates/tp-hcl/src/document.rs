//! Document, block, and attribute model

use crate::error::Result;
use crate::parser;
use crate::value::Value;
use crate::writer;

/// An attribute's value expression, kept as raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    text: String,
}

impl Expression {
    pub fn raw(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            text: value.to_expression(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the expression carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A named attribute inside a block body.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub expr: Expression,
}

/// One entry of a block body, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Attribute(Attribute),
    Block(Block),
}

/// An ordered collection of attributes and nested blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    items: Vec<Item>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter().filter_map(|item| match item {
            Item::Attribute(attr) => Some(attr),
            Item::Block(_) => None,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.items.iter().filter_map(|item| match item {
            Item::Block(block) => Some(block),
            Item::Attribute(_) => None,
        })
    }

    pub fn blocks_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.items.iter_mut().filter_map(|item| match item {
            Item::Block(block) => Some(block),
            Item::Attribute(_) => None,
        })
    }

    pub fn blocks_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Block> {
        self.blocks().filter(move |b| b.type_name == type_name)
    }

    pub fn blocks_of_type_mut<'a>(
        &'a mut self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a mut Block> {
        self.blocks_mut().filter(move |b| b.type_name == type_name)
    }

    pub fn has_blocks_of_type(&self, type_name: &str) -> bool {
        self.blocks_of_type(type_name).next().is_some()
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().find(|a| a.name == name)
    }

    /// Set an attribute, replacing the expression of an existing one or
    /// appending a new attribute at the end of the body.
    pub fn set_attribute(&mut self, name: &str, value: &Value) {
        let expr = Expression::from_value(value);
        for item in &mut self.items {
            if let Item::Attribute(attr) = item
                && attr.name == name
            {
                attr.expr = expr;
                return;
            }
        }
        self.items.push(Item::Attribute(Attribute {
            name: name.to_string(),
            expr,
        }));
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, expr: Expression) {
        self.items.push(Item::Attribute(Attribute {
            name: name.into(),
            expr,
        }));
    }

    /// Append a nested block and return a mutable reference to it.
    pub fn append_block(&mut self, block: Block) -> &mut Block {
        self.items.push(Item::Block(block));
        match self.items.last_mut() {
            Some(Item::Block(block)) => block,
            _ => unreachable!("block was just pushed"),
        }
    }
}

/// A block with a type name, optional labels, and a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub type_name: String,
    pub labels: Vec<String>,
    pub body: Body,
}

impl Block {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            labels: Vec::new(),
            body: Body::new(),
        }
    }

    pub fn with_labels(type_name: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            type_name: type_name.into(),
            labels,
            body: Body::new(),
        }
    }

    /// The first label, which for `resource` blocks names the resource type.
    pub fn first_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub body: Body,
}

impl Document {
    /// Parse HCL text into a document tree.
    pub fn parse(source: &str) -> Result<Self> {
        parser::parse(source)
    }

    /// Serialize the tree back to HCL text.
    pub fn to_text(&self) -> String {
        writer::render(self)
    }
}
