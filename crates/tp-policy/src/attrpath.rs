//! Dotted attribute path resolution and mutation
//!
//! Paths like `identity.type` traverse nested blocks: every segment except
//! the last names a child block type, the last names an attribute. Writes
//! create missing intermediate blocks, so remediation converges instead of
//! rejecting absent structure.

use tp_hcl::{Block, Body, Value};
use tp_schema::{AttrType, BlockSchema};

/// Is the attribute at `path` set in this body?
///
/// Depth 1: the attribute exists with a non-empty expression. Depth >= 2:
/// at least one child block of the head type exists and the remaining path
/// is set in *every* such child, since repeated blocks each need the
/// attribute to be compliant.
pub fn is_set(body: &Body, path: &str) -> bool {
    let (head, rest) = split_head(path);

    match rest {
        None => body
            .get_attribute(head)
            .is_some_and(|attr| !attr.expr.is_empty()),
        Some(rest) => {
            let mut children = body.blocks_of_type(head).peekable();
            if children.peek().is_none() {
                return false;
            }
            children.all(|child| is_set(&child.body, rest))
        }
    }
}

/// Resolve the declared type of the attribute at `path`.
///
/// `None` is the normal "schema does not know this path" result, distinct
/// from a malformed path or a schema source failure.
pub fn resolve_type<'a>(schema: &'a BlockSchema, path: &str) -> Option<&'a AttrType> {
    let (head, rest) = split_head(path);

    match rest {
        None => schema.attributes.get(head),
        Some(rest) => resolve_type(schema.block_types.get(head)?, rest),
    }
}

/// Set the attribute at `path`, creating missing intermediate blocks.
///
/// Existing child blocks of the head type all receive the write; when none
/// exist a new block is appended and the descent continues into it.
pub fn set(body: &mut Body, path: &str, value: &Value) {
    let (head, rest) = split_head(path);

    match rest {
        None => body.set_attribute(head, value),
        Some(rest) => {
            if !body.has_blocks_of_type(head) {
                tracing::debug!(block = head, "creating missing block for remediation");
                body.append_block(Block::new(head));
            }
            for child in body.blocks_of_type_mut(head) {
                set(&mut child.body, rest, value);
            }
        }
    }
}

fn split_head(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}
