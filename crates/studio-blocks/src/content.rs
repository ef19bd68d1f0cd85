//! Block/content accessor
//!
//! The host stores a block as a JSON document keyed by namespaced block
//! name:
//!
//! ```json
//! {
//!     "block-studio/hero": {
//!         "name": "block-studio/hero",
//!         "title": "Hero",
//!         "fields": {
//!             "heading": {"name": "heading", "control": "text", "order": 0}
//!         }
//!     }
//! }
//! ```
//!
//! The document holds exactly one entry relevant to an editing session.

use serde_json::Value;

use crate::block::Block;
use crate::error::{Error, Result};

/// Read the block out of the document content.
///
/// Returns `Ok(None)` when there is no block yet: empty content, `null`, or
/// an empty object. Content that cannot be parsed, or whose block entry has
/// the wrong shape, is an error so callers can tell "no block yet" from
/// "corrupt data".
///
/// A block stored without a `name` takes its document key as name.
pub fn read_block(content: &str) -> Result<Option<Block>> {
    if content.trim().is_empty() {
        return Ok(None);
    }

    let document: Value =
        serde_json::from_str(content).map_err(|e| Error::malformed(e.to_string()))?;

    let entries = match document {
        Value::Null => return Ok(None),
        Value::Object(entries) => entries,
        other => {
            return Err(Error::malformed(format!(
                "expected an object keyed by block name, got {}",
                kind(&other)
            )));
        }
    };

    if entries.len() > 1 {
        tracing::warn!(
            entries = entries.len(),
            "Content holds more than one block; using the first"
        );
    }

    let Some((key, value)) = entries.into_iter().next() else {
        return Ok(None);
    };

    let mut block: Block = serde_json::from_value(value).map_err(|e| Error::InvalidBlock {
        name: key.clone(),
        message: e.to_string(),
    })?;

    if block.name.is_empty() {
        block.name = key;
    }

    Ok(Some(block))
}

/// Read the block, collapsing both "no block yet" and malformed content
/// into an empty block.
pub fn read_block_or_default(content: &str) -> Block {
    match read_block(content) {
        Ok(block) => block.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Discarding unreadable block content: {}", e);
            Block::default()
        }
    }
}

/// Serialize a block into document content.
///
/// The block's name becomes the document key, so it must not be empty.
pub fn write_block(block: &Block) -> Result<String> {
    if block.name.is_empty() {
        return Err(Error::InvalidBlock {
            name: String::new(),
            message: "cannot write a block without a name".to_string(),
        });
    }

    let mut document = serde_json::Map::new();
    document.insert(block.name.clone(), serde_json::to_value(block)?);
    Ok(serde_json::to_string(&Value::Object(document))?)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
