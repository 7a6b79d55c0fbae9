//! Per-provider resource schemas parsed from `terraform providers schema -json`

use crate::error::{Error, Result};
use crate::types::AttrType;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The schema of one block: its attributes and its nested block types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockSchema {
    pub attributes: BTreeMap<String, AttrType>,
    pub block_types: BTreeMap<String, BlockSchema>,
}

/// All resource schemas published by one provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderSchema {
    resources: BTreeMap<String, BlockSchema>,
}

impl ProviderSchema {
    pub fn new(resources: BTreeMap<String, BlockSchema>) -> Self {
        Self { resources }
    }

    /// Look up the schema of a resource type. `None` means the provider does
    /// not (yet) publish this type, which is a recoverable condition.
    pub fn resource(&self, resource_type: &str) -> Option<&BlockSchema> {
        self.resources.get(resource_type)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

// Wire shape of `terraform providers schema -json`.

#[derive(Deserialize)]
struct SchemasDocument {
    #[serde(default)]
    provider_schemas: BTreeMap<String, ProviderEntry>,
}

#[derive(Deserialize)]
struct ProviderEntry {
    #[serde(default)]
    resource_schemas: BTreeMap<String, ResourceEntry>,
}

#[derive(Deserialize)]
struct ResourceEntry {
    block: RawBlock,
}

#[derive(Deserialize, Default)]
struct RawBlock {
    #[serde(default)]
    attributes: BTreeMap<String, RawAttribute>,
    #[serde(default)]
    block_types: BTreeMap<String, RawBlockType>,
}

#[derive(Deserialize)]
struct RawAttribute {
    /// Absent for attributes declared via `nested_type`, which this engine
    /// does not resolve.
    #[serde(rename = "type")]
    attr_type: Option<AttrType>,
}

#[derive(Deserialize)]
struct RawBlockType {
    block: RawBlock,
}

/// Parse the JSON document emitted by the schema authority, keeping only the
/// schemas of the named provider.
///
/// Provider keys in the document are full registry addresses
/// (`registry.terraform.io/hashicorp/azurerm`); matching is on the final
/// path segment.
pub fn parse_provider_schemas(json: &str, provider: &str) -> Result<ProviderSchema> {
    let document: SchemasDocument = serde_json::from_str(json)?;

    let entry = document
        .provider_schemas
        .iter()
        .find(|(address, _)| address.rsplit('/').next() == Some(provider))
        .map(|(_, entry)| entry)
        .ok_or_else(|| Error::ProviderNotInOutput {
            provider: provider.to_string(),
        })?;

    let resources = entry
        .resource_schemas
        .iter()
        .map(|(name, resource)| (name.clone(), convert_block(&resource.block)))
        .collect();

    Ok(ProviderSchema::new(resources))
}

fn convert_block(raw: &RawBlock) -> BlockSchema {
    let attributes = raw
        .attributes
        .iter()
        .filter_map(|(name, attr)| {
            attr.attr_type
                .as_ref()
                .map(|ty| (name.clone(), ty.clone()))
        })
        .collect();

    let block_types = raw
        .block_types
        .iter()
        .map(|(name, nested)| (name.clone(), convert_block(&nested.block)))
        .collect();

    BlockSchema {
        attributes,
        block_types,
    }
}
