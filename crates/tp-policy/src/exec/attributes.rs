//! Resource attribute compliance executor

use crate::attrpath;
use crate::error::Result;
use crate::model::{AttributeStrategy, AttributesPolicyParams, ExecutionFlags, Outcome};
use std::path::Path;
use tp_hcl::Document;
use tp_schema::{AttrType, SchemaCache, coerce, supported_provider_for};

/// Shared state handed to every resource rule execution within one file.
pub struct ResourceContext<'a> {
    pub working_dir: &'a Path,
    pub flags: ExecutionFlags,
    pub schemas: &'a SchemaCache,
}

/// Evaluate an `attributes_policy` rule against every block in a document.
///
/// Mutates the document as a side effect of returning `Remediate`. A `Fail`
/// short-circuits the whole rule since there is a single aggregate result
/// per (file, rule) pair.
pub fn execute_attributes_policy(
    params: &AttributesPolicyParams,
    document: &mut Document,
    ctx: &ResourceContext<'_>,
) -> Result<Outcome> {
    let mut outcome = Outcome::Success;

    for block in document.body.blocks_mut() {
        if block.type_name != "resource" {
            tracing::debug!(block = %block.type_name, "skipping non-resource block");
            continue;
        }
        let Some(resource_type) = block.first_label().map(str::to_string) else {
            continue;
        };
        if resource_type != params.resource {
            tracing::debug!(resource = %resource_type, "resource not affected by policy");
            continue;
        }

        let attribute_is_set = attrpath::is_set(&block.body, &params.attribute);

        match params.strategy {
            AttributeStrategy::SetIfMissing if attribute_is_set => {
                tracing::debug!(
                    attribute = %params.attribute,
                    "attribute already set, skipping due to strategy"
                );
                continue;
            }
            AttributeStrategy::FailIfSet if attribute_is_set => {
                return Ok(Outcome::fail("Attribute non conformant"));
            }
            AttributeStrategy::FailIfMissing if !attribute_is_set => {
                return Ok(Outcome::fail("Attribute non conformant"));
            }
            _ => {}
        }

        match declared_type(&resource_type, params, ctx)? {
            Some(attr_type) => {
                let value = coerce(&params.value, &attr_type)?;
                tracing::info!(
                    resource = %resource_type,
                    attribute = %params.attribute,
                    "setting attribute"
                );
                attrpath::set(&mut block.body, &params.attribute, &value);
                outcome = Outcome::Remediate;
            }
            None => {
                if ctx.flags.strict {
                    return Ok(Outcome::fail("Schema failure"));
                }
                tracing::warn!(
                    resource = %resource_type,
                    attribute = %params.attribute,
                    "schema unavailable for attribute, skipping (strict mode off)"
                );
            }
        }
    }

    Ok(outcome)
}

/// Resolve the declared type of the target attribute.
///
/// `Ok(None)` covers every recoverable gap: unsupported provider, resource
/// type absent from the schema, attribute path unknown. Source failures
/// propagate as errors.
fn declared_type(
    resource_type: &str,
    params: &AttributesPolicyParams,
    ctx: &ResourceContext<'_>,
) -> Result<Option<AttrType>> {
    let Some(provider) = supported_provider_for(resource_type) else {
        tracing::warn!(resource = %resource_type, "resource provider not supported");
        return Ok(None);
    };

    let schema = ctx.schemas.get(provider, ctx.working_dir)?;
    let Some(block_schema) = schema.resource(resource_type) else {
        tracing::warn!(resource = %resource_type, "resource type not yet in schema");
        return Ok(None);
    };

    Ok(attrpath::resolve_type(block_schema, &params.attribute).cloned())
}
