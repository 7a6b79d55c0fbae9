//! Supported provider gate

/// Providers this engine performs schema lookups for.
pub const SUPPORTED_PROVIDERS: &[&str] = &["azurerm"];

/// Extract the provider name from a resource type, e.g. `azurerm` from
/// `azurerm_storage_account`. Returns `None` when the type has no provider
/// prefix.
pub fn extract_provider_name(resource_type: &str) -> Option<&str> {
    let (provider, rest) = resource_type.split_once('_')?;
    if provider.is_empty() || rest.is_empty() {
        return None;
    }
    Some(provider)
}

/// The provider responsible for a resource type, if it is one this engine
/// supports schema discovery for.
pub fn supported_provider_for(resource_type: &str) -> Option<&str> {
    extract_provider_name(resource_type).filter(|p| SUPPORTED_PROVIDERS.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_provider_prefix() {
        assert_eq!(
            extract_provider_name("azurerm_storage_account"),
            Some("azurerm")
        );
        assert_eq!(extract_provider_name("noprefix"), None);
        assert_eq!(extract_provider_name("_leading"), None);
    }

    #[test]
    fn test_supported_provider_gate() {
        assert_eq!(
            supported_provider_for("azurerm_storage_account"),
            Some("azurerm")
        );
        assert_eq!(supported_provider_for("aws_s3_bucket"), None);
    }
}
