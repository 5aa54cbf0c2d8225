use std::collections::HashMap;

use super::descriptor::{Provider, ProviderDescriptor};

/// Registry of available OAuth providers, keyed by provider ID.
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Provider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider from its descriptor.
    pub fn register(&mut self, descriptor: ProviderDescriptor) {
        self.providers.insert(descriptor.id, Provider::new(descriptor));
    }

    /// Get a provider by ID.
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.get(id)
    }

    /// List all registered provider IDs.
    pub fn list(&self) -> Vec<&str> {
        self.providers.keys().copied().collect()
    }

    /// Number of registered providers.
    pub fn count(&self) -> usize {
        self.providers.len()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::with_defaults;

    #[test]
    fn default_registry_knows_both_platforms() {
        let registry = with_defaults();
        assert_eq!(registry.count(), 2);
        assert!(registry.get("instagram").is_some());
        assert!(registry.get("youtube").is_some());
        assert!(registry.get("myspace").is_none());
    }
}
