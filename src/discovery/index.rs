//! # Resource Index
//!
//! Lookup table from resource names and short names to the descriptor the
//! cluster advertises for them.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;
use std::collections::HashMap;

/// The parts of a discovered `APIResource` the resolver and mapper care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResourceDescriptor {
    /// Canonical plural name (`pods`, `persistentvolumes`, `pods/log`)
    pub name: String,
    pub short_names: Vec<String>,
    pub verbs: Vec<String>,
    pub singular_name: String,
    pub kind: String,
}

impl ApiResourceDescriptor {
    pub fn supports_verb(&self, verb: &str) -> bool {
        self.verbs.iter().any(|v| v == verb)
    }

    /// Sub-resources are advertised as `<parent>/<sub>`
    pub fn is_sub_resource(&self) -> bool {
        self.name.contains('/')
    }
}

impl From<&APIResource> for ApiResourceDescriptor {
    fn from(resource: &APIResource) -> Self {
        Self {
            name: resource.name.clone(),
            short_names: resource.short_names.clone().unwrap_or_default(),
            verbs: resource.verbs.clone(),
            singular_name: resource.singular_name.clone(),
            kind: resource.kind.clone(),
        }
    }
}

/// Immutable index built from one discovery snapshot
///
/// Keys are plural names, short names and `<parent>/<sub>` names. When two
/// preferred group versions advertise the same key, the later group wins,
/// matching discovery order.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    resources: HashMap<String, ApiResourceDescriptor>,
}

impl ResourceIndex {
    pub fn new<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = ApiResourceDescriptor>,
    {
        let mut resources = HashMap::new();
        for descriptor in descriptors {
            for short_name in &descriptor.short_names {
                resources.insert(short_name.clone(), descriptor.clone());
            }
            resources.insert(descriptor.name.clone(), descriptor);
        }
        Self { resources }
    }

    pub fn get(&self, key: &str) -> Option<&ApiResourceDescriptor> {
        self.resources.get(key)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, short_names: &[&str], verbs: &[&str]) -> ApiResourceDescriptor {
        ApiResourceDescriptor {
            name: name.to_string(),
            short_names: short_names.iter().map(ToString::to_string).collect(),
            verbs: verbs.iter().map(ToString::to_string).collect(),
            singular_name: String::new(),
            kind: String::new(),
        }
    }

    #[test]
    fn test_index_keys_plural_and_short_names() {
        let index = ResourceIndex::new(vec![descriptor(
            "persistentvolumes",
            &["pv"],
            &["get", "list", "delete"],
        )]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("pv").map(|d| d.name.as_str()), Some("persistentvolumes"));
        assert_eq!(
            index.get("persistentvolumes").map(|d| d.name.as_str()),
            Some("persistentvolumes")
        );
        assert!(index.get("pvc").is_none());
    }

    #[test]
    fn test_index_keys_sub_resources_by_full_name() {
        let index = ResourceIndex::new(vec![
            descriptor("pods", &["po"], &["get", "list"]),
            descriptor("pods/log", &[], &["get"]),
        ]);

        let log = index.get("pods/log").expect("pods/log should be indexed");
        assert!(log.is_sub_resource());
        assert!(log.supports_verb("get"));
        assert!(!log.supports_verb("list"));
    }

    #[test]
    fn test_descriptor_from_api_resource() {
        let resource = APIResource {
            name: "deployments".to_string(),
            short_names: Some(vec!["deploy".to_string()]),
            verbs: vec!["get".to_string()],
            singular_name: "deployment".to_string(),
            kind: "Deployment".to_string(),
            ..Default::default()
        };

        let descriptor = ApiResourceDescriptor::from(&resource);
        assert_eq!(descriptor.short_names, vec!["deploy".to_string()]);
        assert_eq!(descriptor.kind, "Deployment");
        assert!(!descriptor.is_sub_resource());
    }
}
