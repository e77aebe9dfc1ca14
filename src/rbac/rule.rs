//! # Policy Rule Matcher
//!
//! Decides whether a single RBAC `PolicyRule` grants a requested action.

use crate::constants::{NON_RESOURCE_ALL, RESOURCE_ALL, VERB_ALL};
use k8s_openapi::api::rbac::v1::PolicyRule;

/// The access being asked about
///
/// An action targets either a resource (optionally a single named object)
/// or a non-resource URL, never both. Empty strings are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub verb: String,
    pub resource: String,
    pub resource_name: Option<String>,
    pub non_resource_url: Option<String>,
}

impl Action {
    /// Action on a resource, or on one named object of that resource
    pub fn resource(
        verb: impl Into<String>,
        resource: impl Into<String>,
        resource_name: Option<String>,
    ) -> Self {
        Self {
            verb: verb.into(),
            resource: resource.into(),
            resource_name: resource_name.filter(|name| !name.is_empty()),
            non_resource_url: None,
        }
    }

    /// Action on a non-resource URL such as `/healthz`
    pub fn non_resource(verb: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            verb: verb.into(),
            resource: String::new(),
            resource_name: None,
            non_resource_url: Some(url).filter(|url| !url.is_empty()),
        }
    }

    pub fn is_non_resource(&self) -> bool {
        self.non_resource_url.is_some()
    }

    /// What the action targets, as shown to users: `pods`, `pods/my-pod`
    /// or `/healthz`
    pub fn target(&self) -> String {
        match (&self.non_resource_url, &self.resource_name) {
            (Some(url), _) => url.clone(),
            (None, Some(name)) => format!("{}/{name}", self.resource),
            (None, None) => self.resource.clone(),
        }
    }

    /// Whether `rule` grants this action
    pub fn matches(&self, rule: &PolicyRule) -> bool {
        policy_rule_matches(rule, self)
    }
}

/// Exact membership, with `wildcard` matching any value
fn contains_or_wildcard(values: &[String], value: &str, wildcard: &str) -> bool {
    values.iter().any(|v| v == wildcard || v == value)
}

/// Whether `rule` grants `action`
///
/// Non-resource URL actions only consider verbs and non-resource URLs.
/// Resource actions consider verbs, resources and resource names; an empty
/// `resourceNames` list leaves the rule unrestricted, while a non-empty one
/// requires the action to name one of the listed objects.
pub fn policy_rule_matches(rule: &PolicyRule, action: &Action) -> bool {
    if !contains_or_wildcard(&rule.verbs, &action.verb, VERB_ALL) {
        return false;
    }

    if let Some(url) = &action.non_resource_url {
        let urls = rule.non_resource_urls.as_deref().unwrap_or_default();
        return contains_or_wildcard(urls, url, NON_RESOURCE_ALL);
    }

    let resources = rule.resources.as_deref().unwrap_or_default();
    if !contains_or_wildcard(resources, &action.resource, RESOURCE_ALL) {
        return false;
    }

    let resource_names = rule.resource_names.as_deref().unwrap_or_default();
    if resource_names.is_empty() {
        return true;
    }
    action
        .resource_name
        .as_ref()
        .is_some_and(|name| resource_names.contains(name))
}
