//! # API Access Check Tests
//!
//! Warnings produced when the caller cannot list the RBAC objects the report
//! is built from.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use who_can::cluster::{check_api_access, AccessChecker, NamespaceLister};

type Permission = (&'static str, &'static str, Option<&'static str>);

/// Answers access reviews from a fixed table and records the order of checks
#[derive(Default)]
struct FakeAccessChecker {
    permissions: HashMap<(String, String, Option<String>), bool>,
    checked: Mutex<Vec<(String, String, Option<String>)>>,
}

impl FakeAccessChecker {
    fn with(permissions: &[(Permission, bool)]) -> Self {
        Self {
            permissions: permissions
                .iter()
                .map(|((verb, resource, ns), allowed)| {
                    (
                        (verb.to_string(), resource.to_string(), ns.map(ToString::to_string)),
                        *allowed,
                    )
                })
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AccessChecker for FakeAccessChecker {
    async fn is_allowed_to(
        &self,
        verb: &str,
        resource: &str,
        namespace: Option<&str>,
    ) -> Result<bool, kube::Error> {
        let key = (
            verb.to_string(),
            resource.to_string(),
            namespace.map(ToString::to_string),
        );
        self.checked.lock().unwrap().push(key.clone());
        self.permissions
            .get(&key)
            .copied()
            .ok_or_else(|| kube::Error::Service(format!("unexpected check {key:?}").into()))
    }
}

struct FakeNamespaces(Vec<&'static str>);

#[async_trait]
impl NamespaceLister for FakeNamespaces {
    async fn list_namespaces(&self) -> Result<Vec<String>, kube::Error> {
        Ok(self.0.iter().map(ToString::to_string).collect())
    }
}

#[tokio::test]
async fn test_all_namespaces_checks_every_namespace() {
    let checker = FakeAccessChecker::with(&[
        (("list", "namespaces", None), false),
        (("list", "roles", Some("foo")), true),
        (("list", "rolebindings", Some("foo")), true),
        (("list", "roles", Some("bar")), false),
        (("list", "rolebindings", Some("bar")), false),
    ]);
    let namespaces = FakeNamespaces(vec!["foo", "bar"]);

    let warnings = check_api_access(&checker, &namespaces, None).await.unwrap();

    assert_eq!(
        warnings,
        vec![
            "The user is not allowed to list namespaces",
            "The user is not allowed to list roles in the bar namespace",
            "The user is not allowed to list rolebindings in the bar namespace",
        ]
    );
    assert_eq!(checker.checked.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn test_single_namespace_checks_only_that_namespace() {
    let checker = FakeAccessChecker::with(&[
        (("list", "roles", Some("foo")), true),
        (("list", "rolebindings", Some("foo")), false),
    ]);
    let namespaces = FakeNamespaces(vec!["foo", "bar"]);

    let warnings = check_api_access(&checker, &namespaces, Some("foo"))
        .await
        .unwrap();

    assert_eq!(
        warnings,
        vec!["The user is not allowed to list rolebindings in the foo namespace"]
    );
    assert_eq!(
        *checker.checked.lock().unwrap(),
        vec![
            ("list".to_string(), "roles".to_string(), Some("foo".to_string())),
            (
                "list".to_string(),
                "rolebindings".to_string(),
                Some("foo".to_string())
            ),
        ]
    );
}

#[tokio::test]
async fn test_no_warnings_when_everything_is_allowed() {
    let checker = FakeAccessChecker::with(&[
        (("list", "roles", Some("foo")), true),
        (("list", "rolebindings", Some("foo")), true),
    ]);

    let warnings = check_api_access(&checker, &FakeNamespaces(vec![]), Some("foo"))
        .await
        .unwrap();

    assert!(warnings.is_empty());
}

#[tokio::test]
async fn test_access_review_failure_is_an_error() {
    let checker = FakeAccessChecker::default();

    let err = check_api_access(&checker, &FakeNamespaces(vec![]), Some("foo"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("unexpected check"));
}
