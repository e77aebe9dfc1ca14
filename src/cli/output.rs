//! # Report Output
//!
//! Renders granting bindings as tab-aligned tables, plus the warning banner
//! for missing list permissions.

use crate::constants::TABLE_PADDING;
use crate::rbac::{Action, GrantingBindings};
use k8s_openapi::api::rbac::v1::Subject;
use std::io::{self, Write};

/// Print the "might not be complete" banner; prints nothing without warnings
pub fn print_api_access_warnings<W: Write>(out: &mut W, warnings: &[String]) -> io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "Warning: The list might not be complete due to missing permission(s):"
    )?;
    for warning in warnings {
        writeln!(out, "\t{warning}")?;
    }
    writeln!(out)
}

/// Print the RoleBindings and ClusterRoleBindings granting `action`
///
/// RoleBindings are skipped for non-resource URLs, which can only be granted
/// cluster-wide.
pub fn print_bindings<W: Write>(
    out: &mut W,
    action: &Action,
    bindings: &GrantingBindings,
) -> io::Result<()> {
    if !action.is_non_resource() {
        print_role_bindings(out, action, bindings)?;
        writeln!(out)?;
    }
    print_cluster_role_bindings(out, action, bindings)
}

fn print_role_bindings<W: Write>(
    out: &mut W,
    action: &Action,
    bindings: &GrantingBindings,
) -> io::Result<()> {
    if bindings.role_bindings.is_empty() {
        return no_subjects(out, action, "RoleBindings");
    }

    let mut rows = vec![row(&["ROLEBINDING", "NAMESPACE", "SUBJECT", "TYPE", "SA-NAMESPACE"])];
    for binding in &bindings.role_bindings {
        let name = binding.metadata.name.as_deref().unwrap_or_default();
        let namespace = binding.metadata.namespace.as_deref().unwrap_or_default();
        for subject in subjects(binding.subjects.as_deref()) {
            rows.push(row(&[
                name,
                namespace,
                &subject.name,
                &subject.kind,
                subject.namespace.as_deref().unwrap_or_default(),
            ]));
        }
    }
    write_table(out, &rows)
}

fn print_cluster_role_bindings<W: Write>(
    out: &mut W,
    action: &Action,
    bindings: &GrantingBindings,
) -> io::Result<()> {
    if bindings.cluster_role_bindings.is_empty() {
        return no_subjects(out, action, "ClusterRoleBindings");
    }

    let mut rows = vec![row(&["CLUSTERROLEBINDING", "SUBJECT", "TYPE", "SA-NAMESPACE"])];
    for binding in &bindings.cluster_role_bindings {
        let name = binding.metadata.name.as_deref().unwrap_or_default();
        for subject in subjects(binding.subjects.as_deref()) {
            rows.push(row(&[
                name,
                &subject.name,
                &subject.kind,
                subject.namespace.as_deref().unwrap_or_default(),
            ]));
        }
    }
    write_table(out, &rows)
}

fn no_subjects<W: Write>(out: &mut W, action: &Action, kind: &str) -> io::Result<()> {
    writeln!(
        out,
        "No subjects found with permissions to {} {} assigned through {kind}",
        action.verb,
        action.target()
    )
}

fn subjects(subjects: Option<&[Subject]>) -> &[Subject] {
    subjects.unwrap_or_default()
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(ToString::to_string).collect()
}

/// Write rows with every column but the last padded to its widest cell
/// plus [`TABLE_PADDING`]
fn write_table<W: Write>(out: &mut W, rows: &[Vec<String>]) -> io::Result<()> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or_default();
    let widths: Vec<usize> = (0..columns.saturating_sub(1))
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or_default()
                + TABLE_PADDING
        })
        .collect();

    for row in rows {
        let last = row.len().saturating_sub(1);
        let mut line = String::new();
        for (column, cell) in row.iter().enumerate() {
            if column < last {
                line.push_str(&format!("{cell:<width$}", width = widths[column]));
            } else {
                line.push_str(cell);
            }
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}
