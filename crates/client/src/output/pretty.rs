//! Pretty output formatting.

use localemgmt_core::locale::{LocaleItem, UpsertReport};

use crate::client::{health::Readiness, meta::VersionInfo};

/// Format an item for display.
pub fn format_item(item: &LocaleItem) -> String {
    let id = item
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}.{} [{}]\n  ID: {}\n  Content: {}",
        item.bundle, item.key, item.lang, id, item.content
    )
}

/// Format items for display.
pub fn format_items(items: &[LocaleItem]) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }
    let mut output = format!("ITEMS ({})\n", items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format_item(item)));
        output.push('\n');
    }
    output
}

/// Format a bulk upsert report.
pub fn format_report(report: &UpsertReport) -> String {
    let mut output = format!("Written: {}", report.written);
    if !report.skipped.is_empty() {
        let positions: Vec<String> = report.skipped.iter().map(|p| p.to_string()).collect();
        output.push_str(&format!(
            "\nSkipped (missing key, bundle or lang): {}",
            positions.join(", ")
        ));
    }
    output
}

/// Format a list of names under a heading.
pub fn format_names(title: &str, names: &[String]) -> String {
    if names.is_empty() {
        return format!("No {} found.", title.to_lowercase());
    }
    let mut output = format!("{} ({})\n", title, names.len());
    output.push_str(&"-".repeat(40));
    for name in names {
        output.push_str(&format!("\n  {}", name));
    }
    output
}

pub fn format_version(info: &VersionInfo) -> String {
    let user = match &info.user {
        Some(profile) => match &profile.name {
            Some(name) => format!("{} ({})", name, profile.subject),
            None => profile.subject.clone(),
        },
        None => "not logged in".to_string(),
    };
    format!("Version: {}\nUser: {}", info.version, user)
}

pub fn format_readiness(readiness: &Readiness) -> String {
    match (&readiness.ready, &readiness.error) {
        (true, _) => "Ready".to_string(),
        (false, Some(error)) => format!("Not ready: {}", error),
        (false, None) => "Not ready".to_string(),
    }
}
