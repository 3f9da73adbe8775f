use serde::Serialize;
use tracing::{debug, info};

use crate::cli::config::{AppConfig, resolve_connection, resolve_links};
use crate::connection::status::{ConnectionReport, check_connection, format_console_status};
use crate::connection::tester::HttpConnectionTester;
use crate::listing::link::{EntityLinkRenderer, Rendered, render_listing};
use crate::listing::rows::load_rows;
use crate::mapping::element_model::{Element, Flattenable};
use crate::mapping::fingerprint::mapping_fingerprint;
use crate::mapping::flatten::{flatten_deep_with, flatten_with};
use crate::mapping::loader::load_mapping;
use crate::trace::audit::AuditEvent;
use crate::trace::logger::AuditLogger;
use crate::translate::translator::CatalogTranslator;

fn build_translator(config: &AppConfig) -> CatalogTranslator {
    let translator = CatalogTranslator::new(config.translations.clone());
    if translator.is_empty() {
        debug!("no translations configured");
    } else {
        debug!(entries = translator.len(), "translation catalog loaded");
    }
    translator
}

// ============================================================================
// flatten subcommand
// ============================================================================

/// Flattened mapping as printed by `flatten --format json`.
#[derive(Debug, Serialize)]
pub struct FlattenedMapping {
    pub name: String,
    pub fingerprint: String,
    pub elements: Vec<Element>,
}

pub fn cmd_flatten(
    mapping_path: &str,
    deep: bool,
    format: &str,
    config: &AppConfig,
    audit: &AuditLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mapping = audit.check("flatten", load_mapping(mapping_path))?;

    let translator = build_translator(config);
    let elements = if deep {
        flatten_deep_with(mapping.elements, &translator)
    } else {
        flatten_with(mapping.elements, &translator)
    };
    let fingerprint = mapping_fingerprint(&elements);

    info!(mapping = %mapping.name, fields = elements.len(), deep, "mapping flattened");
    audit.log(
        &AuditEvent::now("flatten")
            .with_detail(&mapping.name)
            .with_fingerprint(&fingerprint)
            .with_element_count(elements.len()),
    );

    let flattened = FlattenedMapping {
        name: mapping.name,
        fingerprint,
        elements,
    };

    let output = match format {
        "json" => serde_json::to_string_pretty(&flattened)? + "\n",
        _ => format_flattened_console(&flattened),
    };
    print!("{}", output);

    Ok(())
}

/// Format a flattened mapping for terminal output.
///
/// ```text
/// === Mapping: contact (3 fields) ===
///   1    Name
///   5/1  Address: Street
///   5/2  Address: City
/// fingerprint: 2f1c…
/// ```
pub fn format_flattened_console(mapping: &FlattenedMapping) -> String {
    let mut out = format!(
        "=== Mapping: {} ({} fields) ===\n",
        mapping.name,
        mapping.elements.len()
    );

    let width = mapping
        .elements
        .iter()
        .map(|e| e.id().len())
        .max()
        .unwrap_or(0);

    for element in &mapping.elements {
        let marker = if element.is_component() { " [component]" } else { "" };
        out.push_str(&format!(
            "  {:<width$}  {}{}\n",
            element.id(),
            element.label(),
            marker,
            width = width
        ));
    }

    out.push_str(&format!("fingerprint: {}\n", mapping.fingerprint));
    out
}

// ============================================================================
// test-connection subcommand
// ============================================================================

/// Test the remote connection and return whether it succeeded.
pub fn cmd_test_connection(
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout_secs: Option<u64>,
    format: &str,
    config: &AppConfig,
    audit: &AuditLogger,
) -> Result<bool, Box<dyn std::error::Error>> {
    let resolved = resolve_connection(&config.connection, endpoint, api_key, timeout_secs);

    let mut tester = HttpConnectionTester::new(&resolved.endpoint).with_timeout(resolved.timeout_secs);
    if let Some(key) = resolved.api_key {
        tester = tester.with_api_key(key);
    }

    let translator = build_translator(config);
    let report = check_connection(&tester, &translator);

    let event = AuditEvent::now("test-connection");
    let event = match &report.detail {
        Some(detail) => event.failed(detail),
        None => event.with_detail(&resolved.endpoint),
    };
    audit.log(&event);

    print!("{}", format_connection_report(&report, format)?);
    Ok(report.success)
}

pub fn format_connection_report(
    report: &ConnectionReport,
    format: &str,
) -> Result<String, serde_json::Error> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(report)? + "\n"),
        _ => Ok(format_console_status(report)),
    }
}

// ============================================================================
// render-links subcommand
// ============================================================================

pub fn cmd_render_links(
    rows_path: &str,
    absolute: bool,
    base_url: Option<&str>,
    format: &str,
    config: &AppConfig,
    audit: &AuditLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let links = resolve_links(&config.links, absolute, base_url);
    let translator = build_translator(config);
    let renderer = audit.check("render-links", EntityLinkRenderer::new(links, translator))?;

    let rows = audit.check("render-links", load_rows(rows_path))?;
    let cells = render_listing(&renderer, &rows);

    let linked = cells
        .iter()
        .filter(|c| matches!(c, Rendered::Link { .. }))
        .count();
    info!(
        rows = rows.len(),
        linked,
        id_field = %renderer.config().id_field,
        absolute = renderer.config().absolute,
        "listing rendered"
    );
    audit.log(
        &AuditEvent::now("render-links")
            .with_detail(rows_path)
            .with_element_count(cells.len()),
    );

    print!("{}", format_cells(&cells, format)?);
    Ok(())
}

pub fn format_cells(cells: &[Rendered], format: &str) -> Result<String, serde_json::Error> {
    let out = match format {
        "json" => serde_json::to_string_pretty(cells)? + "\n",
        "html" => cells
            .iter()
            .map(|c| format!("<td>{}</td>\n", c.to_html()))
            .collect(),
        _ => cells.iter().map(|c| format!("{}\n", c)).collect(),
    };
    Ok(out)
}
