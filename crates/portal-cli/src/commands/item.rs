use anyhow::{anyhow, Context};
use portal_core::{Field, Item};
use portal_fields::{
    calculate_completeness, display_field, resolve_references, translate_field_value,
    CategoryScore, FieldDisplay, ReferenceErrorKind,
};
use serde::Serialize;

use crate::cli::{GlobalFlags, ItemArgs, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ItemReport {
    id: String,
    #[serde(rename = "type")]
    entity_type: String,
    completeness: u8,
    categories: Vec<CategoryScore>,
    fields: Vec<FieldDisplay>,
    reference_errors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FieldRow<'a> {
    field: &'a str,
    value: &'a str,
    language: Option<&'a str>,
    changed: bool,
}

/// Handle `portal item`.
pub async fn handle(args: &ItemArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let fetched = ctx
        .client
        .item(&args.id)
        .await
        .with_context(|| format!("failed to fetch item '{}'", args.id))?
        .ok_or_else(|| anyhow!("item '{}' not found", args.id))?;
    let item = ctx.cache.add(fetched.business_id.clone(), fetched);
    let previous = args.previous.as_deref().map(read_previous).transpose()?;

    let fields: Vec<&Field> = if args.fields.is_empty() {
        ctx.fields.iter().filter(|f| !f.is_virtual).collect()
    } else {
        ctx.fields.require_all(&args.fields)?
    };

    let references = resolve_references(&fields, &item, &ctx.client, &mut ctx.cache).await;
    let display = ctx.display_context(flags).with_references(&references);
    let completeness = calculate_completeness(&item, &ctx.fields, &ctx.config.completeness);

    let report = ItemReport {
        id: item.business_id.clone(),
        entity_type: translate_field_value(&ctx.catalog, "entity_type", &item.entity_type),
        completeness: completeness.total,
        categories: completeness.categories,
        fields: fields
            .iter()
            .map(|field| display_field(field, &item, previous.as_ref(), &display))
            .collect(),
        reference_errors: references
            .errors()
            .iter()
            .map(|e| match &e.kind {
                ReferenceErrorKind::NotFound => format!("{}: {} not found", e.field, e.id),
                ReferenceErrorKind::Backend(message) => format!("{}: {} ({message})", e.field, e.id),
            })
            .collect(),
    };

    match flags.format {
        OutputFormat::Table => print_tables(&report),
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}

fn read_previous(path: &str) -> anyhow::Result<Item> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read previous version from {path}"))?;
    serde_json::from_str(&body).with_context(|| format!("{path} is not an item"))
}

fn print_tables(report: &ItemReport) -> anyhow::Result<()> {
    println!("{} {} (completeness {}%)", report.entity_type, report.id, report.completeness);
    println!();
    let rows: Vec<FieldRow<'_>> = report
        .fields
        .iter()
        .map(|f| FieldRow {
            field: &f.label,
            value: &f.text,
            language: f.language.as_deref(),
            changed: f.changed,
        })
        .collect();
    output(&rows, OutputFormat::Table)?;

    println!();
    output(&report.categories, OutputFormat::Table)?;

    for error in &report.reference_errors {
        eprintln!("warning: unresolved reference {error}");
    }
    Ok(())
}
