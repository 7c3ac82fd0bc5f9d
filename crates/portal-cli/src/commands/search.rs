use anyhow::{anyhow, Context};
use portal_core::{SortOrder, Sorting};
use portal_fields::get_concat_display_value;
use portal_search::{
    axis_label, facet_items, parse_query_string, summary, to_query_string, SearchSession,
};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat, SearchArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SearchReport {
    summary: String,
    url: String,
    page: u64,
    num_found: u64,
    items: Vec<ResultRow>,
    facets: Vec<FacetReport>,
}

#[derive(Debug, Serialize)]
struct ResultRow {
    id: String,
    #[serde(rename = "type")]
    entity_type: String,
    title: String,
}

#[derive(Debug, Serialize)]
struct FacetReport {
    axis: String,
    label: String,
    has_more: bool,
    buckets: Vec<BucketRow>,
}

#[derive(Debug, Serialize)]
struct BucketRow {
    value: String,
    text: String,
    count: Option<u64>,
    selected: bool,
}

/// Handle `portal search`.
pub async fn handle(
    args: &SearchArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut session = match &args.url {
        Some(url) => SearchSession::from_query_params(
            ctx.config.search.clone(),
            ctx.config.facets.clone(),
            &parse_query_string(url),
        ),
        None => ctx.session(),
    };
    apply_args(&mut session, args)?;

    let num_found = session.search(&ctx.client).await.context("search failed")?;
    for axis in &args.more {
        let loaded = session
            .load_more(&ctx.client, axis)
            .await
            .with_context(|| format!("failed to load more buckets for '{axis}'"))?;
        if !loaded {
            tracing::info!(axis, "no more buckets loaded");
        }
    }

    let report = build_report(&session, ctx, flags, num_found, &args.title_field);
    match flags.format {
        OutputFormat::Table => print_tables(&report),
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}

fn apply_args(session: &mut SearchSession, args: &SearchArgs) -> anyhow::Result<()> {
    if let Some(query) = &args.query {
        session.set_query(query.clone());
    }

    let order = args
        .order
        .as_deref()
        .map(|o| SortOrder::parse(o).ok_or_else(|| anyhow!("invalid sort order '{o}' (expected asc or desc)")))
        .transpose()?;
    if args.sort.is_some() || order.is_some() {
        let current = session.sorting().clone();
        let axis = match args.sort.as_deref() {
            Some("relevance") => None,
            Some(axis) => Some(axis.to_string()),
            None => current.axis,
        };
        session.set_sorting(Sorting {
            axis,
            order: order.unwrap_or(current.order),
        });
    }

    for filter in &args.filters {
        let (axis, value) = filter
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid filter '{filter}' (expected axis=value)"))?;
        if session.facet(axis).is_none() {
            anyhow::bail!("unknown facet axis '{axis}'");
        }
        if !session.add_filter(axis, value) && !session.filters().contains(axis, value) {
            tracing::warn!(axis, value, "filter value ignored");
        }
    }

    if let Some(page) = args.page {
        session.set_page(page);
    }
    Ok(())
}

fn build_report(
    session: &SearchSession,
    ctx: &AppContext,
    flags: &GlobalFlags,
    num_found: u64,
    title_field: &str,
) -> SearchReport {
    let display = ctx.display_context(flags);
    let title = ctx.fields.get(title_field);
    if title.is_none() {
        tracing::warn!(field = title_field, "title field is not registered; showing ids");
    }

    let items = session
        .items()
        .iter()
        .map(|item| ResultRow {
            id: item.business_id.clone(),
            entity_type: portal_fields::translate_field_value(
                &ctx.catalog,
                "entity_type",
                &item.entity_type,
            ),
            title: title.map_or_else(
                || item.business_id.clone(),
                |field| get_concat_display_value(&[field], item, &display, Some(item.business_id.as_str())),
            ),
        })
        .collect();

    let facets = session
        .facet_config()
        .iter()
        .filter_map(|facet| {
            let data = session.facets().get(&facet.name)?;
            Some(FacetReport {
                axis: facet.name.clone(),
                label: axis_label(facet, &ctx.fields, &ctx.catalog),
                has_more: session.has_more_buckets(&facet.name),
                buckets: facet_items(data)
                    .map(|bucket| BucketRow {
                        value: bucket.value().to_string(),
                        text: bucket.text(&ctx.catalog, &facet.name),
                        count: bucket.count(),
                        selected: session.filters().contains(&facet.name, bucket.value()),
                    })
                    .collect(),
            })
        })
        .collect();

    SearchReport {
        summary: summary(&ctx.catalog, num_found, session.query()),
        url: to_query_string(&session.to_query_params()),
        page: session.page(),
        num_found,
        items,
        facets,
    }
}

fn print_tables(report: &SearchReport) -> anyhow::Result<()> {
    println!("{}", report.summary);
    if !report.url.is_empty() {
        println!("?{}", report.url);
    }
    println!();
    output(&report.items, OutputFormat::Table)?;
    for facet in &report.facets {
        let more = if facet.has_more { " (more available)" } else { "" };
        println!("\n{} [{}]{more}", facet.label, facet.axis);
        output(&facet.buckets, OutputFormat::Table)?;
    }
    Ok(())
}
