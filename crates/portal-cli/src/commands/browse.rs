use portal_search::hierarchy_items;
use serde::Serialize;

use crate::cli::{BrowseArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct BrowseRow {
    value: String,
    text: String,
    count: Option<u64>,
    children: bool,
}

/// Handle `portal browse`.
pub async fn handle(args: &BrowseArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session();
    let hierarchy = session
        .browse(&ctx.client, &args.axis, args.parent.as_deref())
        .await?;

    let rows: Vec<BrowseRow> = hierarchy_items(&hierarchy)
        .map(|item| BrowseRow {
            value: item.value().to_string(),
            text: item.text(&ctx.catalog, &args.axis),
            count: item.count(),
            children: item.can_descend(),
        })
        .collect();
    output(&rows, flags.format)
}
