use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run a search and show results, facets, and the resulting URL parameters.
    Search(SearchArgs),
    /// Show one item with formatted fields and completeness.
    Item(ItemArgs),
    /// List one level of a hierarchy facet.
    Browse(BrowseArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Query text.
    pub query: Option<String>,

    /// Start from a URL query string (e.g. `q=moomin&type=book`).
    #[arg(long)]
    pub url: Option<String>,

    /// Add a filter value, as `axis=value`. Repeatable.
    #[arg(long = "filter", value_name = "AXIS=VALUE")]
    pub filters: Vec<String>,

    /// Sort axis, or `relevance`.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: asc or desc.
    #[arg(long)]
    pub order: Option<String>,

    /// 1-based result page.
    #[arg(long)]
    pub page: Option<u64>,

    /// Fetch one more bucket page for this axis after searching. Repeatable.
    #[arg(long = "more", value_name = "AXIS")]
    pub more: Vec<String>,

    /// Field shown as the title of each result.
    #[arg(long, default_value = "title")]
    pub title_field: String,
}

#[derive(Clone, Debug, Args)]
pub struct ItemArgs {
    /// Business id of the item.
    pub id: String,

    /// Comma-separated fields to show (default: all registered fields).
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// JSON file holding an earlier version of the item, for change flags.
    #[arg(long)]
    pub previous: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct BrowseArgs {
    /// Hierarchy axis.
    pub axis: String,

    /// Value whose children to list (default: roots).
    #[arg(long)]
    pub parent: Option<String>,
}
