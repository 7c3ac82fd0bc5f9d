//! Renderer dispatch: one formatting strategy per [`Renderer`] kind.
//!
//! Every strategy formats a single resolved value. Vocabulary lookup and
//! date formatting happen in [`format_base`], shared by all strategies;
//! strategies add their own decoration and escaping on top.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use portal_core::{Field, Renderer, ValueType};

use crate::display::{get_concat_display_value, DisplayContext};
use crate::translate::translate_field_value;
use crate::values::ResolvedValue;

/// Formatting strategy for one renderer kind.
pub trait RenderStrategy: Send + Sync {
    /// Display text of one value. Escaped when `ctx.escape` is set, unless
    /// the strategy passes values through verbatim.
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String;

    /// Separator used between values when neither the sub-field nor the
    /// field overrides it.
    fn default_concatenator(&self, _ctx: &DisplayContext<'_>) -> Option<&'static str> {
        None
    }
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_if(text: &str, ctx: &DisplayContext<'_>) -> String {
    if ctx.escape {
        escape_html(text)
    } else {
        text.to_string()
    }
}

/// Unescaped display text shared by all strategies: vocabulary labels for
/// enumerable sources, formatted dates for temporal sources, the raw value
/// otherwise.
#[must_use]
pub fn format_base(value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
    let raw = value.field_value;
    if field.is_enumerable_source(value.source) {
        return translate_field_value(ctx.translator, &value.source.name, raw);
    }
    match value.source.value_type {
        ValueType::Date => format_date(raw, &ctx.display.date_format).unwrap_or_else(|| raw.to_string()),
        ValueType::DateTime => format_date_time(raw, ctx).unwrap_or_else(|| raw.to_string()),
        ValueType::Text | ValueType::Year | ValueType::Number | ValueType::Url => raw.to_string(),
    }
}

/// Render a chrono formatter, `None` when the format string is invalid.
fn render_format(formatted: impl fmt::Display, format: &str) -> Option<String> {
    let mut out = String::new();
    if write!(out, "{formatted}").is_err() {
        tracing::debug!(format, "invalid date format; showing raw value");
        return None;
    }
    Some(out)
}

fn format_date(raw: &str, format: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return render_format(date.format(format), format);
    }
    let dt = DateTime::parse_from_rfc3339(raw).ok()?;
    render_format(dt.date_naive().format(format), format)
}

fn format_date_time(raw: &str, ctx: &DisplayContext<'_>) -> Option<String> {
    let raw = raw.trim();
    let format = ctx.display.date_time_format.as_str();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return render_format(dt.format(format), format);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return render_format(dt.format(format), format);
    }
    format_date(raw, &ctx.display.date_format)
}

fn line_break(ctx: &DisplayContext<'_>) -> &'static str {
    if ctx.escape { "<br>" } else { "\n" }
}

fn looks_like_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

struct PlainRenderer;

impl RenderStrategy for PlainRenderer {
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
        escape_if(&format_base(value, field, ctx), ctx)
    }
}

/// Collapses internal whitespace.
struct TitleRenderer;

impl RenderStrategy for TitleRenderer {
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
        let text = format_base(value, field, ctx);
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        escape_if(&collapsed, ctx)
    }
}

/// Keeps line breaks as `<br>` in escaped output.
struct DescriptionRenderer;

impl RenderStrategy for DescriptionRenderer {
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
        let text = format_base(value, field, ctx);
        if ctx.escape {
            escape_html(text.trim()).replace("\r\n", "\n").replace('\n', "<br>")
        } else {
            text.trim().to_string()
        }
    }

    fn default_concatenator(&self, ctx: &DisplayContext<'_>) -> Option<&'static str> {
        Some(line_break(ctx))
    }
}

struct LinkRenderer;

impl RenderStrategy for LinkRenderer {
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
        let raw = value.field_value.trim();
        let text = format_base(value, field, ctx);
        if ctx.escape && looks_like_url(raw) {
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(raw),
                escape_html(&text)
            )
        } else {
            escape_if(&text, ctx)
        }
    }
}

/// Formats values as timestamps even when the source is typed as text.
struct TimeRenderer;

impl RenderStrategy for TimeRenderer {
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
        let text = match value.source.value_type {
            ValueType::Date => format_date(value.field_value, &ctx.display.date_format),
            ValueType::Text | ValueType::DateTime => format_date_time(value.field_value, ctx),
            ValueType::Year | ValueType::Number | ValueType::Url => None,
        }
        .unwrap_or_else(|| format_base(value, field, ctx));
        escape_if(&text, ctx)
    }
}

struct BulletsRenderer;

impl RenderStrategy for BulletsRenderer {
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
        format!("• {}", escape_if(&format_base(value, field, ctx), ctx))
    }

    fn default_concatenator(&self, ctx: &DisplayContext<'_>) -> Option<&'static str> {
        Some(line_break(ctx))
    }
}

/// Values are entity type codes.
struct EntityRenderer;

impl RenderStrategy for EntityRenderer {
    fn format(&self, value: &ResolvedValue<'_>, _field: &Field, ctx: &DisplayContext<'_>) -> String {
        let label = translate_field_value(ctx.translator, "entity_type", value.field_value);
        escape_if(&label, ctx)
    }
}

/// Values are business ids of other items.
///
/// A resolved target is rendered through the field's `linked_field`;
/// unresolved ids render as a warning marker followed by the id.
struct ReferenceRenderer;

impl RenderStrategy for ReferenceRenderer {
    fn format(&self, value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
        let id = value.field_value;
        let Some(references) = ctx.references else {
            return escape_if(id, ctx);
        };

        if let Some(target) = references.get(id) {
            let linked = field
                .linked_field
                .as_deref()
                .and_then(|name| ctx.fields.and_then(|registry| registry.get(name)));
            return match linked {
                Some(linked) => {
                    let fallback = escape_if(&target.business_id, ctx);
                    let nested = ctx.without_references();
                    get_concat_display_value(&[linked], target, &nested, Some(fallback.as_str()))
                }
                None => escape_if(&target.business_id, ctx),
            };
        }

        if references.error_for(id).is_some() {
            return format!("⚠ {}", escape_if(id, ctx));
        }
        escape_if(id, ctx)
    }
}

/// Raw value, no formatting and no escaping.
struct NoneRenderer;

impl RenderStrategy for NoneRenderer {
    fn format(&self, value: &ResolvedValue<'_>, _field: &Field, _ctx: &DisplayContext<'_>) -> String {
        value.field_value.to_string()
    }
}

/// Maps each renderer kind to its formatting strategy.
pub struct RendererRegistry {
    strategies: HashMap<Renderer, Box<dyn RenderStrategy>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.strategies.keys().map(|r| r.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("RendererRegistry")
            .field("renderers", &kinds)
            .finish()
    }
}

impl RendererRegistry {
    /// Registry with the built-in strategy for every renderer kind.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
        };
        registry.register(Renderer::Plain, PlainRenderer);
        registry.register(Renderer::Title, TitleRenderer);
        registry.register(Renderer::Description, DescriptionRenderer);
        registry.register(Renderer::Link, LinkRenderer);
        registry.register(Renderer::Time, TimeRenderer);
        registry.register(Renderer::Bullets, BulletsRenderer);
        registry.register(Renderer::Entity, EntityRenderer);
        registry.register(Renderer::Reference, ReferenceRenderer);
        registry.register(Renderer::None, NoneRenderer);
        registry
    }

    /// Install or replace the strategy for `renderer`.
    pub fn register(&mut self, renderer: Renderer, strategy: impl RenderStrategy + 'static) {
        self.strategies.insert(renderer, Box::new(strategy));
    }

    /// Strategy for `renderer`, falling back to the plain strategy.
    #[must_use]
    pub fn get(&self, renderer: Renderer) -> &dyn RenderStrategy {
        self.strategies
            .get(&renderer)
            .or_else(|| self.strategies.get(&Renderer::Plain))
            .map_or(&PlainRenderer as &dyn RenderStrategy, AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::Catalog;
    use portal_config::DisplayConfig;
    use portal_core::{FieldSource, Item};
    use rstest::rstest;

    fn render(field: &Field, value: &str, escape: bool) -> String {
        render_with(field, &[value], escape, &DisplayConfig::default())
    }

    fn render_with(field: &Field, values: &[&str], escape: bool, display: &DisplayConfig) -> String {
        let catalog = Catalog::new("en").with_entries([
            ("values.entity_type.book", "Book"),
            ("values.language.fin", "Finnish"),
        ]);
        let renderers = RendererRegistry::with_defaults();
        let ctx = DisplayContext::new(&catalog, display, &renderers).with_escape(escape);
        let item = values.iter().fold(Item::new("1", "book", "B-1"), |item, value| {
            item.with_value(&field.resolves_to[0].name, *value)
        });
        get_concat_display_value(&[field], &item, &ctx, None)
    }

    #[test]
    fn escape_html_covers_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[rstest]
    #[case(Renderer::Plain, "a < b", true, "a &lt; b")]
    #[case(Renderer::Plain, "a < b", false, "a < b")]
    #[case(Renderer::Title, "  The   Moomins ", true, "The Moomins")]
    #[case(Renderer::Description, "line one\nline <two>", true, "line one<br>line &lt;two&gt;")]
    #[case(Renderer::Description, "line one\nline two", false, "line one\nline two")]
    #[case(Renderer::Link, "https://example.org/?a=1&b=2", true, "<a href=\"https://example.org/?a=1&amp;b=2\">https://example.org/?a=1&amp;b=2</a>")]
    #[case(Renderer::Link, "not a url", true, "not a url")]
    #[case(Renderer::Bullets, "first", true, "• first")]
    #[case(Renderer::Entity, "book", true, "Book")]
    #[case(Renderer::None, "<b>raw</b>", true, "<b>raw</b>")]
    #[case(Renderer::Reference, "urn:x", true, "urn:x")]
    fn renders_single_values(
        #[case] renderer: Renderer,
        #[case] value: &str,
        #[case] escape: bool,
        #[case] expected: &str,
    ) {
        let field = Field::new("f", renderer, vec![FieldSource::new("f")]);
        assert_eq!(render(&field, value, escape), expected);
    }

    #[test]
    fn time_renderer_formats_text_timestamps() {
        let field = Field::new("modified", Renderer::Time, vec![FieldSource::new("modified")]);
        assert_eq!(render(&field, "2024-03-05T10:30:00Z", true), "2024-03-05 10:30");
        assert_eq!(render(&field, "2024-03-05", true), "2024-03-05");
        assert_eq!(render(&field, "sometime", true), "sometime");
    }

    #[test]
    fn date_sources_use_date_format() {
        let field = Field::new(
            "published",
            Renderer::Plain,
            vec![FieldSource::new("published").with_type(ValueType::Date)],
        );
        assert_eq!(render(&field, "2021-12-24T08:00:00+02:00", true), "2021-12-24");
        assert_eq!(render(&field, "garbage", true), "garbage");
    }

    #[test]
    fn invalid_date_format_falls_back_to_raw_value() {
        let display = DisplayConfig {
            date_format: "%Q".to_string(),
            date_time_format: "%Y %Q".to_string(),
            ..DisplayConfig::default()
        };
        let date = Field::new(
            "published",
            Renderer::Plain,
            vec![FieldSource::new("published").with_type(ValueType::Date)],
        );
        let timestamp = Field::new("modified", Renderer::Time, vec![FieldSource::new("modified")]);
        assert_eq!(render_with(&date, &["2021-12-24"], true, &display), "2021-12-24");
        assert_eq!(
            render_with(&timestamp, &["2024-03-05T10:30:00Z"], true, &display),
            "2024-03-05T10:30:00Z"
        );
    }

    #[rstest]
    #[case(Renderer::Description, true, "first<br>second &amp; third")]
    #[case(Renderer::Description, false, "first\nsecond & third")]
    #[case(Renderer::Bullets, true, "• first<br>• second &amp; third")]
    #[case(Renderer::Bullets, false, "• first\n• second & third")]
    fn multiline_renderers_join_with_line_breaks(
        #[case] renderer: Renderer,
        #[case] escape: bool,
        #[case] expected: &str,
    ) {
        let field = Field::new("f", renderer, vec![FieldSource::new("f")]);
        let joined = render_with(&field, &["first", "second & third"], escape, &DisplayConfig::default());
        assert_eq!(joined, expected);
    }

    #[test]
    fn enumerable_sources_use_vocabulary() {
        let field = Field::new(
            "language",
            Renderer::Plain,
            vec![FieldSource::new("language").enumerable()],
        );
        assert_eq!(render(&field, "fin", true), "Finnish");
        assert_eq!(render(&field, "swe", true), "swe");
    }

    #[test]
    fn custom_strategy_replaces_builtin() {
        struct Shout;
        impl RenderStrategy for Shout {
            fn format(&self, value: &ResolvedValue<'_>, _: &Field, _: &DisplayContext<'_>) -> String {
                value.field_value.to_uppercase()
            }
        }

        let mut registry = RendererRegistry::with_defaults();
        registry.register(Renderer::Plain, Shout);
        let field = Field::plain("f");
        let source = &field.resolves_to[0];
        let catalog = Catalog::new("en");
        let display = DisplayConfig::default();
        let ctx = DisplayContext::new(&catalog, &display, &registry);
        let value = ResolvedValue {
            field_value: "quiet",
            source,
        };
        assert_eq!(registry.get(Renderer::Plain).format(&value, &field, &ctx), "QUIET");
    }
}
