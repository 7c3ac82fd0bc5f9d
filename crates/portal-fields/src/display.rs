//! Display values, concatenation, and per-field presentation metadata.

use portal_config::DisplayConfig;
use portal_core::{Field, Item};
use serde::Serialize;

use crate::reference::ResolvedReferences;
use crate::registry::FieldRegistry;
use crate::render::RendererRegistry;
use crate::translate::{field_description, normalize_key, translate_field_name, Translator};
use crate::values::{get_values, has_value_changed, use_plural_label, ResolvedValue};

const DEFAULT_SEPARATOR: &str = ", ";
const DEFAULT_EMPTY: &str = "-";

/// Everything formatting needs besides the field and the item.
#[derive(Clone, Copy)]
pub struct DisplayContext<'a> {
    pub translator: &'a dyn Translator,
    pub display: &'a DisplayConfig,
    pub renderers: &'a RendererRegistry,
    /// Needed to render reference targets through `linked_field`.
    pub fields: Option<&'a FieldRegistry>,
    pub references: Option<&'a ResolvedReferences>,
    /// HTML-escape formatted output. Defaults to `true`.
    pub escape: bool,
}

impl<'a> DisplayContext<'a> {
    #[must_use]
    pub fn new(
        translator: &'a dyn Translator,
        display: &'a DisplayConfig,
        renderers: &'a RendererRegistry,
    ) -> Self {
        Self {
            translator,
            display,
            renderers,
            fields: None,
            references: None,
            escape: true,
        }
    }

    #[must_use]
    pub const fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    #[must_use]
    pub const fn with_fields(mut self, fields: &'a FieldRegistry) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub const fn with_references(mut self, references: &'a ResolvedReferences) -> Self {
        self.references = Some(references);
        self
    }

    /// Same context without resolved references, used when rendering a
    /// reference target so reference chains stop after one hop.
    #[must_use]
    pub const fn without_references(mut self) -> Self {
        self.references = None;
        self
    }

    fn separator(&self) -> String {
        self.translator.t_or("fields.separator", DEFAULT_SEPARATOR, &[])
    }

    fn empty_placeholder(&self) -> String {
        self.translator.t_or("fields.empty", DEFAULT_EMPTY, &[])
    }
}

/// One formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayValue {
    pub field: String,
    pub text: String,
    /// Storage field the value came from. `None` for placeholders.
    pub source: Option<String>,
    pub language: Option<String>,
    /// Stands in for a field with no values.
    pub is_placeholder: bool,
}

fn format_value(value: &ResolvedValue<'_>, field: &Field, ctx: &DisplayContext<'_>) -> String {
    ctx.renderers.get(field.renderer).format(value, field, ctx)
}

/// Formatted values of every field, in field order.
///
/// A field without values contributes a single placeholder entry.
#[must_use]
pub fn get_display_values(fields: &[&Field], item: &Item, ctx: &DisplayContext<'_>) -> Vec<DisplayValue> {
    let mut out = Vec::new();
    for field in fields {
        let values = get_values(field, item);
        if values.is_empty() {
            out.push(DisplayValue {
                field: field.name.clone(),
                text: ctx.empty_placeholder(),
                source: None,
                language: None,
                is_placeholder: true,
            });
            continue;
        }
        out.extend(values.iter().map(|value| DisplayValue {
            field: field.name.clone(),
            text: format_value(value, field, ctx),
            source: Some(value.source.name.clone()),
            language: value.source.language.clone(),
            is_placeholder: false,
        }));
    }
    out
}

/// One display string for `fields` on `item`.
///
/// Values of one sub-field are joined by the sub-field's concatenator, else
/// the field's, else the renderer default, else the locale separator.
/// Sub-fields are joined by the field concatenator (or the renderer default)
/// and fields by the locale separator. Fields and sub-fields without values
/// are skipped entirely. When nothing matched, returns `fallback` or the
/// localized empty placeholder.
#[must_use]
pub fn get_concat_display_value(
    fields: &[&Field],
    item: &Item,
    ctx: &DisplayContext<'_>,
    fallback: Option<&str>,
) -> String {
    let separator = ctx.separator();
    let mut parts = Vec::with_capacity(fields.len());

    for field in fields {
        let strategy = ctx.renderers.get(field.renderer);
        let field_joiner = field
            .concatenator
            .as_deref()
            .or_else(|| strategy.default_concatenator(ctx))
            .unwrap_or(&separator);

        let mut segments = Vec::with_capacity(field.resolves_to.len());
        for source in &field.resolves_to {
            let texts: Vec<String> = item
                .values_of(&source.name)
                .map(|field_value| {
                    strategy.format(&ResolvedValue { field_value, source }, field, ctx)
                })
                .collect();
            if texts.is_empty() {
                continue;
            }
            let value_joiner = source.concatenator.as_deref().unwrap_or(field_joiner);
            segments.push(texts.join(value_joiner));
        }

        if !segments.is_empty() {
            parts.push(segments.join(field_joiner));
        }
    }

    if parts.is_empty() {
        return fallback.map_or_else(|| ctx.empty_placeholder(), str::to_string);
    }
    parts.join(separator.as_str())
}

/// Content language of the field's first resolved value, when it differs
/// from the UI language.
#[must_use]
pub fn language_tag(field: &Field, item: &Item, ctx: &DisplayContext<'_>) -> Option<String> {
    let ui_language = ctx.translator.language();
    get_values(field, item)
        .into_iter()
        .find_map(|value| value.source.language.as_deref())
        .filter(|language| !language.eq_ignore_ascii_case(ui_language))
        .map(str::to_string)
}

/// Localized field description.
#[must_use]
pub fn tooltip(field: &Field, ctx: &DisplayContext<'_>) -> Option<String> {
    field_description(ctx.translator, &field.name)
}

/// Field label, in plural form when the item has several values and a
/// plural translation exists.
#[must_use]
pub fn field_label(field: &Field, item: &Item, ctx: &DisplayContext<'_>) -> String {
    if use_plural_label(field, item) {
        let key = format!("fields.{}.plural", normalize_key(&field.name));
        if let Some(plural) = ctx.translator.lookup(&key) {
            return plural.to_string();
        }
    }
    translate_field_name(ctx.translator, &field.name)
}

/// Everything needed to present one field of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDisplay {
    pub name: String,
    pub label: String,
    pub tooltip: Option<String>,
    pub language: Option<String>,
    pub text: String,
    pub values: Vec<DisplayValue>,
    pub changed: bool,
}

#[must_use]
pub fn display_field(
    field: &Field,
    item: &Item,
    previous: Option<&Item>,
    ctx: &DisplayContext<'_>,
) -> FieldDisplay {
    FieldDisplay {
        name: field.name.clone(),
        label: field_label(field, item, ctx),
        tooltip: tooltip(field, ctx),
        language: language_tag(field, item, ctx),
        text: get_concat_display_value(&[field], item, ctx, None),
        values: get_display_values(&[field], item, ctx),
        changed: has_value_changed(field, item, previous),
    }
}
