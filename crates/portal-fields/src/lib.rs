//! # portal-fields
//!
//! Field resolution and display formatting for Portal.
//!
//! Given a logical [`Field`](portal_core::Field) and an [`Item`](portal_core::Item)
//! the pipeline produces:
//! - the raw matched values, in sub-field declaration order then item order
//! - formatted display values (vocabulary labels, dates, HTML escaping)
//! - one concatenated display string with field-specific punctuation
//! - a language tag for foreign-language content
//! - a change flag against a previous version of the item
//!
//! Around the pipeline:
//! - [`FieldRegistry`] holds the static field set loaded from configuration
//! - [`RendererRegistry`] dispatches each renderer kind to a [`RenderStrategy`]
//! - [`Translator`] / [`Catalog`] provide localized labels with key fallbacks
//! - [`calculate_completeness`] scores how well an item fills its fields
//! - [`ItemCache`] and [`resolve_references`] resolve reference-typed fields

mod cache;
mod completeness;
mod display;
mod error;
mod reference;
mod registry;
mod render;
mod translate;
mod values;

pub use cache::{ItemCache, ItemHandler, SubscriptionToken};
pub use completeness::{calculate_completeness, CategoryScore, Completeness};
pub use display::{
    display_field, field_label, get_concat_display_value, get_display_values, language_tag,
    tooltip, DisplayContext, DisplayValue, FieldDisplay,
};
pub use error::FieldError;
pub use reference::{
    resolve_references, ItemBackend, ReferenceError, ReferenceErrorKind, ResolvedReferences,
};
pub use registry::FieldRegistry;
pub use render::{escape_html, format_base, RenderStrategy, RendererRegistry};
pub use translate::{
    field_description, normalize_key, translate_field_name, translate_field_value,
    translate_field_value_description, Catalog, Translator,
};
pub use values::{
    get_raw_values, get_values, has_value, has_value_changed, use_plural_label, ResolvedValue,
};
