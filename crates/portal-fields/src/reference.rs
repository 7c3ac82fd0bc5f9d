//! Resolution of reference-typed fields to their target items.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use portal_core::{Field, Item, Renderer};

use crate::cache::ItemCache;
use crate::values::get_values;

/// Looks up items by business id.
pub trait ItemBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the item with business id `id`. `Ok(None)` when it does not exist.
    fn resolve_link(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceErrorKind {
    NotFound,
    Backend(String),
}

/// A referenced id that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceError {
    pub field: String,
    pub id: String,
    pub kind: ReferenceErrorKind,
}

/// Outcome of [`resolve_references`]: target items by id plus per-id failures.
#[derive(Debug, Clone, Default)]
pub struct ResolvedReferences {
    items: HashMap<String, Arc<Item>>,
    errors: Vec<ReferenceError>,
}

impl ResolvedReferences {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn errors(&self) -> &[ReferenceError] {
        &self.errors
    }

    #[must_use]
    pub fn error_for(&self, id: &str) -> Option<&ReferenceError> {
        self.errors.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolve every id held by the reference fields among `fields`.
///
/// Ids are looked up in `cache` first; misses go to `backend` and are cached.
/// A failure for one id is recorded and does not stop the others.
pub async fn resolve_references<B: ItemBackend>(
    fields: &[&Field],
    item: &Item,
    backend: &B,
    cache: &mut ItemCache,
) -> ResolvedReferences {
    let mut resolved = ResolvedReferences::default();

    for field in fields.iter().filter(|f| f.renderer == Renderer::Reference) {
        for value in get_values(field, item) {
            let id = value.field_value;
            if resolved.items.contains_key(id) || resolved.error_for(id).is_some() {
                continue;
            }
            if let Some(target) = cache.get(id) {
                resolved.items.insert(id.to_string(), target);
                continue;
            }

            match backend.resolve_link(id).await {
                Ok(Some(target)) => {
                    let target = cache.add(id, target);
                    resolved.items.insert(id.to_string(), target);
                }
                Ok(None) => {
                    tracing::warn!(field = %field.name, id, "referenced item not found");
                    resolved.errors.push(ReferenceError {
                        field: field.name.clone(),
                        id: id.to_string(),
                        kind: ReferenceErrorKind::NotFound,
                    });
                }
                Err(error) => {
                    tracing::warn!(field = %field.name, id, %error, "failed to resolve reference");
                    resolved.errors.push(ReferenceError {
                        field: field.name.clone(),
                        id: id.to_string(),
                        kind: ReferenceErrorKind::Backend(error.to_string()),
                    });
                }
            }
        }
    }

    resolved
}
