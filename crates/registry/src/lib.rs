//! Static model catalog.
//!
//! The registry owns every [`ModelDescriptor`] the relay knows about. It is
//! built at compile time, never mutated, and shared read-only by every
//! request. Besides `lookup` and `list_category` it carries the prompt
//! heuristic used to pick a model when nothing better is available.

pub use catalog::{CATEGORIES, DEFAULT_IMAGE_MODEL, LIVE_MODELS};
pub use heuristic::{has_image_intent, resolve_category};
pub use model::{Category, ModelDescriptor, ProviderKind, Tier};

mod catalog;
mod heuristic;
mod model;

/// Read-only view over a set of categories.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    categories: &'static [Category],
}

impl Registry {
    /// The built-in catalog.
    pub const fn builtin() -> Self {
        Self::new(CATEGORIES)
    }

    /// A registry over custom categories.
    pub const fn new(categories: &'static [Category]) -> Self {
        Self { categories }
    }

    /// All categories in display order.
    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    /// Look up a concrete model id. The first registration wins when an id
    /// appears in several categories.
    pub fn lookup(&self, id: &str) -> Option<&'static ModelDescriptor> {
        self.categories
            .iter()
            .flat_map(|c| c.models.iter())
            .find(|m| m.id == id)
    }

    /// Models of a category in registration order.
    pub fn list_category(&self, id: &str) -> Option<&'static [ModelDescriptor]> {
        self.category(id).map(|c| c.models)
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name for an id, falling back to the id itself.
    pub fn display_name<'a>(&self, id: &'a str) -> &'a str {
        match self.lookup(id) {
            Some(model) => model.name,
            None => id,
        }
    }

    /// Whether `id` names an image-tier model.
    pub fn is_image(&self, id: &str) -> bool {
        self.lookup(id).is_some_and(|m| m.tier == Tier::Image)
    }

    /// Whether `id` names a category made only of image models.
    pub fn is_image_category(&self, id: &str) -> bool {
        self.category(id).is_some_and(|c| {
            !c.models.is_empty() && c.models.iter().all(|m| m.tier == Tier::Image)
        })
    }

    /// Whether the live voice channel accepts `id`.
    pub fn is_live(&self, id: &str) -> bool {
        LIVE_MODELS.iter().any(|(live, _)| *live == id)
    }

    /// Pick a model id for a prompt, see [`resolve_category`].
    pub fn resolve_category(&self, prompt: &str) -> &'static str {
        resolve_category(prompt)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
