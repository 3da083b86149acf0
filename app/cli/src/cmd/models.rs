//! Model catalog listing.

use anyhow::{Result, bail};
use clap::Args;
use registry::{Category, LIVE_MODELS, Registry};
use std::fmt::Write;

/// List the model catalog.
#[derive(Args, Debug)]
pub struct Models {
    /// Only this category.
    #[arg(long)]
    pub category: Option<String>,
}

impl Models {
    /// Print the catalog.
    pub fn run(self) -> Result<()> {
        print!("{}", render(&Registry::builtin(), self.category.as_deref())?);
        Ok(())
    }
}

/// Category id under which the live voice models are listed.
pub const LIVE: &str = "live";

/// Format the catalog, or one category of it.
///
/// The full listing ends with the models of the live voice channel, which
/// are also reachable as the `live` category.
pub fn render(registry: &Registry, category: Option<&str>) -> Result<String> {
    let (categories, live): (Vec<&Category>, bool) = match category {
        Some(LIVE) => (Vec::new(), true),
        Some(id) => match registry.category(id) {
            Some(category) => (vec![category], false),
            None => bail!("unknown category {id}"),
        },
        None => (registry.categories().iter().collect(), true),
    };

    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{} ({})", category.name, category.id);
        for model in category.models {
            let _ = writeln!(
                out,
                "  {:<28} {:<26} {:<7} {}",
                model.id,
                model.name,
                model.provider.as_str(),
                model.tier.as_str()
            );
        }
    }
    if live {
        let _ = writeln!(out, "Live voice ({LIVE})");
        for (id, name) in LIVE_MODELS {
            let _ = writeln!(out, "  {id:<28} {name}");
        }
    }
    Ok(out)
}
