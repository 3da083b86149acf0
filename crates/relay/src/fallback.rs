//! Category plans and fallback chains.
//!
//! Every category token owns a closed classification pool, a fixed default
//! used on routing failure, and a fallback chain. Concrete model ids use the
//! chain of their provider. All tables are finite and fixed, so a run makes
//! a bounded number of attempts.

use crate::Route;
use compact_str::CompactString;
use provider::{ProviderKind, Providers, Upstream};

/// Routing plan of a category token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPlan {
    /// Category token.
    pub id: &'static str,
    /// Ids the classifier may pick from.
    pub pool: &'static [&'static str],
    /// Id used when routing fails.
    pub default: &'static str,
    /// Backups tried in order after the routed model fails.
    pub chain: &'static [&'static str],
}

const LLAMA_70B: &str = "llama-3.3-70b-versatile";
const LLAMA_8B: &str = "llama-3.1-8b-instant";
const FLASH: &str = "gemini-2.5-flash";
const FLASH_LITE: &str = "gemini-2.5-flash-lite";

const AUTO: CategoryPlan = CategoryPlan {
    id: "auto",
    pool: &[
        LLAMA_8B,
        LLAMA_70B,
        "openai/gpt-oss-120b",
        "qwen/qwen3-32b",
        "moonshotai/kimi-k2-instruct",
    ],
    default: LLAMA_70B,
    chain: &[LLAMA_70B, LLAMA_8B, FLASH],
};

/// Plans of every routable category.
pub const PLANS: &[CategoryPlan] = &[
    AUTO,
    CategoryPlan {
        id: "gemini",
        pool: &["gemini-2.5-pro", FLASH, FLASH_LITE],
        default: FLASH,
        chain: &[FLASH, FLASH_LITE, LLAMA_70B],
    },
    CategoryPlan {
        id: "openai",
        pool: &["openai/gpt-oss-120b", "openai/gpt-oss-20b", "qwen/qwen3-32b"],
        default: "openai/gpt-oss-120b",
        chain: &["openai/gpt-oss-20b", LLAMA_70B, FLASH],
    },
    CategoryPlan {
        id: "meta",
        pool: &[LLAMA_70B, LLAMA_8B],
        default: LLAMA_70B,
        chain: &[LLAMA_70B, LLAMA_8B, FLASH],
    },
    CategoryPlan {
        id: "moonshot",
        pool: &["moonshotai/kimi-k2-instruct", LLAMA_70B],
        default: "moonshotai/kimi-k2-instruct",
        chain: &[LLAMA_70B, LLAMA_8B],
    },
];

/// The plan of the `auto` category, also used for unknown ids.
pub fn auto() -> &'static CategoryPlan {
    &AUTO
}

/// The plan of a category token.
pub fn plan(category: &str) -> Option<&'static CategoryPlan> {
    PLANS.iter().find(|p| p.id == category)
}

/// Fallback chain of a provider, used for concrete model ids.
pub fn provider_chain(kind: ProviderKind) -> &'static [&'static str] {
    match kind {
        ProviderKind::Groq => &[LLAMA_70B, LLAMA_8B, FLASH],
        ProviderKind::Gemini => &[FLASH, FLASH_LITE, LLAMA_70B],
    }
}

/// Chain of the selection that produced `route`.
pub fn chain(route: &Route) -> &'static [&'static str] {
    match route.category.and_then(plan) {
        Some(plan) => plan.chain,
        None => provider_chain(route.provider),
    }
}

/// Ordered models to attempt for `route`: the routed model first, then its
/// chain without the routed model, duplicates, or models whose provider is
/// unavailable.
pub fn candidates<U: Upstream>(route: &Route, providers: &Providers<U>) -> Vec<CompactString> {
    let mut out = vec![route.model.clone()];
    for &id in chain(route) {
        if out.iter().any(|m| m.as_str() == id) {
            continue;
        }
        if !providers.is_available(ProviderKind::from_model_id(id)) {
            tracing::debug!("skipping fallback {id}, provider unavailable");
            continue;
        }
        out.push(CompactString::const_new(id));
    }
    out
}
