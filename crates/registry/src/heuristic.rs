//! Keyword heuristic for picking a model from prompt text.

use crate::catalog::DEFAULT_IMAGE_MODEL;

/// One heuristic rule. A rule hits when the lowercased prompt contains any
/// keyword, or when the prompt is longer than `longer_than` characters.
struct Rule {
    keywords: &'static [&'static str],
    longer_than: Option<usize>,
    model: &'static str,
}

impl Rule {
    fn hits(&self, prompt: &str, len: usize) -> bool {
        self.keywords.iter().any(|k| prompt.contains(k))
            || self.longer_than.is_some_and(|limit| len > limit)
    }
}

/// Rules in priority order, first hit wins.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["generate image", "create an image", "draw"],
        longer_than: None,
        model: DEFAULT_IMAGE_MODEL,
    },
    Rule {
        keywords: &["search", "browse", "analyze", "summary"],
        longer_than: Some(500),
        model: "llama-3.3-70b-versatile",
    },
    Rule {
        keywords: &["code", "math", "solve", "logic", "function"],
        longer_than: None,
        model: "openai/gpt-oss-120b",
    },
];

/// Fallback when no rule hits.
const FAST_DEFAULT: &str = "llama-3.1-8b-instant";

/// Pick a concrete model id for `prompt`.
pub fn resolve_category(prompt: &str) -> &'static str {
    let lowered = prompt.to_lowercase();
    let len = prompt.chars().count();
    RULES
        .iter()
        .find(|rule| rule.hits(&lowered, len))
        .map_or(FAST_DEFAULT, |rule| rule.model)
}

/// Whether the prompt asks for an image.
pub fn has_image_intent(prompt: &str) -> bool {
    resolve_category(prompt) == DEFAULT_IMAGE_MODEL
}
