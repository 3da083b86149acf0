//! Per-model request shaping.
//!
//! Each provider owns an ordered table of `(Matcher, Shape)` pairs. The table
//! is scanned top to bottom and the first matching rule wins, so more
//! specific families sit above broader ones. Every table ends with
//! [`Matcher::Any`] carrying the default shape.

use crate::ProviderKind;
use llm::Sampling;

/// Predicate over a model id.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// The id equals one of these.
    Exact(&'static [&'static str]),
    /// The id starts with this prefix.
    Prefix(&'static str),
    /// The id contains one of these.
    Contains(&'static [&'static str]),
    /// Every id.
    Any,
}

impl Matcher {
    /// Whether `model` satisfies the predicate.
    pub fn matches(&self, model: &str) -> bool {
        match self {
            Self::Exact(ids) => ids.iter().any(|id| *id == model),
            Self::Prefix(prefix) => model.starts_with(prefix),
            Self::Contains(parts) => parts.iter().any(|p| model.contains(p)),
            Self::Any => true,
        }
    }
}

/// How requests for a model family are shaped.
///
/// `None` sampling fields are left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub reasoning_effort: Option<&'static str>,
    /// Whether the upstream call streams.
    pub streaming: bool,
    /// Whether server-side tools may be attached.
    pub tools: bool,
    /// Value of the `Groq-Model-Version` header, if any.
    pub model_version: Option<&'static str>,
}

impl Shape {
    /// Shape of an unmatched model id.
    pub const DEFAULT: Shape = Shape {
        temperature: Some(1.0),
        max_tokens: Some(1024),
        top_p: None,
        reasoning_effort: None,
        streaming: true,
        tools: false,
        model_version: None,
    };

    const fn sampled(temperature: f32, max_tokens: u32) -> Shape {
        Shape {
            temperature: Some(temperature),
            max_tokens: Some(max_tokens),
            ..Shape::DEFAULT
        }
    }

    /// Merge caller sampling into this shape.
    ///
    /// Rule values win, caller values fill the gaps, and `top_p` falls back
    /// to 1.
    pub fn sampling(&self, caller: Sampling) -> Sampling {
        Sampling {
            temperature: self.temperature.or(caller.temperature).or(Some(1.0)),
            max_tokens: self.max_tokens.or(caller.max_tokens).or(Some(1024)),
            top_p: self.top_p.or(caller.top_p).or(Some(1.0)),
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One entry of a rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub matcher: Matcher,
    pub shape: Shape,
}

/// Groq model families.
pub const GROQ: &[Rule] = &[
    Rule {
        matcher: Matcher::Exact(&["groq/compound", "groq/compound-mini"]),
        shape: Shape {
            temperature: None,
            max_tokens: Some(1024),
            tools: true,
            model_version: Some("latest"),
            ..Shape::DEFAULT
        },
    },
    Rule {
        matcher: Matcher::Exact(&["qwen/qwen3-32b"]),
        shape: Shape {
            top_p: Some(0.95),
            reasoning_effort: Some("default"),
            ..Shape::sampled(0.6, 4096)
        },
    },
    Rule {
        matcher: Matcher::Prefix("openai/gpt-oss"),
        shape: Shape {
            reasoning_effort: Some("medium"),
            ..Shape::sampled(1.0, 8192)
        },
    },
    Rule {
        matcher: Matcher::Contains(&["llama-guard"]),
        shape: Shape {
            streaming: false,
            ..Shape::sampled(0.0, 512)
        },
    },
    Rule {
        matcher: Matcher::Contains(&["kimi", "allam"]),
        shape: Shape::sampled(0.6, 4096),
    },
    Rule {
        matcher: Matcher::Contains(&["llama"]),
        shape: Shape::sampled(0.7, 8192),
    },
    Rule {
        matcher: Matcher::Contains(&["mixtral"]),
        shape: Shape::sampled(0.6, 4096),
    },
    Rule {
        matcher: Matcher::Contains(&["gemma"]),
        shape: Shape::sampled(0.7, 8192),
    },
    Rule {
        matcher: Matcher::Any,
        shape: Shape::DEFAULT,
    },
];

/// Gemini model families.
pub const GEMINI: &[Rule] = &[
    Rule {
        matcher: Matcher::Contains(&["gemma"]),
        shape: Shape::sampled(0.7, 8192),
    },
    Rule {
        matcher: Matcher::Contains(&["flash-lite"]),
        shape: Shape::sampled(1.0, 2048),
    },
    Rule {
        matcher: Matcher::Contains(&["pro"]),
        shape: Shape::sampled(1.0, 8192),
    },
    Rule {
        matcher: Matcher::Any,
        shape: Shape::DEFAULT,
    },
];

/// The rule table of a provider.
pub fn table(kind: ProviderKind) -> &'static [Rule] {
    match kind {
        ProviderKind::Groq => GROQ,
        ProviderKind::Gemini => GEMINI,
    }
}

/// Shape of `model` on `kind`: the first matching rule.
pub fn shape(kind: ProviderKind, model: &str) -> Shape {
    table(kind)
        .iter()
        .find(|rule| rule.matcher.matches(model))
        .map_or(Shape::DEFAULT, |rule| rule.shape)
}
