//! The built-in catalog.

use crate::model::{
    Category, ModelDescriptor as M,
    ProviderKind::{Gemini, Groq},
    Tier::*,
};

/// Image model used when a prompt asks for a picture.
pub const DEFAULT_IMAGE_MODEL: &str = "pollinations/flux-pro";

/// Models accepted by the live voice channel, as `(id, name)`.
pub const LIVE_MODELS: &[(&str, &str)] = &[
    ("gemini-2.5-flash", "Gemini 2.5 Flash Live"),
    ("gemini-2.0-flash-exp", "Gemini 2.0 Flash Live"),
];

const LLAMA_70B: M = M::new("llama-3.3-70b-versatile", "Llama 3.3 70B", Groq, Balanced);
const LLAMA_8B: M = M::new("llama-3.1-8b-instant", "Llama 3.1 8B", Groq, Fast);

/// Every category in display order.
pub const CATEGORIES: &[Category] = &[
    Category {
        id: "auto",
        name: "Auto",
        models: &[M::new("auto", "Auto (Smart Router)", Groq, Balanced)],
    },
    Category {
        id: "gemini",
        name: "Gemini",
        models: &[
            M::new("gemini-3-pro-preview", "Gemini 3 Pro (Preview)", Gemini, Reasoning),
            M::new("gemini-2.5-pro", "Gemini 2.5 Pro", Gemini, Reasoning),
            M::new("gemini-2.5-flash", "Gemini 2.5 Flash", Gemini, Fast),
            M::new("gemini-2.5-flash-lite", "Gemini 2.5 Flash Lite", Gemini, Fast),
            M::new("gemma-2-27b-it", "Gemma 2 27B", Gemini, Balanced),
            M::new("gemma-2-9b-it", "Gemma 2 9B", Gemini, Balanced),
        ],
    },
    Category {
        id: "openai",
        name: "Groq/OpenAI",
        models: &[
            M::new("openai/gpt-oss-120b", "GPT-OSS 120B", Groq, Reasoning),
            M::new("openai/gpt-oss-20b", "GPT-OSS 20B", Groq, Fast),
            M::new("groq/compound", "Compound", Groq, Balanced),
            M::new("groq/compound-mini", "Compound Mini", Groq, Fast),
            M::new("qwen/qwen3-32b", "Qwen3 32B", Groq, Reasoning),
            LLAMA_70B,
            M::new("mixtral-8x7b-32768", "Mixtral 8x7B", Groq, Balanced),
        ],
    },
    Category {
        id: "meta",
        name: "Meta",
        models: &[
            LLAMA_70B,
            LLAMA_8B,
            M::new("llama-guard-3-8b", "Llama Guard 3 8B", Groq, Fast),
        ],
    },
    Category {
        id: "moonshot",
        name: "Moonshot",
        models: &[M::new("moonshotai/kimi-k2-instruct", "Kimi K2", Groq, Creative)],
    },
    Category {
        id: "image",
        name: "Image",
        models: &[
            M::new("imagen-3.0-generate-001", "Imagen 3", Gemini, Image),
            M::new(DEFAULT_IMAGE_MODEL, "FLUX Pro", Gemini, Image),
            M::new("pollinations/flux-realism", "Realism", Gemini, Image),
        ],
    },
];
