//! Static catalog of models available through the GLHF API.
//!
//! Pure lookup tables: validation, default selection, and the ordered
//! fallback list used when a requested model turns out to be unavailable
//! upstream. No side effects and no failure modes.

use serde::Serialize;

/// Metadata for one catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Identifier used in API calls, e.g. `hf:meta-llama/Llama-3.3-70B-Instruct`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Default generation token budget.
    pub max_tokens: u32,
    /// Context window size in tokens.
    pub context_size: u32,
    /// Input price per million tokens.
    pub price_input: &'static str,
    /// Output price per million tokens.
    pub price_output: &'static str,
    /// Human-readable capability summary.
    pub description: &'static str,
}

/// Model used when the caller requests nothing valid and no fallback matches.
pub const DEFAULT_MODEL: &str = "hf:meta-llama/Meta-Llama-3.1-70B-Instruct";

/// Ordered fallback candidates, most capable first.
const FALLBACK_MODELS: &[&str] = &[
    "hf:meta-llama/Meta-Llama-3.1-70B-Instruct",
    "hf:meta-llama/Llama-4-Maverick-17B-128E-Instruct-FP8",
    "hf:meta-llama/Meta-Llama-3.1-8B-Instruct",
];

const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "hf:meta-llama/Llama-4-Maverick-17B-128E-Instruct-FP8",
        name: "Llama-4-Maverick-17B",
        max_tokens: 500,
        context_size: 524_000,
        price_input: "$0.22/mtok",
        price_output: "$0.88/mtok",
        description: "The largest of Meta's Llama 4 family. Cost-effective and comparable to DeepSeek V3 at coding.",
    },
    ModelInfo {
        id: "hf:meta-llama/Llama-4-Scout-17B-16E-Instruct",
        name: "Llama-4-Scout-17B",
        max_tokens: 300,
        context_size: 328_000,
        price_input: "$0.15/mtok",
        price_output: "$0.60/mtok",
        description: "Small, fast, cheap variant of Llama 4. Outperforms Gemma 3, Mistral 3.1.",
    },
    ModelInfo {
        id: "hf:meta-llama/Meta-Llama-3.1-405B-Instruct",
        name: "Meta-Llama-3.1-405B",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$3.00/mtok",
        price_output: "$3.00/mtok",
        description: "Meta's largest model. Friendly, smart, and a strong creative writer.",
    },
    ModelInfo {
        id: "hf:meta-llama/Meta-Llama-3.1-70B-Instruct",
        name: "Meta-Llama-3.1-70B",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.90/mtok",
        price_output: "$0.90/mtok",
        description: "The 70b version of Meta's premiere 3.1 series. Friendly, smart, and a strong creative writer.",
    },
    ModelInfo {
        id: "hf:meta-llama/Meta-Llama-3.1-8B-Instruct",
        name: "Meta-Llama-3.1-8B",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.20/mtok",
        price_output: "$0.20/mtok",
        description: "The 8b version of Meta's premiere 3.1 series. Friendly, smart, and a strong creative writer.",
    },
    ModelInfo {
        id: "hf:meta-llama/Llama-3.2-3B-Instruct",
        name: "Llama-3.2-3B",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.10/mtok",
        price_output: "$0.10/mtok",
        description: "A small, fast, 3B variant of the Llama 3 series.",
    },
    ModelInfo {
        id: "hf:meta-llama/Llama-3.3-70B-Instruct",
        name: "Llama-3.3-70B",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.90/mtok",
        price_output: "$0.90/mtok",
        description: "Meta's newest model. Faster than Llama 3.1 405b, but benchmarks similarly.",
    },
    ModelInfo {
        id: "hf:nvidia/Llama-3.1-Nemotron-70B-Instruct-HF",
        name: "Llama-3.1-Nemotron-70B",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.90/mtok",
        price_output: "$0.90/mtok",
        description: "Nvidia fine-tuned Llama 3.1 70B to handle harder questions.",
    },
    ModelInfo {
        id: "hf:mistralai/Mixtral-8x22B-Instruct-v0.1",
        name: "Mixtral-8x22B",
        max_tokens: 64,
        context_size: 64_000,
        price_input: "$1.20/mtok",
        price_output: "$1.20/mtok",
        description: "Mistral's largest fully-open model fine-tuned for instruction following.",
    },
    ModelInfo {
        id: "hf:NousResearch/Nous-Hermes-2-Mixtral-8x7B-DPO",
        name: "Nous-Hermes-2-Mixtral",
        max_tokens: 32,
        context_size: 32_000,
        price_input: "$0.60/mtok",
        price_output: "$0.60/mtok",
        description: "Nous Research's finetune of the Mixtral 8x7B model.",
    },
    ModelInfo {
        id: "hf:Qwen/Qwen2.5-7B-Instruct",
        name: "Qwen2.5-7B",
        max_tokens: 32,
        context_size: 32_000,
        price_input: "$0.18/mtok",
        price_output: "$0.18/mtok",
        description: "The 7B version of Alibaba's Qwen2.5 series. Fast but least powerful.",
    },
    ModelInfo {
        id: "hf:Qwen/Qwen2.5-Coder-32B-Instruct",
        name: "Qwen2.5-Coder-32B",
        max_tokens: 32,
        context_size: 32_000,
        price_input: "$0.80/mtok",
        price_output: "$0.80/mtok",
        description: "One of the current best coding-focused open models.",
    },
    ModelInfo {
        id: "hf:Qwen/Qwen2.5-72B-Instruct",
        name: "Qwen2.5-72B",
        max_tokens: 32,
        context_size: 32_000,
        price_input: "$0.90/mtok",
        price_output: "$0.90/mtok",
        description: "Alibaba's largest open model. Close to Meta Llama 3 at English tasks.",
    },
    ModelInfo {
        id: "hf:deepseek-ai/DeepSeek-V3",
        name: "DeepSeek-V3",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$1.25/mtok",
        price_output: "$1.25/mtok",
        description: "Competitive with Claude and surpassing GPT-4o on coding problems.",
    },
    ModelInfo {
        id: "hf:deepseek-ai/DeepSeek-V3-0324",
        name: "DeepSeek-V3-0324",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$1.20/mtok",
        price_output: "$1.20/mtok",
        description: "Updated DeepSeek V3 checkpoint with improved reasoning.",
    },
    ModelInfo {
        id: "hf:deepseek-ai/DeepSeek-R1",
        name: "DeepSeek-R1",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.55/mtok",
        price_output: "$2.19/mtok",
        description: "A fast reasoning model that outperforms o1-mini.",
    },
    ModelInfo {
        id: "hf:deepseek-ai/DeepSeek-R1-Distill-Llama-70B",
        name: "DeepSeek-R1-Distill-Llama",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.90/mtok",
        price_output: "$0.90/mtok",
        description: "R1 reasoning distilled into a Llama 70B base.",
    },
    ModelInfo {
        id: "hf:reissbaker/llama-3.1-70b-abliterated-lora",
        name: "Llama-3.1-70b-abliterated",
        max_tokens: 128,
        context_size: 128_000,
        price_input: "$0.90/mtok",
        price_output: "$0.90/mtok",
        description: "An uncensored, always-on LoRA version of Llama 3.1 70B Instruct.",
    },
];

/// The full catalog, in display order.
pub fn all() -> &'static [ModelInfo] {
    MODELS
}

/// Membership check against the catalog.
pub fn is_valid(id: &str) -> bool {
    MODELS.iter().any(|m| m.id == id)
}

/// Look up catalog metadata for a model id.
pub fn get(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}

/// Resolve the model to use for a request.
///
/// Returns the requested id when it is in the catalog, otherwise the
/// first valid entry of the fallback list, otherwise [`DEFAULT_MODEL`].
pub fn select_model(requested: Option<&str>) -> &'static str {
    if let Some(id) = requested {
        if let Some(info) = get(id) {
            return info.id;
        }
    }
    FALLBACK_MODELS
        .iter()
        .copied()
        .find(|id| is_valid(id))
        .unwrap_or(DEFAULT_MODEL)
}

/// The model the relay retries against after an upstream "model not found".
pub fn fallback_model() -> &'static str {
    FALLBACK_MODELS[0]
}
