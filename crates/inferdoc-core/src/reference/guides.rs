//! Reference guides printed by `inferdoc guide`

use crate::config::PerformanceProfile;
use serde::Serialize;

/// Account tier and its limits
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateLimitTier {
    /// Tier name
    pub name: &'static str,
    /// Requests per second
    pub requests_per_second: &'static str,
    /// Tokens per second
    pub tokens_per_second: &'static str,
    /// Summary
    pub description: &'static str,
}

/// Characteristics of a commonly used chat model
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelProfile {
    /// Model id as listed by the provider
    pub id: &'static str,
    /// Model type
    pub kind: &'static str,
    /// Parameter count
    pub size: &'static str,
    /// Context window in tokens
    pub context_length: u32,
    /// Typical end-to-end latency
    pub typical_latency_ms: u64,
    /// Recommended uses
    pub good_for: &'static [&'static str],
}

/// Characteristics of an embedding model
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmbeddingModel {
    /// Model id
    pub id: &'static str,
    /// Vector dimensions
    pub dimensions: u32,
    /// Maximum input tokens
    pub max_input_length: u32,
    /// Recommended uses
    pub good_for: &'static [&'static str],
}

/// Latency limits for a workload profile
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PerformanceThreshold {
    /// Profile
    pub profile: PerformanceProfile,
    /// Latency above which the workload suffers
    pub max_latency_ms: u64,
    /// Latency worth a warning
    pub warning_latency_ms: u64,
    /// Summary
    pub description: &'static str,
}

/// Alerting levels for one metric
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlertThreshold {
    /// Metric name
    pub metric: &'static str,
    /// Warning level
    pub warning: f64,
    /// Critical level
    pub critical: f64,
    /// Unit of both levels
    pub unit: &'static str,
}

/// Monitoring recommendations
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Monitoring {
    /// Metrics every deployment should track
    pub essential_metrics: &'static [&'static str],
    /// Alerting levels
    pub alerting: &'static [AlertThreshold],
    /// Suggested tooling
    pub recommended_tools: &'static [&'static str],
}

impl Monitoring {
    /// Alert levels for `metric`
    #[must_use]
    pub fn threshold(&self, metric: &str) -> Option<&'static AlertThreshold> {
        self.alerting.iter().find(|a| a.metric == metric)
    }
}

/// Practices for one use case
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BestPractices {
    /// Use case
    pub use_case: &'static str,
    /// Practices
    pub practices: &'static [&'static str],
}

/// A named link
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Resource {
    /// Key
    pub name: &'static str,
    /// URL
    pub url: &'static str,
}

static RATE_LIMIT_TIERS: &[RateLimitTier] = &[
    RateLimitTier {
        name: "build_tier_1",
        requests_per_second: "1",
        tokens_per_second: "20000",
        description: "Entry level, automatic increases available",
    },
    RateLimitTier {
        name: "build_tier_2",
        requests_per_second: "5",
        tokens_per_second: "100000",
        description: "Intermediate level with higher limits",
    },
    RateLimitTier {
        name: "scale",
        requests_per_second: "Custom",
        tokens_per_second: "Unlimited",
        description: "Enterprise level with custom limits",
    },
];

static POPULAR_MODELS: &[ModelProfile] = &[
    ModelProfile {
        id: "mistralai/Mistral-7B-Instruct-v0.1",
        kind: "Chat",
        size: "7B",
        context_length: 8192,
        typical_latency_ms: 500,
        good_for: &["General chat", "Fast responses"],
    },
    ModelProfile {
        id: "meta-llama/Llama-2-7b-chat-hf",
        kind: "Chat",
        size: "7B",
        context_length: 4096,
        typical_latency_ms: 600,
        good_for: &["Conversational AI", "Code assistance"],
    },
    ModelProfile {
        id: "meta-llama/Llama-2-70b-chat-hf",
        kind: "Chat",
        size: "70B",
        context_length: 4096,
        typical_latency_ms: 2000,
        good_for: &["Complex reasoning", "High quality responses"],
    },
    ModelProfile {
        id: "NousResearch/Nous-Hermes-2-Mixtral-8x7B-DPO",
        kind: "Chat",
        size: "8x7B MoE",
        context_length: 32768,
        typical_latency_ms: 1200,
        good_for: &["Long context", "Instruction following"],
    },
    ModelProfile {
        id: "togethercomputer/RedPajama-INCITE-7B-Chat",
        kind: "Chat",
        size: "7B",
        context_length: 2048,
        typical_latency_ms: 400,
        good_for: &["Fast inference", "Simple tasks"],
    },
];

static EMBEDDING_MODELS: &[EmbeddingModel] = &[
    EmbeddingModel {
        id: "WhereIsAI/UAE-Large-V1",
        dimensions: 1024,
        max_input_length: 512,
        good_for: &["General embeddings", "Semantic search"],
    },
    EmbeddingModel {
        id: "BAAI/bge-large-en-v1.5",
        dimensions: 1024,
        max_input_length: 512,
        good_for: &["English text", "Retrieval"],
    },
];

static PERFORMANCE_THRESHOLDS: &[PerformanceThreshold] = &[
    PerformanceThreshold {
        profile: PerformanceProfile::RealTimeChat,
        max_latency_ms: 2000,
        warning_latency_ms: 1000,
        description: "Interactive chat applications",
    },
    PerformanceThreshold {
        profile: PerformanceProfile::BatchProcessing,
        max_latency_ms: 30000,
        warning_latency_ms: 10000,
        description: "Non-interactive batch jobs",
    },
    PerformanceThreshold {
        profile: PerformanceProfile::ApiBackend,
        max_latency_ms: 5000,
        warning_latency_ms: 2000,
        description: "API backend services",
    },
];

static MONITORING: Monitoring = Monitoring {
    essential_metrics: &[
        "Request success rate (%)",
        "Average response time (ms)",
        "Rate limit utilization (%)",
        "Error rate by status code",
        "Token usage per time period",
    ],
    alerting: &[
        AlertThreshold {
            metric: "error_rate",
            warning: 5.0,
            critical: 10.0,
            unit: "%",
        },
        AlertThreshold {
            metric: "response_time",
            warning: 5000.0,
            critical: 10000.0,
            unit: "ms",
        },
        AlertThreshold {
            metric: "rate_limit_usage",
            warning: 80.0,
            critical: 95.0,
            unit: "%",
        },
    ],
    recommended_tools: &[
        "Prometheus + Grafana for metrics",
        "ELK Stack for log analysis",
        "DataDog for comprehensive monitoring",
        "Custom dashboards for Together AI specific metrics",
    ],
};

static BEST_PRACTICES: &[BestPractices] = &[
    BestPractices {
        use_case: "production_deployment",
        practices: &[
            "Implement exponential backoff with jitter",
            "Use circuit breaker pattern for resilience",
            "Monitor rate limits and usage patterns",
            "Set appropriate timeout values",
            "Implement proper error handling and logging",
            "Use dedicated instances for guaranteed performance",
            "Have fallback models ready",
            "Cache responses when appropriate",
        ],
    },
    BestPractices {
        use_case: "development_testing",
        practices: &[
            "Use smaller models for faster iteration",
            "Implement rate limiting in test environment",
            "Test error scenarios thoroughly",
            "Validate input parameters before sending",
            "Use mock responses for unit testing",
            "Test with various prompt lengths and complexities",
        ],
    },
    BestPractices {
        use_case: "cost_optimization",
        practices: &[
            "Choose right-sized models for your use case",
            "Implement request caching where possible",
            "Optimize prompts to reduce token usage",
            "Use batch processing for bulk operations",
            "Monitor usage and set budget alerts",
            "Consider fine-tuning for specialized tasks",
        ],
    },
];

static DIAGNOSTIC_QUESTIONS: &[&str] = &[
    "What specific error message or status code are you receiving?",
    "When did the issue start occurring?",
    "What is the frequency of the issue (always, intermittent, specific times)?",
    "Which models are you trying to use?",
    "What is your current rate limit tier?",
    "Can you provide a sample request that's failing?",
    "Are you implementing any retry logic?",
    "Have you checked the Together AI status page?",
    "Are you experiencing this across all your applications or just specific ones?",
    "What is your typical request volume per minute/hour?",
];

static RESOURCES: &[Resource] = &[
    Resource {
        name: "status_page",
        url: "https://status.together.ai/",
    },
    Resource {
        name: "documentation",
        url: "https://docs.together.ai/",
    },
    Resource {
        name: "api_reference",
        url: "https://docs.together.ai/reference/",
    },
    Resource {
        name: "rate_limit_increase",
        url: "https://www.together.ai/forms/rate-limit-increase",
    },
    Resource {
        name: "support_contact",
        url: "https://www.together.ai/contact",
    },
    Resource {
        name: "billing_page",
        url: "https://api.together.ai/settings/billing",
    },
    Resource {
        name: "api_keys",
        url: "https://api.together.ai/settings/api-keys",
    },
    Resource {
        name: "models_endpoint",
        url: "https://api.together.xyz/models",
    },
];

/// Account tiers
#[must_use]
pub fn rate_limit_tiers() -> &'static [RateLimitTier] {
    RATE_LIMIT_TIERS
}

/// Popular chat models
#[must_use]
pub fn popular_models() -> &'static [ModelProfile] {
    POPULAR_MODELS
}

/// Profile for `id`, if it is a popular model
#[must_use]
pub fn popular_model(id: &str) -> Option<&'static ModelProfile> {
    POPULAR_MODELS.iter().find(|m| m.id == id)
}

/// Embedding models
#[must_use]
pub fn embedding_models() -> &'static [EmbeddingModel] {
    EMBEDDING_MODELS
}

/// Latency limits per workload profile
#[must_use]
pub fn performance_thresholds() -> &'static [PerformanceThreshold] {
    PERFORMANCE_THRESHOLDS
}

/// Monitoring recommendations
#[must_use]
pub fn monitoring() -> &'static Monitoring {
    &MONITORING
}

/// Best practices per use case
#[must_use]
pub fn best_practices() -> &'static [BestPractices] {
    BEST_PRACTICES
}

/// Questions support should ask first
#[must_use]
pub fn diagnostic_questions() -> &'static [&'static str] {
    DIAGNOSTIC_QUESTIONS
}

/// Useful links
#[must_use]
pub fn resources() -> &'static [Resource] {
    RESOURCES
}

/// URL of the named resource
#[must_use]
pub fn resource_url(name: &str) -> Option<&'static str> {
    RESOURCES.iter().find(|r| r.name == name).map(|r| r.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_agree_with_profiles() {
        for threshold in performance_thresholds() {
            assert_eq!(threshold.max_latency_ms, threshold.profile.threshold_ms());
            assert!(threshold.warning_latency_ms < threshold.max_latency_ms);
        }
    }

    #[test]
    fn test_popular_model_lookup() {
        assert_eq!(
            popular_model("meta-llama/Llama-2-70b-chat-hf").map(|m| m.typical_latency_ms),
            Some(2000)
        );
        assert!(popular_model("foo-7b").is_none());
    }

    #[test]
    fn test_rate_limit_alerting() {
        let usage = monitoring().threshold("rate_limit_usage").unwrap();
        assert_eq!(usage.warning, 80.0);
        assert_eq!(usage.critical, 95.0);
    }

    #[test]
    fn test_resources() {
        assert_eq!(resource_url("status_page"), Some("https://status.together.ai/"));
        assert!(resource_url("nope").is_none());
        assert_eq!(diagnostic_questions().len(), 10);
    }
}
