//! Static reference data
//!
//! Every table here is immutable, declaration-ordered data. Lookups are
//! plain scans so the matching rules stay auditable and testable.

mod error_codes;
mod guides;
mod issues;
mod rules;

pub use error_codes::{all_error_codes, lookup_error_code, ErrorCodeEntry};
pub use guides::{
    best_practices, diagnostic_questions, embedding_models, monitoring, performance_thresholds,
    popular_model, popular_models, rate_limit_tiers, resource_url, resources, AlertThreshold,
    BestPractices, EmbeddingModel, ModelProfile, Monitoring, PerformanceThreshold, RateLimitTier,
    Resource,
};
pub use issues::{default_pattern, issue_patterns, IssuePattern};
pub use rules::{diagnostic_rules, evaluate_rules, DiagnosticRule, Priority, RuleCondition};
