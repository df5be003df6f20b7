//! Customer issue playbook
//!
//! Patterns are tried in declaration order; the first one with any keyword
//! contained in the (lowercased) complaint wins. Keywords are lowercase.

use serde::Serialize;

/// A known class of customer complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssuePattern {
    /// Stable identifier
    pub id: &'static str,
    /// Heading shown to the user
    pub title: &'static str,
    /// Lowercase substrings that select this pattern
    pub keywords: &'static [&'static str],
    /// What is most likely going on
    pub diagnosis: &'static str,
    /// Possible causes
    pub causes: &'static [&'static str],
    /// Recommended actions, verbatim
    pub remedy: &'static str,
    /// What support should look at
    pub investigation_steps: &'static [&'static str],
    /// When to escalate beyond first-line support
    pub escalation_criteria: &'static [&'static str],
}

static ISSUE_PATTERNS: &[IssuePattern] = &[
    IssuePattern {
        id: "service_unavailable",
        title: "503 Service Unavailable",
        keywords: &["503", "service unavailable"],
        diagnosis: "The provider is temporarily unable to serve requests",
        causes: &[
            "Together AI servers are temporarily overloaded",
            "Scheduled maintenance or capacity issues",
            "Regional outages or network problems",
        ],
        remedy: "1. Check status.together.ai for known issues\n\
                 2. Implement retry logic with exponential backoff\n\
                 3. Consider switching to dedicated instances for guaranteed capacity\n\
                 4. If persistent, contact Together AI support",
        investigation_steps: &[
            "Check Together AI status page for incidents",
            "Review customer's request patterns for traffic spikes",
            "Verify if customer is on appropriate tier for their usage",
            "Check if specific models are experiencing issues",
            "Review retry logic implementation",
        ],
        escalation_criteria: &[
            "503 errors persist for >30 minutes",
            "Multiple customers affected",
            "No incidents on status page",
            "Customer has dedicated instances still failing",
        ],
    },
    IssuePattern {
        id: "rate_limit_exceeded",
        title: "429 Rate Limit Exceeded",
        keywords: &["429", "rate limit"],
        diagnosis: "Requests or tokens per second exceed the account's rate limit tier",
        causes: &[
            "Exceeding requests per second (RPS) limits",
            "Exceeding tokens per second (TPS) limits",
            "Burst traffic patterns overwhelming limits",
        ],
        remedy: "1. Implement request queuing and rate limiting\n\
                 2. Use exponential backoff for retries\n\
                 3. Monitor rate limit headers in responses\n\
                 4. Request higher limits at together.ai/forms/rate-limit-increase\n\
                 5. Consider upgrading to Scale or Enterprise tiers",
        investigation_steps: &[
            "Check customer's current rate limit tier and usage",
            "Analyze request patterns for bursts vs steady load",
            "Review if rate limit headers are being monitored",
            "Verify proper retry implementation",
            "Check if multiple API keys are being used properly",
        ],
        escalation_criteria: &[
            "Customer has legitimate high-volume use case",
            "Rate limit increase needed urgently",
            "Technical solutions not sufficient",
        ],
    },
    IssuePattern {
        id: "authentication_failed",
        title: "401 Authentication Failed",
        keywords: &["401", "authentication"],
        diagnosis: "The API key is missing, invalid or sent in the wrong format",
        causes: &[
            "Invalid or expired API key",
            "API key not included in Authorization header",
            "Incorrect header format",
        ],
        remedy: "1. Verify API key at api.together.ai Settings > API Keys\n\
                 2. Ensure header format: \"Authorization: Bearer YOUR_API_KEY\"\n\
                 3. Regenerate API key if compromised\n\
                 4. Check if API key has required permissions",
        investigation_steps: &[
            "Verify API key format and validity",
            "Check if API key was recently regenerated",
            "Review Authorization header implementation",
            "Test with known working API key",
            "Check for any account billing issues",
        ],
        escalation_criteria: &[
            "API key appears valid but still failing",
            "Authentication works intermittently",
            "Account-level issues detected",
        ],
    },
    IssuePattern {
        id: "bad_request",
        title: "400 Bad Request",
        keywords: &["400", "bad request"],
        diagnosis: "The request payload was rejected as malformed",
        causes: &[
            "Invalid request format or parameters",
            "Missing required fields (model, prompt)",
            "Invalid model name or unavailable model",
            "Excessive max_tokens parameter",
        ],
        remedy: "1. Validate request payload against API documentation\n\
                 2. Check model name using /models endpoint\n\
                 3. Ensure max_tokens is within model limits\n\
                 4. Verify all required fields are present",
        investigation_steps: &[
            "Collect a sample failing request",
            "Compare the payload against the API reference",
            "Check the model name against the /models listing",
        ],
        escalation_criteria: &["Payload is valid per the API reference but still rejected"],
    },
    IssuePattern {
        id: "slow_performance",
        title: "Timeout/Slow Response Issues",
        keywords: &["timeout", "slow"],
        diagnosis: "Responses take longer than the client is willing to wait",
        causes: &[
            "Large models taking longer to generate responses",
            "High system load during peak hours",
            "Complex prompts requiring more processing",
            "Network latency issues",
        ],
        remedy: "1. Increase client timeout values\n\
                 2. Use smaller/faster models for time-critical applications\n\
                 3. Implement async processing for long requests\n\
                 4. Consider dedicated instances for consistent performance\n\
                 5. Optimize prompts to be more specific and concise",
        investigation_steps: &[
            "Measure actual response times for customer's models",
            "Check if customer is using appropriate model size",
            "Review prompt complexity and length",
            "Verify customer's geographic location vs server regions",
            "Check if customer is on shared vs dedicated infrastructure",
        ],
        escalation_criteria: &[
            "Performance significantly worse than SLA",
            "Performance degradation across multiple models",
            "Customer has dedicated instances with poor performance",
        ],
    },
    IssuePattern {
        id: "model_unavailable",
        title: "Model Unavailable",
        keywords: &["404", "model not found", "model unavailable", "unknown model"],
        diagnosis: "The requested model is not in the catalog available to this account",
        causes: &[
            "Model name misspelled or deprecated",
            "Model not available in the customer's tier",
            "Model requires special access",
        ],
        remedy: "1. Provide current model list and alternatives\n\
                 2. Guide through tier upgrade if needed\n\
                 3. Suggest similar models with equivalent capabilities\n\
                 4. Update to newer model versions if deprecated",
        investigation_steps: &[
            "Check if model exists in current model catalog",
            "Verify model availability in customer's tier",
            "Check for model deprecation or updates",
            "Review any special access requirements",
            "Test model availability with internal tools",
        ],
        escalation_criteria: &[
            "Model should be available but returns errors",
            "Customer has paid tier but cannot access expected models",
            "Model availability inconsistent",
        ],
    },
];

static DEFAULT_PATTERN: IssuePattern = IssuePattern {
    id: "general",
    title: "General Troubleshooting Steps",
    keywords: &[],
    diagnosis: "No known issue pattern matched the description",
    causes: &[],
    remedy: "1. Run full diagnostic using this tool\n\
             2. Check Together AI status page\n\
             3. Verify API key and permissions\n\
             4. Test with different models and simple prompts\n\
             5. Implement proper error handling and retries\n\
             6. Monitor rate limits and usage patterns\n\
             7. Contact Together AI support with specific error details",
    investigation_steps: &[
        "Collect detailed error logs and request/response examples",
        "Check error frequency and patterns",
        "Review recent changes to customer's implementation",
        "Test with simplified request payloads",
        "Check for any infrastructure issues",
    ],
    escalation_criteria: &[
        "Errors cannot be reproduced or explained",
        "Errors indicate potential service bugs",
        "Customer impact is severe",
    ],
};

/// Known patterns in match order
#[must_use]
pub fn issue_patterns() -> &'static [IssuePattern] {
    ISSUE_PATTERNS
}

/// Fallback returned when nothing matches
#[must_use]
pub fn default_pattern() -> &'static IssuePattern {
    &DEFAULT_PATTERN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lowercase_and_present() {
        for pattern in issue_patterns() {
            assert!(!pattern.keywords.is_empty(), "{} has no keywords", pattern.id);
            for keyword in pattern.keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
            assert!(!pattern.remedy.is_empty());
        }
    }

    #[test]
    fn test_default_mentions_support() {
        assert!(default_pattern().keywords.is_empty());
        assert!(default_pattern().remedy.contains("Contact Together AI support"));
    }

    #[test]
    fn test_remedy_lines_are_unindented() {
        let remedy = issue_patterns()[0].remedy;
        for line in remedy.lines() {
            assert!(!line.starts_with(' '), "indented line: {line:?}");
        }
    }
}
