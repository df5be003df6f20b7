//! HTTP status code table

use serde::Serialize;

/// Causes and solutions for one HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorCodeEntry {
    /// HTTP status code
    pub code: u16,
    /// Reason phrase
    pub name: &'static str,
    /// Common causes, most likely first
    pub causes: &'static [&'static str],
    /// Solutions, in the order they should be tried
    pub solutions: &'static [&'static str],
}

static ERROR_CODES: &[ErrorCodeEntry] = &[
    ErrorCodeEntry {
        code: 400,
        name: "Bad Request",
        causes: &[
            "Invalid request format",
            "Missing required parameters (model, prompt)",
            "Invalid model name",
            "max_tokens exceeds model limit",
            "Invalid parameter values",
        ],
        solutions: &[
            "Validate request payload format",
            "Check model name against /models endpoint",
            "Reduce max_tokens parameter",
            "Ensure all required fields are present",
            "Verify parameter data types",
        ],
    },
    ErrorCodeEntry {
        code: 401,
        name: "Unauthorized",
        causes: &[
            "Invalid API key",
            "Missing Authorization header",
            "Expired API key",
            "Incorrect header format",
        ],
        solutions: &[
            "Verify API key at api.together.ai",
            "Use format: 'Authorization: Bearer YOUR_API_KEY'",
            "Regenerate API key if needed",
            "Check API key permissions",
        ],
    },
    ErrorCodeEntry {
        code: 404,
        name: "Not Found",
        causes: &[
            "Invalid endpoint URL",
            "Model not available",
            "Incorrect API version",
        ],
        solutions: &[
            "Check endpoint URL spelling",
            "Verify model exists in /models list",
            "Use correct base URL: https://api.together.xyz",
        ],
    },
    ErrorCodeEntry {
        code: 429,
        name: "Rate Limit Exceeded",
        causes: &[
            "Too many requests per second (RPS)",
            "Too many tokens per second (TPS)",
            "Burst traffic patterns",
            "Insufficient rate limit tier",
        ],
        solutions: &[
            "Implement exponential backoff",
            "Add request queuing",
            "Monitor rate limit headers",
            "Request higher limits",
            "Upgrade to Scale/Enterprise tier",
        ],
    },
    ErrorCodeEntry {
        code: 500,
        name: "Internal Server Error",
        causes: &[
            "Server-side processing error",
            "Model inference failure",
            "Temporary system issues",
        ],
        solutions: &[
            "Retry request after delay",
            "Check Together AI status page",
            "Try different model",
            "Contact support if persistent",
        ],
    },
    ErrorCodeEntry {
        code: 503,
        name: "Service Unavailable",
        causes: &[
            "Server overload",
            "Scheduled maintenance",
            "Capacity issues",
            "Regional outages",
        ],
        solutions: &[
            "Check status.together.ai",
            "Implement retry with backoff",
            "Switch to dedicated instances",
            "Use different region if available",
        ],
    },
];

/// Entry for `code`, if the table knows it
#[must_use]
pub fn lookup_error_code(code: u16) -> Option<&'static ErrorCodeEntry> {
    ERROR_CODES.iter().find(|e| e.code == code)
}

/// The whole table, ordered by code
#[must_use]
pub fn all_error_codes() -> &'static [ErrorCodeEntry] {
    ERROR_CODES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_code_has_causes_and_solutions() {
        for code in [400u16, 401, 404, 429, 500, 503] {
            let entry = lookup_error_code(code).unwrap();
            assert_eq!(entry.code, code);
            assert!(!entry.causes.is_empty(), "{code} has no causes");
            assert!(!entry.solutions.is_empty(), "{code} has no solutions");
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<u16> = all_error_codes().iter().map(|e| e.code).collect();
        assert_eq!(codes.len(), all_error_codes().len());
    }

    #[test]
    fn test_unknown_code() {
        assert!(lookup_error_code(418).is_none());
        assert!(lookup_error_code(0).is_none());
    }
}
