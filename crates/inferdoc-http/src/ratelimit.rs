//! Rate-limit header inspection
//!
//! Providers expose quota state in response headers with several naming
//! schemes (`x-ratelimit-limit-requests`, `x-rate-limit-remaining`,
//! `anthropic-ratelimit-tokens-used`, ...). Any header whose lowercase name
//! contains `rate-limit` or `ratelimit` is captured; limit/remaining/used
//! values are grouped per dimension (requests or tokens).

use reqwest::header::HeaderMap;
use serde::Serialize;

/// Name fragments that mark a header as rate-limit related
const RATE_LIMIT_MARKERS: &[&str] = &["rate-limit", "ratelimit"];

/// Whether a header name carries rate-limit information
#[must_use]
pub fn is_rate_limit_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|m| lower.contains(m))
}

/// A captured rate-limit header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitHeader {
    /// Lowercase header name
    pub name: String,
    /// Raw header value
    pub value: String,
}

/// Quota dimension a header refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitDimension {
    /// Requests per window
    Requests,
    /// Tokens per window
    Tokens,
}

impl std::fmt::Display for LimitDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Requests => write!(f, "requests"),
            Self::Tokens => write!(f, "tokens"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderRole {
    Limit,
    Remaining,
    Used,
    Other,
}

#[derive(Debug, Default, Clone, Copy)]
struct QuotaCounters {
    limit: Option<u64>,
    remaining: Option<u64>,
    used: Option<u64>,
}

impl QuotaCounters {
    fn utilization(&self, dimension: LimitDimension) -> Option<Utilization> {
        let limit = self.limit.filter(|l| *l > 0)?;
        let used = self
            .used
            .or_else(|| self.remaining.map(|r| limit.saturating_sub(r)))?;
        Some(Utilization {
            dimension,
            used,
            limit,
        })
    }
}

/// Used vs. allocated quota for one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Utilization {
    /// Which quota this refers to
    pub dimension: LimitDimension,
    /// Quota consumed in the current window
    pub used: u64,
    /// Quota allocated for the window
    pub limit: u64,
}

impl Utilization {
    /// Utilization in percent (`used * 100 / limit`)
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.used as f64 * 100.0) / self.limit as f64
    }
}

/// Rate-limit state extracted from one response
#[derive(Debug, Clone, Default)]
pub struct RateLimitSnapshot {
    headers: Vec<RateLimitHeader>,
    requests: QuotaCounters,
    tokens: QuotaCounters,
}

impl RateLimitSnapshot {
    /// Capture every rate-limit header in the map.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut snapshot = Self::default();

        for (name, value) in headers {
            let name = name.as_str().to_ascii_lowercase();
            if !is_rate_limit_header(&name) {
                continue;
            }
            let value = value.to_str().unwrap_or_default().trim().to_string();

            let counters = match dimension_of(&name) {
                LimitDimension::Requests => &mut snapshot.requests,
                LimitDimension::Tokens => &mut snapshot.tokens,
            };
            if let Some(count) = parse_count(&value) {
                match role_of(&name) {
                    HeaderRole::Limit => counters.limit = Some(count),
                    HeaderRole::Remaining => counters.remaining = Some(count),
                    HeaderRole::Used => counters.used = Some(count),
                    HeaderRole::Other => {}
                }
            }

            snapshot.headers.push(RateLimitHeader { name, value });
        }

        snapshot.headers.sort_by(|a, b| a.name.cmp(&b.name));
        snapshot
    }

    /// Captured headers, sorted by name
    #[must_use]
    pub fn headers(&self) -> &[RateLimitHeader] {
        &self.headers
    }

    /// Whether no rate-limit header was present at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Utilization of the most constrained dimension, when computable.
    #[must_use]
    pub fn utilization(&self) -> Option<Utilization> {
        let requests = self.requests.utilization(LimitDimension::Requests);
        let tokens = self.tokens.utilization(LimitDimension::Tokens);
        match (requests, tokens) {
            (Some(r), Some(t)) => Some(if t.percent() > r.percent() { t } else { r }),
            (r, t) => r.or(t),
        }
    }
}

/// `Retry-After` header in seconds, if present and numeric
#[must_use]
pub fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn dimension_of(name: &str) -> LimitDimension {
    if name.contains("token") {
        LimitDimension::Tokens
    } else {
        LimitDimension::Requests
    }
}

fn role_of(name: &str) -> HeaderRole {
    if name.contains("reset") || name.contains("retry") || name.contains("policy") {
        HeaderRole::Other
    } else if name.contains("remaining") {
        HeaderRole::Remaining
    } else if name.contains("used") {
        HeaderRole::Used
    } else {
        HeaderRole::Limit
    }
}

/// Parse the leading count of a header value ("60", "60;w=60", "1500.0").
fn parse_count(value: &str) -> Option<u64> {
    let head = value
        .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
        .next()?;
    if let Ok(n) = head.parse::<u64>() {
        return Some(n);
    }
    head.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f as u64)
}
