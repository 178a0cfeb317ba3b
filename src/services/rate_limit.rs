//! Rate-Limit Detector
//!
//! Classifies GitHub API responses that indicate quota exhaustion and turns
//! them into an operator-readable notice with the reset time when known.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Structured description of an exhausted GitHub rate limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitNotice {
    /// Human-readable message including reset time and remediation
    pub message: String,
    /// Moment the quota window reopens, when GitHub reported one
    pub reset_at: Option<DateTime<Utc>>,
}

/// Inspect a GitHub response envelope for quota exhaustion.
///
/// GitHub signals an exhausted limit either with 429 or with 403 plus
/// `X-RateLimit-Remaining: 0`. A plain 403 (private repository, blocked
/// token) is not a rate limit and returns `None`. This never fails; an
/// unparsable reset header only drops the reset clause from the message.
pub fn detect(status: StatusCode, headers: &HeaderMap) -> Option<RateLimitNotice> {
    let quota_exhausted = header_str(headers, REMAINING_HEADER)
        .map(|v| v.trim() == "0")
        .unwrap_or(false);

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && quota_exhausted);
    if !rate_limited {
        return None;
    }

    let reset_at = header_str(headers, RESET_HEADER)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    let mut message = String::from("GitHub API rate limit exceeded.");
    if let Some(reset_at) = reset_at {
        message.push_str(&format!(
            " The limit resets at {} UTC.",
            reset_at.format("%H:%M:%S")
        ));
    }
    message.push_str(" Set the GITHUB_TOKEN environment variable to raise the limit.");

    Some(RateLimitNotice { message, reset_at })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn plain_429_is_rate_limited() {
        let notice = detect(StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new()).unwrap();
        assert!(notice.message.starts_with("GitHub API rate limit exceeded."));
        assert!(notice.message.contains("GITHUB_TOKEN"));
        assert!(notice.reset_at.is_none());
        assert!(!notice.message.contains("resets at"));
    }

    #[test]
    fn forbidden_with_zero_remaining_is_rate_limited() {
        // 1735693265 = 2025-01-01 01:01:05 UTC
        let headers = headers(&[
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1735693265"),
        ]);

        let notice = detect(StatusCode::FORBIDDEN, &headers).unwrap();
        assert!(notice.message.contains("The limit resets at 01:01:05 UTC."));
        assert_eq!(
            notice.reset_at,
            DateTime::from_timestamp(1_735_693_265, 0)
        );
    }

    #[test]
    fn forbidden_with_quota_left_is_not_rate_limited() {
        let headers = headers(&[("x-ratelimit-remaining", "37")]);
        assert!(detect(StatusCode::FORBIDDEN, &headers).is_none());
    }

    #[test]
    fn forbidden_without_quota_headers_is_not_rate_limited() {
        assert!(detect(StatusCode::FORBIDDEN, &HeaderMap::new()).is_none());
    }

    #[test]
    fn success_statuses_are_never_rate_limited() {
        let headers = headers(&[("x-ratelimit-remaining", "0")]);
        assert!(detect(StatusCode::OK, &headers).is_none());
    }

    #[test]
    fn unparsable_reset_header_drops_the_reset_clause() {
        let headers = headers(&[
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "soon"),
        ]);

        let notice = detect(StatusCode::FORBIDDEN, &headers).unwrap();
        assert!(notice.reset_at.is_none());
        assert!(!notice.message.contains("resets at"));
        assert!(notice.message.contains("GITHUB_TOKEN"));
    }
}
