//! # Scan Target Model
//!
//! Defines what a scan is pointed at.
//!
//! * [`TargetId`]: the opaque identifier of the account or record being probed.
//! * [`UrlTemplate`]: the outbound GET URL, with `{target}` and `{candidate}`
//!   placeholders filled in per probe.

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::candidate::Candidate;
use crate::error::SweepError;

pub const TARGET_PLACEHOLDER: &str = "{target}";
pub const CANDIDATE_PLACEHOLDER: &str = "{candidate}";

/// Everything but RFC 3986 unreserved characters is escaped in identifiers.
const TARGET_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A non-blank target identifier. Surrounding whitespace is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(String);

impl TargetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TargetId {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SweepError::InvalidTarget);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A probe URL pattern such as `http://host/check?id={target}&code={candidate}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes both placeholders in a single left-to-right pass.
    ///
    /// The identifier is percent-encoded, and substituted text is never
    /// scanned again for placeholders.
    pub fn render(&self, target: &TargetId, candidate: &Candidate) -> String {
        let mut url = String::with_capacity(self.0.len() + target.as_str().len());
        let mut rest: &str = &self.0;

        while let Some(idx) = rest.find('{') {
            url.push_str(&rest[..idx]);
            let tail: &str = &rest[idx..];

            if let Some(after) = tail.strip_prefix(TARGET_PLACEHOLDER) {
                url.extend(utf8_percent_encode(target.as_str(), TARGET_ENCODE));
                rest = after;
            } else if let Some(after) = tail.strip_prefix(CANDIDATE_PLACEHOLDER) {
                // Writing into a String cannot fail
                let _ = write!(url, "{candidate}");
                rest = after;
            } else {
                url.push('{');
                rest = &tail[1..];
            }
        }

        url.push_str(rest);
        url
    }
}

impl FromStr for UrlTemplate {
    type Err = SweepError;

    /// Accepts `http://` or `https://` templates that mention `{candidate}`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SweepError::InvalidTemplate {
            template: s.to_string(),
            reason: reason.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(invalid("scheme must be http or https"));
        }
        if !s.contains(CANDIDATE_PLACEHOLDER) {
            return Err(invalid("missing {candidate} placeholder"));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_id_parsing() {
        assert_eq!(TargetId::from_str("21A91A0501").unwrap().as_str(), "21A91A0501");
        assert_eq!(TargetId::from_str("  abc \n").unwrap().as_str(), "abc");

        assert_eq!(TargetId::from_str(""), Err(SweepError::InvalidTarget));
        assert_eq!(TargetId::from_str("   "), Err(SweepError::InvalidTarget));
    }

    #[test]
    fn test_template_parsing() {
        assert!(UrlTemplate::from_str("http://127.0.0.1/v?id={target}&otp={candidate}").is_ok());
        assert!(UrlTemplate::from_str("HTTPS://example.test/{candidate}").is_ok());

        // Missing placeholder
        assert!(UrlTemplate::from_str("http://example.test/?id={target}").is_err());

        // Wrong scheme
        assert!(UrlTemplate::from_str("ftp://example.test/{candidate}").is_err());
        assert!(UrlTemplate::from_str("{candidate}").is_err());
    }

    #[test]
    fn test_template_render() {
        let template = UrlTemplate::from_str("http://h/check?id={target}&otp={candidate}").unwrap();
        let target = TargetId::from_str("R42").unwrap();
        let candidate = Candidate::new(7, 4).unwrap();

        assert_eq!(
            template.render(&target, &candidate),
            "http://h/check?id=R42&otp=0007"
        );
    }

    #[test]
    fn test_template_render_escapes_target() {
        let template = UrlTemplate::from_str("http://h/check?id={target}&otp={candidate}").unwrap();
        let candidate = Candidate::new(1, 4).unwrap();
        let render = |raw: &str| template.render(&TargetId::from_str(raw).unwrap(), &candidate);

        // A fragment marker must not swallow the candidate
        assert_eq!(render("R1#x"), "http://h/check?id=R1%23x&otp=0001");

        // No smuggled query parameters
        assert_eq!(
            render("R1&otp=9999"),
            "http://h/check?id=R1%26otp%3D9999&otp=0001"
        );

        // Placeholders inside the identifier are not expanded
        assert_eq!(
            render("R{candidate}"),
            "http://h/check?id=R%7Bcandidate%7D&otp=0001"
        );

        // Unreserved characters pass through untouched
        assert_eq!(render("a-b.c_d~e"), "http://h/check?id=a-b.c_d~e&otp=0001");
    }

    #[test]
    fn test_template_render_keeps_unknown_braces() {
        let template = UrlTemplate::from_str("http://h/{x}/{candidate}{").unwrap();
        let target = TargetId::from_str("t").unwrap();
        let candidate = Candidate::new(12, 4).unwrap();

        assert_eq!(template.render(&target, &candidate), "http://h/{x}/0012{");
    }
}
