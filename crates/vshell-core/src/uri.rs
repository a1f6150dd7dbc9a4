#![forbid(unsafe_code)]

//! Launch-URI validation for external application targets.
//!
//! The shell hands control to an external app through a URI scheme the
//! platform launcher resolves (for example `vortex://open`). Candidates come
//! from static configuration, so a malformed entry is a packaging mistake:
//! it is dropped with a warn diagnostic rather than aborting resolution, and
//! only an empty surviving list is an error.
//!
//! # Invariants
//!
//! 1. [`resolve_candidates`] preserves the input ordering of surviving
//!    entries; callers try them in order.
//! 2. Every surviving entry has a syntactically valid RFC 3986 scheme
//!    component followed by `:`.
//! 3. Resolution has no side effect beyond the diagnostic log.
//!
//! # Failure Modes
//!
//! - All candidates malformed (or none supplied): [`ConfigError`]. This is a
//!   build-time defect, not something a user retry can fix.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Scheme configuration was unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No candidates were supplied at all.
    #[error("no launch scheme candidates configured")]
    Empty,
    /// Candidates were supplied but none survived validation.
    #[error("none of the {supplied} configured launch candidates has a valid scheme")]
    NoUsableScheme {
        /// How many candidates were supplied before filtering.
        supplied: usize,
    },
}

// ---------------------------------------------------------------------------
// Scheme validation
// ---------------------------------------------------------------------------

/// Returns `true` if `scheme` matches the RFC 3986 scheme grammar:
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
#[must_use]
pub fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Splits `uri` into `(scheme, rest)` if it has a well-formed scheme
/// component. The rest may be empty (`vortex://` and even `vortex:` are
/// acceptable launch URIs).
#[must_use]
pub fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    if uri.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    let colon = uri.find(':')?;
    let (scheme, rest) = uri.split_at(colon);
    if !is_valid_scheme(scheme) {
        return None;
    }
    Some((scheme, &rest[1..]))
}

/// Validates an ordered candidate list, dropping malformed entries with a
/// warn diagnostic and preserving the order of the rest.
///
/// Fails only when the surviving list is empty.
pub fn resolve_candidates(candidates: &[String]) -> Result<Vec<String>, ConfigError> {
    if candidates.is_empty() {
        return Err(ConfigError::Empty);
    }

    let mut resolved = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match split_scheme(candidate) {
            Some((scheme, _)) => {
                tracing::debug!(
                    target: "vshell.uri",
                    uri = %candidate,
                    scheme = %scheme,
                    "launch candidate accepted"
                );
                resolved.push(candidate.clone());
            }
            None => {
                tracing::warn!(
                    target: "vshell.uri",
                    uri = %candidate,
                    "dropping malformed launch candidate"
                );
            }
        }
    }

    if resolved.is_empty() {
        return Err(ConfigError::NoUsableScheme {
            supplied: candidates.len(),
        });
    }
    Ok(resolved)
}

// ---------------------------------------------------------------------------
// ExternalAppTarget
// ---------------------------------------------------------------------------

/// The external application the shell can hand control to.
///
/// Built once from static configuration when the owning screen mounts and
/// immutable afterwards. `candidates` is the ordered list of launch URIs to
/// probe; the first one the platform reports openable wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalAppTarget {
    display_name: String,
    candidates: Vec<String>,
}

impl ExternalAppTarget {
    /// Create a target. Requires at least one candidate; candidate syntax is
    /// checked later, per attempt, by [`resolve_candidates`].
    pub fn new(
        display_name: impl Into<String>,
        candidates: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if candidates.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(Self {
            display_name: display_name.into(),
            candidates,
        })
    }

    /// Human-readable name used in fallback notices.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The ordered, unvalidated candidate list.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

// ===========================================================================
// Tests
// ===========================================================================
