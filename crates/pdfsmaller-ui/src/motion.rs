//! Reduced-motion probe.
//!
//! When the environment prefers reduced motion the mode-transition
//! window collapses to zero and no animation classes are toggled; the
//! core makes the lockout unobservable in that case.

/// Whether the environment asks for reduced motion.
///
/// Defaults to `false` when the media-query API is unavailable.
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .is_some_and(|query| query.matches())
}
