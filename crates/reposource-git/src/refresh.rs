//! Refresh policy for fetched repository content.
//!
//! The policy is a value only: the scheduler that acts on it lives outside
//! this crate.

use std::time::{Duration, Instant};

/// Shortest refresh interval accepted, in seconds.
pub const MIN_REFRESH_SECS: u32 = 5;

/// Validation message for an enabled interval below [`MIN_REFRESH_SECS`].
pub const REFRESH_TOO_SHORT: &str = "Refresh rate must be at least 5 seconds or more.";

/// How often fetched content is considered stale.
///
/// `0` seconds disables refreshing: content is fetched once and kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RefreshPolicy {
    secs: u32,
}

impl RefreshPolicy {
    /// A policy that never refreshes.
    pub fn never() -> Self {
        Self { secs: 0 }
    }

    /// A policy refreshing every `secs` seconds (`0` = never).
    pub fn from_secs(secs: u32) -> Self {
        Self { secs }
    }

    /// The configured interval in seconds.
    pub fn secs(&self) -> u32 {
        self.secs
    }

    /// Returns true if content is refreshed periodically.
    pub fn is_enabled(&self) -> bool {
        self.secs > 0
    }

    /// The refresh interval, `None` when refreshing is disabled.
    pub fn interval(&self) -> Option<Duration> {
        self.is_enabled()
            .then(|| Duration::from_secs(u64::from(self.secs)))
    }

    /// Returns the validation message if the interval is too short.
    pub fn validate(&self) -> Option<&'static str> {
        (self.is_enabled() && self.secs < MIN_REFRESH_SECS).then_some(REFRESH_TOO_SHORT)
    }

    /// Returns true if content fetched at `last_refresh` must be re-fetched.
    ///
    /// Content that was never fetched is always stale; with refreshing
    /// disabled, fetched content never goes stale.
    pub fn is_stale(&self, last_refresh: Option<Instant>) -> bool {
        self.is_stale_after(last_refresh.map(|t| t.elapsed()))
    }

    /// Like [`is_stale`](Self::is_stale), given the time elapsed since the
    /// last fetch.
    pub fn is_stale_after(&self, elapsed: Option<Duration>) -> bool {
        match (elapsed, self.interval()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(elapsed), Some(interval)) => elapsed >= interval,
        }
    }
}

impl From<u32> for RefreshPolicy {
    fn from(secs: u32) -> Self {
        Self::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_never_refreshes() {
        let policy = RefreshPolicy::default();
        assert_eq!(policy, RefreshPolicy::never());
        assert!(!policy.is_enabled());
        assert_eq!(policy.interval(), None);
        assert_eq!(policy.validate(), None);
    }

    #[test]
    fn test_validate_bounds() {
        for secs in 1..MIN_REFRESH_SECS {
            assert_eq!(RefreshPolicy::from_secs(secs).validate(), Some(REFRESH_TOO_SHORT));
        }
        assert_eq!(RefreshPolicy::from_secs(0).validate(), None);
        assert_eq!(RefreshPolicy::from_secs(5).validate(), None);
        assert_eq!(RefreshPolicy::from_secs(3600).validate(), None);
    }

    #[test]
    fn test_interval() {
        assert_eq!(
            RefreshPolicy::from(30).interval(),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_never_fetched_is_stale() {
        assert!(RefreshPolicy::never().is_stale(None));
        assert!(RefreshPolicy::from_secs(60).is_stale(None));
    }

    #[test]
    fn test_disabled_policy_never_goes_stale() {
        let policy = RefreshPolicy::never();
        assert!(!policy.is_stale(Some(Instant::now())));
        assert!(!policy.is_stale_after(Some(Duration::from_secs(86_400))));
    }

    #[test]
    fn test_enabled_policy_goes_stale_after_interval() {
        let policy = RefreshPolicy::from_secs(60);

        // Just fetched
        assert!(!policy.is_stale(Some(Instant::now())));

        assert!(!policy.is_stale_after(Some(Duration::from_secs(59))));
        assert!(policy.is_stale_after(Some(Duration::from_secs(60))));
    }
}
