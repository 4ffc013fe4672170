//! Debounce configuration.
//!
//! `DebounceOptions` is the validated form of the knobs a debounced function
//! accepts: the quiet period, which edges invoke the target, and the optional
//! cap on how long an invocation may be deferred.

use std::fmt;
use std::time::Duration;

/// Error returned when debounce options are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsError {
    /// The wait interval was negative (value in milliseconds)
    NegativeWait(i64),
    /// The max wait interval was negative (value in milliseconds)
    NegativeMaxWait(i64),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::NegativeWait(ms) => {
                write!(f, "wait must not be negative, got {}ms", ms)
            }
            OptionsError::NegativeMaxWait(ms) => {
                write!(f, "max wait must not be negative, got {}ms", ms)
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Options controlling when a debounced function invokes its target.
///
/// # Example
/// ```
/// use debounce::DebounceOptions;
/// use std::time::Duration;
///
/// let options = DebounceOptions::new(Duration::from_millis(100))
///     .with_leading(true)
///     .with_max_wait(Duration::from_millis(50));
///
/// assert!(options.leading());
/// assert!(options.trailing());
/// // max wait never undercuts the wait interval
/// assert_eq!(options.max_wait(), Some(Duration::from_millis(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceOptions {
    wait: Duration,
    leading: bool,
    trailing: bool,
    max_wait: Option<Duration>,
}

impl DebounceOptions {
    /// Create trailing-edge options with the given quiet period.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            leading: false,
            trailing: true,
            max_wait: None,
        }
    }

    /// Create trailing-edge options from a signed millisecond count.
    ///
    /// # Errors
    /// Returns `OptionsError::NegativeWait` if `wait_ms` is negative.
    pub fn from_millis(wait_ms: i64) -> Result<Self, OptionsError> {
        Ok(Self::new(millis(wait_ms).ok_or(OptionsError::NegativeWait(wait_ms))?))
    }

    /// Replace the quiet period.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Invoke the target on the leading edge of a burst.
    pub fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Invoke the target on the trailing edge of a burst.
    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Cap how long an invocation may be deferred by continuous calls.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Cap how long an invocation may be deferred, in signed milliseconds.
    ///
    /// # Errors
    /// Returns `OptionsError::NegativeMaxWait` if `max_wait_ms` is negative.
    pub fn with_max_wait_millis(self, max_wait_ms: i64) -> Result<Self, OptionsError> {
        let max_wait = millis(max_wait_ms).ok_or(OptionsError::NegativeMaxWait(max_wait_ms))?;
        Ok(self.with_max_wait(max_wait))
    }

    /// Remove the max wait cap.
    pub fn without_max_wait(mut self) -> Self {
        self.max_wait = None;
        self
    }

    /// The quiet period.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Whether the leading edge invokes the target.
    pub fn leading(&self) -> bool {
        self.leading
    }

    /// Whether the trailing edge invokes the target.
    pub fn trailing(&self) -> bool {
        self.trailing
    }

    /// The effective max wait: never shorter than `wait`.
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait.map(|max_wait| max_wait.max(self.wait))
    }
}

fn millis(ms: i64) -> Option<Duration> {
    u64::try_from(ms).ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DebounceOptions::new(Duration::from_millis(100));
        assert_eq!(options.wait(), Duration::from_millis(100));
        assert!(!options.leading());
        assert!(options.trailing());
        assert_eq!(options.max_wait(), None);
    }

    #[test]
    fn test_from_millis() {
        let options = DebounceOptions::from_millis(250).unwrap();
        assert_eq!(options.wait(), Duration::from_millis(250));

        let zero = DebounceOptions::from_millis(0).unwrap();
        assert_eq!(zero.wait(), Duration::ZERO);
    }

    #[test]
    fn test_negative_wait_rejected() {
        assert_eq!(
            DebounceOptions::from_millis(-1),
            Err(OptionsError::NegativeWait(-1))
        );
    }

    #[test]
    fn test_negative_max_wait_rejected() {
        let result = DebounceOptions::from_millis(10)
            .unwrap()
            .with_max_wait_millis(-5);
        assert_eq!(result, Err(OptionsError::NegativeMaxWait(-5)));
    }

    #[test]
    fn test_max_wait_clamped_to_wait() {
        let options = DebounceOptions::new(Duration::from_millis(100))
            .with_max_wait(Duration::from_millis(20));
        assert_eq!(options.max_wait(), Some(Duration::from_millis(100)));

        let options = options.with_max_wait(Duration::from_millis(300));
        assert_eq!(options.max_wait(), Some(Duration::from_millis(300)));

        assert_eq!(options.without_max_wait().max_wait(), None);
    }

    #[test]
    fn test_with_wait_reclamps_max_wait() {
        let options = DebounceOptions::new(Duration::from_millis(10))
            .with_max_wait(Duration::from_millis(50))
            .with_wait(Duration::from_millis(80));
        assert_eq!(options.wait(), Duration::from_millis(80));
        assert_eq!(options.max_wait(), Some(Duration::from_millis(80)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            OptionsError::NegativeWait(-3).to_string(),
            "wait must not be negative, got -3ms"
        );
        assert_eq!(
            OptionsError::NegativeMaxWait(-7).to_string(),
            "max wait must not be negative, got -7ms"
        );
    }
}
