//! Serializable debounce configuration.
//!
//! `DebounceConfig` mirrors [`DebounceOptions`] with plain millisecond
//! integers so it can live in a config file or be received over the wire.
//! Conversion validates the values.

use crate::domain::options::{DebounceOptions, OptionsError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Debounce settings as they appear in configuration files.
///
/// Missing fields take the same defaults as [`DebounceOptions::new`].
///
/// # Example
/// ```
/// use debounce::{DebounceConfig, DebounceOptions};
/// use std::time::Duration;
///
/// let config: DebounceConfig =
///     serde_json::from_str(r#"{ "wait_ms": 250, "max_wait_ms": 1000 }"#).unwrap();
/// let options = DebounceOptions::try_from(config).unwrap();
///
/// assert_eq!(options.wait(), Duration::from_millis(250));
/// assert!(options.trailing());
/// assert_eq!(options.max_wait(), Some(Duration::from_secs(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period in milliseconds
    pub wait_ms: i64,
    /// Invoke on the leading edge
    pub leading: bool,
    /// Invoke on the trailing edge
    pub trailing: bool,
    /// Upper bound on deferral in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wait_ms: Option<i64>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            wait_ms: 0,
            leading: false,
            trailing: true,
            max_wait_ms: None,
        }
    }
}

impl TryFrom<DebounceConfig> for DebounceOptions {
    type Error = OptionsError;

    fn try_from(config: DebounceConfig) -> Result<Self, Self::Error> {
        let options = DebounceOptions::from_millis(config.wait_ms)?
            .with_leading(config.leading)
            .with_trailing(config.trailing);
        match config.max_wait_ms {
            Some(max_wait_ms) => options.with_max_wait_millis(max_wait_ms),
            None => Ok(options),
        }
    }
}

/// Durations past `i64::MAX` milliseconds saturate.
impl From<DebounceOptions> for DebounceConfig {
    fn from(options: DebounceOptions) -> Self {
        Self {
            wait_ms: saturating_millis(options.wait()),
            leading: options.leading(),
            trailing: options.trailing(),
            max_wait_ms: options.max_wait().map(saturating_millis),
        }
    }
}

fn saturating_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
