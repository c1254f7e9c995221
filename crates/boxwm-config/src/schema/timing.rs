use serde::{Deserialize, Serialize};

/// Delays driving the one-shot timers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pointer dwell time before auto-raise (valid range: 0-10000).
    pub auto_raise_delay_ms: u64,
    /// Debounce for reconfigure requests (valid range: 0-5000).
    pub reconfigure_delay_ms: u64,
    /// Double-click window (valid range: 50-2000).
    pub double_click_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            auto_raise_delay_ms: 400,
            reconfigure_delay_ms: 250,
            double_click_interval_ms: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        let config = TimingConfig::default();
        assert_eq!(config.auto_raise_delay_ms, 400);
        assert_eq!(config.reconfigure_delay_ms, 250);
        assert_eq!(config.double_click_interval_ms, 250);
    }
}
