//! Node configuration.

use std::time::Duration;

use crate::protocol::ChecksumScheme;

/// Node configuration options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeConfig {
    /// Minimum time between test-run sends.
    pub interval: Duration,
    /// Number of frames a test run sends before returning to idle.
    pub test_message_count: u32,
    /// Temperature value broadcast during a test run.
    pub test_value: f32,
    /// Checksum rule for outbound and inbound frames.
    pub checksum_scheme: ChecksumScheme,
    /// Apply the deployed firmware's identifier suffix rewrite.
    pub legacy_identity: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            test_message_count: 2000,
            test_value: 10.0,
            checksum_scheme: ChecksumScheme::Standard,
            legacy_identity: true,
        }
    }
}
