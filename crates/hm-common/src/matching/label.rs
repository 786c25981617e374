use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
pub enum CompatibilityLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Lower bounds (inclusive) of each label tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelConfig {
    pub excellent: u8,
    pub good: u8,
    pub fair: u8,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            excellent: 80,
            good: 60,
            fair: 40,
        }
    }
}

impl LabelConfig {
    /// Defaults overridden by `HM_LABEL_EXCELLENT`, `HM_LABEL_GOOD`, `HM_LABEL_FAIR`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            excellent: env_threshold("HM_LABEL_EXCELLENT").unwrap_or(defaults.excellent),
            good: env_threshold("HM_LABEL_GOOD").unwrap_or(defaults.good),
            fair: env_threshold("HM_LABEL_FAIR").unwrap_or(defaults.fair),
        }
    }

    pub fn label_for(&self, compatibility: u8) -> CompatibilityLabel {
        if compatibility >= self.excellent {
            CompatibilityLabel::Excellent
        } else if compatibility >= self.good {
            CompatibilityLabel::Good
        } else if compatibility >= self.fair {
            CompatibilityLabel::Fair
        } else {
            CompatibilityLabel::Poor
        }
    }
}

/// Label with the default thresholds.
pub fn label_for(compatibility: u8) -> CompatibilityLabel {
    LabelConfig::default().label_for(compatibility)
}

fn env_threshold(key: &str) -> Option<u8> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u8>().ok())
        .filter(|v| *v <= 100)
}
