//! Duration-based escalation.
//!
//! Units are scanned in configured order and only the first unit whose
//! pattern occurs is evaluated, even if a later unit would escalate. Within
//! that unit only the first occurrence counts.

use regex::Regex;

use crate::config::{ConfigError, ConfigResult, DurationRules};
use crate::models::{DurationCheck, DurationMention};

struct CompiledUnit {
    unit: String,
    pattern: Regex,
    threshold: Option<u32>,
}

/// Detects "<count> <unit>[s]" phrases and decides whether they escalate.
pub struct DurationDetector {
    units: Vec<CompiledUnit>,
}

impl DurationDetector {
    /// Compile one pattern per configured unit.
    pub fn new(rules: &DurationRules) -> ConfigResult<Self> {
        let units = rules
            .units
            .iter()
            .map(|u| {
                let source = format!(r"(?i)([0-9]+)\s*{}s?", regex::escape(u.stem.trim()));
                let pattern = Regex::new(&source).map_err(|e| {
                    ConfigError::Invalid(format!("duration unit {:?}: {}", u.unit, e))
                })?;
                Ok(CompiledUnit {
                    unit: u.unit.clone(),
                    pattern,
                    threshold: u.threshold,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { units })
    }

    /// Evaluate the first duration phrase found in `message`.
    pub fn check(&self, message: &str) -> DurationCheck {
        for unit in &self.units {
            let Some(caps) = unit.pattern.captures(message) else {
                continue;
            };

            let digits = &caps[1];
            // Only overflow can fail here; such a count exceeds any threshold
            let count = digits.parse::<u32>().unwrap_or(u32::MAX);
            let escalate = match unit.threshold {
                None => true,
                Some(threshold) => count > threshold,
            };

            let message = if escalate {
                let shown = match digits.trim_start_matches('0') {
                    "" => "0",
                    trimmed => trimmed,
                };
                format!(
                    "⚠️ Your symptoms have persisted for {} {}. It's recommended to consult a healthcare provider.",
                    shown, unit.unit
                )
            } else {
                String::new()
            };

            return DurationCheck {
                escalate,
                message,
                mention: Some(DurationMention {
                    count,
                    unit: unit.unit.clone(),
                }),
            };
        }
        DurationCheck::none()
    }
}
