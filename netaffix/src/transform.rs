//! Net name decoration.
//!
//! A decoration is either a trailing `_<text>` (suffix mode) or a leading
//! `<text>_` (prefix mode). Before a new decoration is applied, a previous
//! one is stripped if it looks like something this tool would have added:
//! a purely numeric last segment in suffix mode, an alphanumeric first
//! segment in prefix mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where the decoration goes relative to the base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffixMode {
    #[default]
    Suffix,
    Prefix,
}

impl AffixMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AffixMode::Suffix => "suffix",
            AffixMode::Prefix => "prefix",
        }
    }
}

impl fmt::Display for AffixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown affix mode: {0} (expected 'suffix' or 'prefix')")]
pub struct UnknownAffixMode(pub String);

impl FromStr for AffixMode {
    type Err = UnknownAffixMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "suffix" => Ok(AffixMode::Suffix),
            "p" | "prefix" => Ok(AffixMode::Prefix),
            other => Err(UnknownAffixMode(other.to_string())),
        }
    }
}

/// Remove a previously applied decoration from `name`.
///
/// Returns `name` unchanged when it has no underscore or when the candidate
/// segment does not have the expected shape.
pub fn strip(name: &str, mode: AffixMode) -> &str {
    match mode {
        AffixMode::Suffix => match name.rsplit_once('_') {
            Some((base, tail)) if is_digits(tail) => base,
            _ => name,
        },
        AffixMode::Prefix => match name.split_once('_') {
            Some((head, rest)) if is_alphanumeric(head) => rest,
            _ => name,
        },
    }
}

/// Join `base` and `decoration` with an underscore on the side given by `mode`.
pub fn compose(base: &str, decoration: &str, mode: AffixMode) -> String {
    match mode {
        AffixMode::Suffix => format!("{}_{}", base, decoration),
        AffixMode::Prefix => format!("{}_{}", decoration, base),
    }
}

/// Strip then compose: the name a net ends up with after decoration.
pub fn redecorate(name: &str, decoration: &str, mode: AffixMode) -> String {
    compose(strip(name, mode), decoration, mode)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip("CLK", AffixMode::Suffix), "CLK");
        assert_eq!(strip("CLK_A", AffixMode::Suffix), "CLK_A");
        assert_eq!(strip("CLK_2", AffixMode::Suffix), "CLK");
        assert_eq!(strip("CLK_", AffixMode::Suffix), "CLK_");
        // Only the last segment is considered
        assert_eq!(strip("SPI_MOSI_12", AffixMode::Suffix), "SPI_MOSI");
    }

    #[test]
    fn test_strip_suffix_needs_ascii_digits() {
        // Superscripts and non-Latin digits are part of the name, not a counter
        assert_eq!(strip("VREF_²", AffixMode::Suffix), "VREF_²");
        assert_eq!(strip("ADC_٣", AffixMode::Suffix), "ADC_٣");
        assert_eq!(strip("ADC_3٣", AffixMode::Suffix), "ADC_3٣");
        assert_eq!(redecorate("VREF_²", "B", AffixMode::Suffix), "VREF_²_B");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip("PWR_3V3", AffixMode::Prefix), "3V3");
        assert_eq!(strip("PWR-X_3V3", AffixMode::Prefix), "PWR-X_3V3");
        assert_eq!(strip("GND", AffixMode::Prefix), "GND");
        assert_eq!(strip("_GND", AffixMode::Prefix), "_GND");
        assert_eq!(strip("A_B_C", AffixMode::Prefix), "B_C");
    }

    #[test]
    fn test_strip_keeps_hierarchical_names() {
        assert_eq!(strip("/USB/D_P", AffixMode::Prefix), "/USB/D_P");
        assert_eq!(strip("Net-(U1-Pad3)", AffixMode::Suffix), "Net-(U1-Pad3)");
    }

    #[test]
    fn test_compose() {
        assert_eq!(compose("CLK", "A", AffixMode::Suffix), "CLK_A");
        assert_eq!(compose("CLK", "A", AffixMode::Prefix), "A_CLK");
    }

    #[test]
    fn test_strip_undoes_compose() {
        for base in ["GND", "SDA", "/MCU/RESET", "VBUS_IN"] {
            let decorated = compose(base, "42", AffixMode::Suffix);
            assert_eq!(strip(&decorated, AffixMode::Suffix), base);
        }
        for base in ["GND", "3V3", "D_P"] {
            let decorated = compose(base, "BRD2", AffixMode::Prefix);
            assert_eq!(strip(&decorated, AffixMode::Prefix), base);
        }
    }

    #[test]
    fn test_redecorate_replaces_numeric_suffix() {
        assert_eq!(redecorate("GND_1", "NEW", AffixMode::Suffix), "GND_NEW");
        assert_eq!(redecorate("GND", "NEW", AffixMode::Suffix), "GND_NEW");
        assert_eq!(redecorate("CH1_SDA", "CH2", AffixMode::Prefix), "CH2_SDA");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("s".parse::<AffixMode>().unwrap(), AffixMode::Suffix);
        assert_eq!("Prefix".parse::<AffixMode>().unwrap(), AffixMode::Prefix);
        assert!("middle".parse::<AffixMode>().is_err());
        assert_eq!(AffixMode::default(), AffixMode::Suffix);
    }
}
