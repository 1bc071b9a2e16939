//! Analysis and optimization modes.
//!
//! The analysis mode decides how many algorithm rows must be selected and
//! which service endpoint receives the request:
//!
//! - **Pairwise (1v1)**: exactly two algorithms
//! - **Control (1vN)**: one control algorithm against the rest
//! - **All (NvN)**: every algorithm against every other

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Pairwise,
    Control,
    All,
}

impl AnalysisMode {
    pub const ALL_MODES: [AnalysisMode; 3] =
        [AnalysisMode::Pairwise, AnalysisMode::Control, AnalysisMode::All];

    /// Wire name, as sent in `analysisType`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Pairwise => "pairwise",
            AnalysisMode::Control => "control",
            AnalysisMode::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Pairwise => "Pairwise (1v1)",
            AnalysisMode::Control => "Control (1vN)",
            AnalysisMode::All => "All (NvN)",
        }
    }

    /// Service resource that runs this analysis.
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisMode::Pairwise => "api/analysis/pairwise",
            AnalysisMode::Control => "api/analysis/control",
            AnalysisMode::All => "api/analysis/all",
        }
    }

    /// True when the row checkboxes are user-editable in this mode.
    pub fn allows_toggle(&self) -> bool {
        !matches!(self, AnalysisMode::All)
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = ExperimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pairwise" => Ok(AnalysisMode::Pairwise),
            "control" => Ok(AnalysisMode::Control),
            "all" => Ok(AnalysisMode::All),
            _ => Err(ExperimentError::Unreachable(format!(
                "Invalid analysis mode: {s}"
            ))),
        }
    }
}

/// Whether lower or higher benchmark values are better. Only forwarded to
/// the service; never validated here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationMode {
    #[default]
    Minimize,
    Maximize,
}

impl OptimizationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationMode::Minimize => "minimize",
            OptimizationMode::Maximize => "maximize",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptimizationMode::Minimize => "Minimize",
            OptimizationMode::Maximize => "Maximize",
        }
    }
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptimizationMode {
    type Err = ExperimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimize" => Ok(OptimizationMode::Minimize),
            "maximize" => Ok(OptimizationMode::Maximize),
            _ => Err(ExperimentError::Unreachable(format!(
                "Invalid optimization mode: {s}"
            ))),
        }
    }
}
