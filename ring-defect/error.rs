use thiserror::Error;

/// Pipeline stage a geometry failure was raised from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ContourExtraction,
    HierarchyPairing,
    Centroid,
    RadiusProfile,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::ContourExtraction => write!(f, "contour extraction"),
            Stage::HierarchyPairing => write!(f, "hierarchy pairing"),
            Stage::Centroid => write!(f, "centroid computation"),
            Stage::RadiusProfile => write!(f, "radius profile"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DefectError {
    #[error("Invalid {name} threshold: {value} (must be finite and >= 0)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Geometry error during {stage}: {reason}")]
    Geometry { stage: Stage, reason: String },

    #[error("Failed to access configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl DefectError {
    pub(crate) fn geometry(stage: Stage, reason: impl Into<String>) -> Self {
        DefectError::Geometry { stage, reason: reason.into() }
    }

    /// Stage that failed, for geometry errors
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DefectError::Geometry { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type DefectResult<T> = Result<T, DefectError>;
