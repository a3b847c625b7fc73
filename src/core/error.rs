use std::fmt;

use crate::core::surface::SurfaceId;

/// UI region a rejected call was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Primary,
    Menu,
    StatusBar,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Primary => write!(f, "primary screen"),
            Region::Menu => write!(f, "side menu"),
            Region::StatusBar => write!(f, "status bar"),
        }
    }
}

/// Why the manager refused an operation. Nothing was attached or changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// The operation works relative to the primary screen, and there is none.
    NoCurrentScreen { operation: &'static str },
    /// A transition on this region has not settled yet.
    TransitionInFlight { region: Region },
    /// The region already holds a surface (possibly one still closing).
    RegionOccupied { region: Region },
    /// The screen is already live in another slot.
    SurfaceInUse { surface: SurfaceId },
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::NoCurrentScreen { operation } => {
                write!(f, "{operation} requires a current screen")
            }
            PreconditionError::TransitionInFlight { region } => {
                write!(f, "{region} transition still in flight")
            }
            PreconditionError::RegionOccupied { region } => {
                write!(f, "{region} already attached")
            }
            PreconditionError::SurfaceInUse { surface } => {
                write!(f, "surface {surface} is already on stage")
            }
        }
    }
}

impl std::error::Error for PreconditionError {}
