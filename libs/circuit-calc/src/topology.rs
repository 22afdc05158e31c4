//! Resistor network topology and label resolution policies
//!
//! Two endpoints resolve the `circuit_type` label differently:
//!
//! | Policy | `"series"` | `"parallel"` | anything else |
//! |--------|------------|--------------|---------------|
//! | [`StrictTopology`] | Series | Parallel | `InvalidInput` |
//! | [`LenientTopology`] | Series | Parallel | Parallel |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, Result, INVALID_TOPOLOGY};

pub const SERIES_LABEL: &str = "series";
pub const PARALLEL_LABEL: &str = "parallel";

/// Wiring arrangement of a resistor group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Resistors combine by direct summation
    #[default]
    Series,
    /// Resistors combine via reciprocal-sum-of-reciprocals
    Parallel,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Series => SERIES_LABEL,
            Self::Parallel => PARALLEL_LABEL,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        StrictTopology::resolve(s)
    }
}

/// Maps a wire label onto a [`Topology`]
pub trait TopologyPolicy {
    fn resolve(label: &str) -> Result<Topology>;
}

/// Only the exact labels `series` and `parallel` are accepted
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictTopology;

impl TopologyPolicy for StrictTopology {
    fn resolve(label: &str) -> Result<Topology> {
        match label {
            SERIES_LABEL => Ok(Topology::Series),
            PARALLEL_LABEL => Ok(Topology::Parallel),
            _ => Err(CalcError::invalid_input(INVALID_TOPOLOGY)),
        }
    }
}

/// Exactly `series` is series; every other label falls through to parallel
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientTopology;

impl TopologyPolicy for LenientTopology {
    fn resolve(label: &str) -> Result<Topology> {
        if label == SERIES_LABEL {
            Ok(Topology::Series)
        } else {
            Ok(Topology::Parallel)
        }
    }
}
