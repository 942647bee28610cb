// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used when deciding whether a facet is degenerate
/// or two vertices coincide.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden at
/// build time with `TAGSMITH_TOLERANCE` (e.g. `TAGSMITH_TOLERANCE=1e-9 cargo build`).
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-6
    }
    #[cfg(feature = "f64")]
    {
        1e-12
    }
}

/// Returns the current tolerance value.
/// If not set yet, it tries `TAGSMITH_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("TAGSMITH_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

