//! Air-Quality Score Boundaries
//!
//! The remote source scores each reading period from 0 (worst) to 100 (best).
//! The published air-quality indicator is a discrete tier. Lower bounds are
//! inclusive and upper bounds exclusive.
//!
//! ```text
//!  score:   0 ──────── 50 ──── 60 ──────── 80 ──── 90 ──────── 100
//!  tier:        Poor     Inferior    Fair      Good     Excellent
//! ```

/// Lowest score rated Excellent.
pub const SCORE_EXCELLENT_MIN: f64 = 90.0;

/// Lowest score rated Good.
pub const SCORE_GOOD_MIN: f64 = 80.0;

/// Lowest score rated Fair.
pub const SCORE_FAIR_MIN: f64 = 60.0;

/// Lowest score rated Inferior. Anything below is Poor.
pub const SCORE_INFERIOR_MIN: f64 = 50.0;
