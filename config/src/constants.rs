//! # Configuration Constants
//!
//! Centralized constants for the keycase kernel. Geometry tolerances, wall
//! construction defaults and export hints are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Wall Construction**: Default thickness, floor height and bevel weights
//! - **Export**: Hints forwarded to the OpenSCAD polyhedron renderer

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for degeneracy tests: zero-length vectors, collinear plane points,
/// parallel planes and vertical planes all compare against this value.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-9;

/// Tolerance used when comparing constructed coordinates.
///
/// Wall corners are produced by chains of plane intersections, so they carry
/// more accumulated error than a single arithmetic step. Use this when
/// asserting that two constructed points coincide.
///
/// # Example
///
/// ```rust
/// use config::constants::{EPSILON, POINT_TOLERANCE};
/// assert!(POINT_TOLERANCE > EPSILON);
/// ```
pub const POINT_TOLERANCE: f64 = 1e-6;

// =============================================================================
// WALL CONSTRUCTION CONSTANTS
// =============================================================================

/// Default wall thickness in millimetres.
///
/// Two millimetres prints reliably with a 0.4 mm nozzle (five perimeters)
/// and is stiff enough for a keyboard case.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_WALL_THICKNESS;
///
/// let user_thickness: Option<f64> = None;
/// let thickness = user_thickness.unwrap_or(DEFAULT_WALL_THICKNESS);
/// assert_eq!(thickness, 2.0);
/// ```
pub const DEFAULT_WALL_THICKNESS: f64 = 2.0;

/// Default height of the floor plane.
///
/// Parts are built standing on the XY plane; the floor ring of every wall
/// lies at this height.
pub const DEFAULT_FLOOR_Z: f64 = 0.0;

/// Smallest bevel weight accepted by the bevel map.
pub const MIN_BEVEL_WEIGHT: f64 = 0.0;

/// Largest bevel weight accepted by the bevel map.
pub const MAX_BEVEL_WEIGHT: f64 = 1.0;

/// Default rounding strength for edges flagged as roundable.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_BEVEL_WEIGHT, MAX_BEVEL_WEIGHT, MIN_BEVEL_WEIGHT};
///
/// assert!((MIN_BEVEL_WEIGHT..=MAX_BEVEL_WEIGHT).contains(&DEFAULT_BEVEL_WEIGHT));
/// ```
pub const DEFAULT_BEVEL_WEIGHT: f64 = 1.0;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Default convexity hint for exported polyhedra.
///
/// Convexity is a hint for OpenSCAD's preview renderer about the maximum
/// number of front-facing surfaces a ray might intersect. A hollow case has
/// at least four (outer skin, inner skin on both sides), so the default is
/// well above OpenSCAD's own default of 1.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CONVEXITY;
///
/// let user_convexity: Option<u32> = None;
/// let convexity = user_convexity.unwrap_or(DEFAULT_CONVEXITY);
/// assert_eq!(convexity, 10);
/// ```
pub const DEFAULT_CONVEXITY: u32 = 10;

/// Number of decimal places written for coordinates in text exports.
pub const EXPORT_PRECISION: usize = 6;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Checks whether a bevel weight lies in the accepted range.
///
/// NaN is never a valid weight.
///
/// # Example
///
/// ```rust
/// use config::constants::is_valid_bevel_weight;
///
/// assert!(is_valid_bevel_weight(0.5));
/// assert!(!is_valid_bevel_weight(1.5));
/// assert!(!is_valid_bevel_weight(f64::NAN));
/// ```
#[inline]
pub fn is_valid_bevel_weight(weight: f64) -> bool {
    (MIN_BEVEL_WEIGHT..=MAX_BEVEL_WEIGHT).contains(&weight)
}

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of configuration settings shared between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Tolerance handed to wall construction through `WallParams::from_config`.
    pub tolerance: f64,
    /// Default wall thickness used when a caller does not pick one.
    pub wall_thickness: f64,
    /// Convexity hint written by the polyhedron renderer.
    pub convexity: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of every value.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 3.0, 4).expect("valid config");
    /// assert_eq!(cfg.convexity, 4);
    /// ```
    pub fn new(tolerance: f64, wall_thickness: f64, convexity: u32) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !wall_thickness.is_finite() || wall_thickness <= tolerance {
            return Err(ConfigError::InvalidWallThickness(wall_thickness));
        }
        if convexity == 0 {
            return Err(ConfigError::InvalidConvexity(convexity));
        }
        Ok(Self {
            tolerance,
            wall_thickness,
            convexity,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            convexity: DEFAULT_CONVEXITY,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the wall thickness is not a positive finite length.
    InvalidWallThickness(f64),
    /// Raised when the convexity hint is zero.
    InvalidConvexity(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidWallThickness(value) => {
                write!(f, "wall_thickness must be a positive length: {value}")
            }
            ConfigError::InvalidConvexity(value) => {
                write!(f, "convexity must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
