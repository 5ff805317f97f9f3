//! Engine configuration
//!
//! Explicit configuration values handed to the workbench and drop-target
//! resolver constructors. There is no ambient global state; two workbenches
//! in the same process can run with different settings.

/// Geometry constants for drop-target hit testing, in content-rect units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropConfig {
    /// Offset of the four reference-relative hit points from the rect center
    pub relative_offset: f32,

    /// Offset of the four absolute (whole-workbench) hit points from the
    /// rect center
    pub absolute_offset: f32,

    /// Half-extent of the square hit region around each hit point
    pub hit_tolerance: f32,

    /// Minimum width and height a tab group must have to accept drops
    pub min_target_extent: f32,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            relative_offset: 34.0,
            absolute_offset: 68.0,
            hit_tolerance: 12.0,
            min_target_extent: 180.0,
        }
    }
}

/// Workbench configuration.
#[derive(Debug, Clone, Default)]
pub struct BenchConfig {
    /// Re-validate tree invariants after every mutation, panicking on
    /// violation. Development aid, off by default.
    pub debug_layout: bool,

    /// Drop-target geometry for resolvers serving this workbench
    pub drop: DropConfig,
}
