

/// Taken branches and jumps.
pub mod control_hazards;
