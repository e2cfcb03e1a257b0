
/// Forwarding unit selection rules.
pub mod forwarding;

/// Hazard unit and its effect on running programs.
pub mod hazards;


/// Cycle-exact reference scenario.
pub mod scenario;

/// Traps raised at writeback.
pub mod traps;
