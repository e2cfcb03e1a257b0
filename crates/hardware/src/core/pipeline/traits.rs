//! Pipeline latch interface.
//!
//! Every stage register exposes the same view to the orchestrator and to
//! diagnostics, whatever payload it carries.

/// Represents a pipeline latch (inter-stage register).
pub trait PipelineLatch {
    /// Forces the latch to a bubble immediately, outside the clocked update.
    ///
    /// Used on reset; per-cycle flushes go through the latch's `drive`.
    fn flush(&mut self);

    /// `true` if the latch currently holds a bubble.
    fn is_bubble(&self) -> bool;

    /// `true` if the latch holds a real instruction carrying a trap.
    fn has_trap(&self) -> bool;

    /// Program counter of the held instruction, `None` for a bubble.
    fn pc(&self) -> Option<u64>;
}

/// Data carried across one stage boundary.
pub trait StagePayload: Copy + Default {
    /// Program counter of the instruction.
    fn pc(&self) -> u64;

    /// Trap raised by or before the stage that produced the payload.
    fn trap(&self) -> Option<crate::common::error::Trap>;
}
