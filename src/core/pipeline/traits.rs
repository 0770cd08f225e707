//! Pipeline Latch Interface.
//!
//! Defines the behaviour shared by the four inter-stage latches so the
//! hazard and forwarding units can reason about validity, bubbles and
//! destination registers without caring which boundary they inspect.

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// Returns a bubble slot: valid, flagged as a bubble, with no-effect control signals.
    fn bubble() -> Self
    where
        Self: Sized;

    /// Whether anything (instruction or bubble) occupies the latch.
    fn is_valid(&self) -> bool;

    /// Whether the slot is an inserted bubble.
    fn is_bubble(&self) -> bool;

    /// Whether a real instruction occupies the latch.
    fn is_occupied(&self) -> bool {
        self.is_valid() && !self.is_bubble()
    }

    /// Program counter of the occupying instruction.
    fn pc(&self) -> u32;

    /// Register this latch's instruction will write, if any.
    ///
    /// `None` for empty latches, bubbles, instructions without `reg_write`,
    /// and writes to x0.
    fn destination(&self) -> Option<usize> {
        None
    }
}
