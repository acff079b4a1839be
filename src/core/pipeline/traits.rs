//! Pipeline Latch Interface.
//!
//! Defines the common behavior of the latches that connect pipeline stages,
//! so that flushes and bubble checks are expressed the same way everywhere.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of instructions as they move between stages.
/// They must support flushing (squashing the occupant on a taken jump or
/// branch) and checking for emptiness.
pub trait PipelineLatch {
    /// Squashes the occupant. An empty latch stays empty.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if the latch holds a bubble, `false` otherwise.
    fn is_empty(&self) -> bool;
}
