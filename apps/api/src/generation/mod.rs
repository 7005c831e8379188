// Review generation engine.
// Pipeline: input normalization → phrase selection → composition (template or
// freeform) → text finishing → analysis. All AI polishing goes through the
// polisher module — nothing here performs I/O.

pub mod analyze;
pub mod banks;
pub mod compose;
pub mod finish;
pub mod generator;
pub mod handlers;
pub mod input;
pub mod picker;
