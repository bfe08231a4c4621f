//! Outer loop: one cycle per interval until stopped.
mod looper;

pub use looper::LoadGenerator;
