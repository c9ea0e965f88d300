// Sources
pub mod ramp_generator;

// Transformers
pub mod scale;

// Sinks
pub mod probe;

// Source exports
pub use ramp_generator::{ramp_generator, RampGenerator};

// Transformer exports
pub use scale::{scale, Scale};

// Sink exports
pub use probe::{probe, Probe, ProbeLog};
