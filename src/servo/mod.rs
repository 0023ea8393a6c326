pub mod pulse;

pub use pulse::to_pulse_width;
