//! Core data types for the whale radar.

pub mod alert;
pub mod reading;
pub mod thresholds;
pub mod window;

pub use alert::*;
pub use reading::*;
pub use thresholds::*;
pub use window::*;
