pub mod autopilot;
pub mod bindings;
pub mod input;
pub mod time;
