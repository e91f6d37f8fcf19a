pub mod actions;
pub mod telemetry;

pub mod commands;
pub mod dispatch;

pub mod prompt;
mod start;
pub use self::start::start;
