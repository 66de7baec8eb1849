#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod power;
pub mod rate;
pub mod size;
pub mod time;
