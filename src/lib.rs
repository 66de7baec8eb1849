#![doc = include_str!("../README.md")]

pub mod appliance;
pub mod calculator;
pub mod cli;
pub mod db;
pub mod error;
pub mod prelude;
pub mod prompt;
pub mod quantity;
pub mod report;
pub mod tables;
