// netpulse/src/commands/mod.rs

pub mod clean;
pub mod generate;
pub mod inspect;
pub mod report;
pub mod run;
