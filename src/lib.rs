pub mod config;
pub mod report;
pub mod solver;
pub mod tle;
