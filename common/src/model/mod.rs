pub mod application;
pub mod filter;
pub mod sheet;
pub mod stats;
