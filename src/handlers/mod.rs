pub mod chance;
pub mod homepage;
pub mod matches;
pub mod quiz;
