// Mock analytics dashboard - synthesized metrics, rolling chart and a pausable update loop
pub mod application;
pub mod domain;
pub mod infrastructure;
