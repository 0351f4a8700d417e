pub mod presentation;
pub mod report;
