pub mod app_state_builder;
pub mod report_fixtures;
pub mod stubs;
