pub mod http_annual_data_source;

pub use http_annual_data_source::{FetchConfig, HttpAnnualDataSource};
