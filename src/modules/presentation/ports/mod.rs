mod annual_data_source;
pub mod capabilities;

pub use annual_data_source::{AnnualDataSource, FetchError};
pub use capabilities::Capabilities;
