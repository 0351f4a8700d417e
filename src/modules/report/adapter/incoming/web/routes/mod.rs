mod annual_report_page;
mod get_annual_data;
mod media_image;

pub use annual_report_page::{annual_report_page_handler, annual_report_slides_handler};
pub use get_annual_data::{__path_get_annual_data_handler, get_annual_data_handler, AnnualDataRequest};
pub use media_image::media_image_handler;
