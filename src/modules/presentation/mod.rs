//! Client-side model of the annual report page: the slide deck, its widgets
//! and the session that fills it from `/api/get_annual_data`.

pub mod adapter;
pub mod animation;
pub mod carousel;
pub mod context;
pub mod dom;
pub mod markup;
pub mod ports;
pub mod record;
pub mod schedule;
pub mod session;
pub mod slides;
pub mod widgets;
