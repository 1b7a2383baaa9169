//! Form rendering module
//!
//! - `field_renderer`: one bordered input per field kind
//! - `form_view`: field list, action panel and fetched survey questions

mod field_renderer;
mod form_view;

pub use form_view::draw_form;
