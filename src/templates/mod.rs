pub mod components;
pub mod layouts;
pub mod pages;

pub use layouts::map::map_layout;
pub use pages::{browser_page, overlay};
