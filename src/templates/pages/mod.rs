pub mod browser;

pub use browser::{browser_page, overlay};
