pub mod crawler;
pub mod web;
pub mod webdriver;

pub use crawler::Renderer;
pub use web::{crawl, crawl_solo};
pub use webdriver::WebDriverRenderer;
