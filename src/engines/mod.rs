//! Search backend adapters.
//!
//! Each module provides a struct implementing [`crate::engine::EngineAdapter`]
//! that queries one specific backend — scraping its HTML results page or
//! calling its JSON API.

pub mod bing;
pub mod duckduckgo;
pub mod google;
pub mod serpapi;
pub mod wikipedia;

pub use bing::BingAdapter;
pub use duckduckgo::DuckDuckGoAdapter;
pub use google::GoogleAdapter;
pub use serpapi::SerpApiAdapter;
pub use wikipedia::WikipediaAdapter;
