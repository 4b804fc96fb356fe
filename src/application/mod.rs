// Application layer - Use cases and the trait seams they consume
pub mod chart_renderer;
pub mod page_source;
pub mod reading_store;
pub mod tracker_service;
