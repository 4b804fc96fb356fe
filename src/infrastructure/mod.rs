// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_store;
pub mod http_source;
pub mod page_parser;
pub mod trend_chart;
