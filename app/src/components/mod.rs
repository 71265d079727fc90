//! UI Components
//!
//! One tab component per dashboard feature, plus the shared request status
//! indicators and the sentiment chart.

pub mod compare_query_tab;
pub mod request_status;
pub mod search_tab;
pub mod sentiment_chart;
pub mod trend_tab;

pub use compare_query_tab::CompareQueryTab;
pub use search_tab::SearchTab;
pub use trend_tab::TrendTab;
