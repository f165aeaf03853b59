//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `shared` - Shared utilities (config and expense loading)
//! - `categories` - Category suggestion and listing, next-month helper
//! - `analyze` - Forecast, recommendations, insights and budget status
//! - `breakdown` - Weekday, daily, category and monthly breakdowns

pub mod analyze;
pub mod breakdown;
pub mod categories;
pub mod shared;

// Re-export command functions for main.rs
pub use analyze::*;
pub use breakdown::*;
pub use categories::*;
pub use shared::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
