//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared session loading (config + CSV tables)
//! - `periods` - Years and months present in the data
//! - `options` - Sidebar choices for one month
//! - `dashboard` - Filter, aggregate and print one month

pub mod core;
pub mod dashboard;
pub mod options;
pub mod periods;

// Re-export command functions for main.rs
pub use core::*;
pub use dashboard::*;
pub use options::*;
pub use periods::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
