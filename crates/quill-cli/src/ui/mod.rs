//! Terminal output helpers.
//!
//! Status lines go to stderr so stdout only carries the results report.

mod messages;

pub use messages::{error, info, success, warning};

/// Applies the color decision globally for `owo-colors`.
pub fn init_colors(no_color: bool) {
    if no_color || !crate::logger::should_use_colors() {
        owo_colors::set_override(false);
    }
}
