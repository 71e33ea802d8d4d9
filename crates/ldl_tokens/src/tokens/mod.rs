//! Design token model
//!
//! The canonical in-memory representation every dialect converts into:
//! - Colors (optionally paired with a foreground)
//! - Typography (families, sizes, weights, line heights, letter spacing)
//! - Spacing and border radii
//! - Shadows
//! - Durations and easing curves
//! - Named modes overlaying any of the above

mod category;
mod color;
mod document;
mod group;
pub mod units;

pub use category::*;
pub use color::*;
pub use document::*;
pub use group::*;
