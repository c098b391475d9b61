//! Ready-made chart figures.
//!
//! Each factory turns a [`crate::dataset::Dataset`] into a configured
//! [`crate::figure::Figure`] using only the public figure API: axis patches,
//! stored decorations, interactive elements and a draw callback.

mod bar;
mod pie;

pub use bar::{bar_chart, BarChart};
pub use pie::{pie_chart, PieChart};
