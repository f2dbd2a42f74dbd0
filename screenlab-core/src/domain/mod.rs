//! Domain types for ScreenLab

pub mod bar;

pub use bar::{Bar, BarError, BarSeries};

/// Symbol type alias
pub type Symbol = String;
