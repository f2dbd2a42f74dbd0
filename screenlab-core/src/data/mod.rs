//! Bar sources and symbol universes

pub mod csv_dir;
pub mod provider;
pub mod synthetic;
pub mod universe;

pub use csv_dir::{read_bars, CsvDirectoryProvider};
pub use provider::{DataError, DataProvider};
pub use synthetic::{generate_bars, SyntheticProvider};
pub use universe::{Universe, UniverseError};
