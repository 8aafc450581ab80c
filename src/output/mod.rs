pub mod formatter;

pub use formatter::{format_algorithm_table, format_prediction, format_value, should_use_colors};
