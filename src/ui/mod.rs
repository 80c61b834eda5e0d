pub mod output;
pub mod theme;

pub use output::{error, warn};
pub use theme::{theme, Theme};
