pub mod args;
pub mod menu;
pub mod output;

pub use args::{Args, VerbosityLevel};
pub use menu::App;
pub use output::OutputFormatter;
