pub mod env;
pub mod output;
pub mod program;
pub mod settings;
pub mod signal;
