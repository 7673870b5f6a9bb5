pub mod catalog;
pub mod context;
pub mod error;
pub mod io;
pub mod like;
pub mod models;
pub mod query;
pub mod source;

pub use context::Context;
pub use error::{Error, Result};
pub use io::{all, bind, lift, Io};
