pub mod account;
pub mod calendar;
pub mod config;
pub mod contact;
pub mod dashboard;
pub mod due;
pub mod error;
pub mod io;
pub mod opportunity;
pub mod paths;
pub mod prompt;
pub mod snapshot;
pub mod streak;
pub mod types;

pub use error::{CadenceError, Result};
