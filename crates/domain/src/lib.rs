#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod comparison;
pub mod date;
mod error;
mod exercise;
pub mod export;
mod history;
mod name;
mod period;
mod service;
mod settings;
mod workout;

pub use comparison::*;
pub use error::*;
pub use exercise::*;
pub use export::{Export, ExportError, ExportFormat};
pub use history::*;
pub use name::*;
pub use period::*;
pub use service::*;
pub use settings::*;
pub use workout::*;
