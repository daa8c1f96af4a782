//! Input/output helpers.
//!
//! - numeric list parsing + validation (`parse`)
//! - overlay request files (`request`)
//! - overlay exports (JSON/CSV) (`export`)

pub mod export;
pub mod parse;
pub mod request;

pub use export::*;
pub use parse::*;
pub use request::*;
