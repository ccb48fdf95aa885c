//! Terminal front-end. Everything that touches stdout, stderr or exit codes lives here.

mod commands;
mod print;
mod setup;

pub use commands::run;
