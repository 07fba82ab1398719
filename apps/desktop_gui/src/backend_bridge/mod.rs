//! Backend bridge: command queue from UI to the fetch worker and its runtime.

pub mod commands;
pub mod runtime;
