//! Backend side of the GUI: command queue intake and the worker thread that
//! talks to the job search service.

pub mod commands;
pub mod runtime;
