//! Request middleware.
//!
//! Purpose: define middleware for request lifecycle concerns such as trace
//! correlation and request logging.

pub mod trace;

pub use trace::Trace;
