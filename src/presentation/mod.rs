//! Session-level presentation controller, transitioning delegate and entry point.

pub(crate) mod controller;
pub(crate) mod delegate;
pub(crate) mod presenter;
