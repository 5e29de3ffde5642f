//! Interpolation inputs handed to the host animation primitive.

pub(crate) mod lerp;
pub(crate) mod scheduler;
pub(crate) mod spring;
