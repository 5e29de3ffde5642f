//! Target sizes and resting frames derived from a style and a container.

pub(crate) mod resolver;
