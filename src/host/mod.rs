//! Host toolkit boundary and an in-memory host implementation.

pub(crate) mod headless;
pub(crate) mod protocol;
pub(crate) mod session;
