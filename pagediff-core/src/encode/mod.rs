//! Output sinks for rendered comparison canvases.

pub(crate) mod sink;
