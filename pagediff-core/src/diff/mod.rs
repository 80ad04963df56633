pub(crate) mod composer;
pub(crate) mod detector;
pub(crate) mod pipeline;
pub(crate) mod settings;
