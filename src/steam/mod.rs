pub(crate) mod consts;
pub(crate) mod library;
pub(crate) mod manifest;
pub(crate) mod paths;
pub(crate) mod vdf;
