pub(crate) mod cached;
pub(crate) mod painter;
pub(crate) mod surface;
