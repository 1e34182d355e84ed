pub(crate) mod blur;
pub(crate) mod compositor;
pub(crate) mod gradient;
pub(crate) mod shapes;
pub(crate) mod surface;
pub(crate) mod text;
