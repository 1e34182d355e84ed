pub(crate) mod layout;
pub(crate) mod slots;
pub(crate) mod style;
