pub(crate) mod config;
pub(crate) mod inspect;
pub(crate) mod list;
pub(crate) mod sfo;
