mod factory;
mod loader;
pub(in crate::group_loader) mod serialized_group;

pub use loader::load_groups_from;
