mod discover;
mod filter;

pub use discover::discover;
pub use filter::{module_name, ModuleFilter, ModuleName};
