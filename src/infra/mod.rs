pub mod factory;
pub mod repositories;
