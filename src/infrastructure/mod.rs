pub mod generators;
pub mod stores;
