//! CLI command implementations.

pub mod compare;
pub mod stores;

pub use compare::CompareCommand;
pub use stores::StoresCommand;
