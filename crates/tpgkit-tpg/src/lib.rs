//! # TPGKit Tool Path Generators
//!
//! The [`Tpg`] interface a host uses to discover, configure and run
//! toolpath strategies, the registry that holds them, and the example
//! [`SecondTpg`] generator.

pub mod plugin;
pub mod registry;
pub mod schema_cell;
pub mod second_tpg;

pub use plugin::{check_action_coverage, Tpg, TpgDescriptor};
pub use registry::TpgRegistry;
pub use schema_cell::{SchemaCell, SchemaState};
pub use second_tpg::{SecondTpg, SecondTpgAction};
