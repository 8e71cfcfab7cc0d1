//! Config file sources, layered by the loading facade.

pub mod explicit_file;
pub mod global_file;
