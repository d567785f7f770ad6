// Command handlers module
// This module contains all CLI command implementations

pub mod apply;
pub mod common;
pub mod completion;
