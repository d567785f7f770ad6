// External integrations module
// This module contains integrations with external tools and services

pub mod git;
pub mod patch;
pub mod tracker;
