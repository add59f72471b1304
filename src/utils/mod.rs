//! Utility modules for the icon compiler.

pub mod fs;
pub mod path;
