//! Main module for specmd library functionality

pub mod ast;
pub mod building;
pub mod concepts;
pub mod formats;
pub mod testing;
pub mod token;
