#![allow(dead_code)]

pub mod commands;

pub use commands::*;
