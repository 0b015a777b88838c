// src/lib.rs
pub mod backend;
pub mod config;
pub mod domain;
pub mod marketplace;
pub mod money;
pub mod persistence;
pub mod ui;
pub mod web;

pub use domain::*;
pub use marketplace::*;
pub use money::*;
