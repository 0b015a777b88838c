// src/ui/mod.rs
//! State behind the item and sign-up modals: input markers, feedback text,
//! the in-flight submit lock and delayed dismissal.

pub mod forms;
pub mod modals;

pub use self::forms::*;
pub use self::modals::*;
