//! Core domain types and logic.

pub mod clock;
pub mod error;
pub mod finance;
pub mod inventory;
pub mod product;
pub mod shop;
