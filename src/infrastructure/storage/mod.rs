//! Storage implementations for the car repository

pub mod memory;

pub use memory::InMemoryCarStore;
