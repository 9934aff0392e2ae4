//! Test utilities: in-memory repository mocks, data factories and an
//! `AppState` builder for HTTP-level tests.

mod factories;
mod mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use mocks::*;
