//! Dashboard-side business logic.

pub mod controller;
pub mod filter;
pub mod poller;
pub mod review;
pub mod summary;
