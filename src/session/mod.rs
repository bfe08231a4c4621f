//! Login state owned across cycles.
mod manager;

pub use manager::SessionManager;
