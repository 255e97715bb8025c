// Shared library root: domain models used by the engine and its clients.
pub mod models;
