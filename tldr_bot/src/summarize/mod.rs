pub mod args;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod helpers;
