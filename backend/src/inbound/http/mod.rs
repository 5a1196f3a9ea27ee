//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod admin;
pub mod error;
pub mod health;
pub mod requests;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;
