mod openapi;
pub use openapi::*;

#[cfg(debug_assertions)]
pub mod auth;

pub mod me;

pub mod transactions;

pub mod receipts;

pub mod evidences;

pub mod members;

pub mod notices;

pub mod audit;
