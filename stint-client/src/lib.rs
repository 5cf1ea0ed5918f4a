mod client;
mod error;

pub mod domain;
pub mod dto;

pub use client::*;
pub use error::*;
