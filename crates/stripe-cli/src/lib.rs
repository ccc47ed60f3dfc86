//! # stripe-cli
//!
//! Command-line front end for stripe-wire-rs.
//!
//! This crate provides:
//! - `decode`: turn a response body into a typed resource and summarise it
//! - `encode`: turn JSON parameters into the form body the API expects
//!
//! ## Commands
//!
//! | Command | Input | Output |
//! |---------|-------|--------|
//! | `decode --kind charge` | response JSON | `charge ch_1 amount=500 ...` |
//! | `encode --kind charge` | params JSON | `amount=500&currency=usd` |

pub mod commands;
pub mod registry;

pub use registry::Summary;
