//! # IO Module
//!
//! Interface layer exposing backend functionality to the dashboard frontend.

pub mod rest;

pub use rest::*;
