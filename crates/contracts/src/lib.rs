//! Types and client-side rules shared by the shipment frontend.
//!
//! Everything here is target independent: no Leptos, no browser, no network.

pub mod domain;
pub mod shared;
pub mod system;
