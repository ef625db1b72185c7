//! Tray departure monitor for the Entur journey planner.
//!
//! Keeps a list of saved origin/destination stop pairs, periodically asks
//! the journey planner for the next trip on the selected pair, and turns
//! the first leg into a short title such as `R10 : 08:00 - 08:45`.

pub mod cache;
pub mod config;
pub mod controller;
pub mod departure;
pub mod domain;
pub mod geocoder;
pub mod journey;
pub mod store;
pub mod web;
