// Crate root library declaration and module exports.
pub mod bookings;
pub mod cli;
pub mod client;
pub mod color_utils;
pub mod config;
pub mod context;
pub mod controller;
pub mod ics;
pub mod model;
pub mod storage;
pub mod timeline;
pub mod view;
pub mod windows;
