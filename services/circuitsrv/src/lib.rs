//! Circuit Calculator Service (circuitsrv)
//!
//! HTTP front end for `circuit_calc`: equivalent resistance, Ohm's law,
//! power and a combined best-effort calculation.

pub mod api;
pub mod app_state;
pub mod bootstrap;
pub mod config;
pub mod dto;
pub mod query;
pub mod routes;

pub use app_state::AppState;
pub use config::{CircuitsrvConfig, DEFAULT_PORT};
pub use routes::{create_app, create_routes};
