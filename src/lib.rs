//! Turkey Hunt: a click-the-turkey arcade round, simulated as pure state
//! updates so the terminal front end stays a thin adapter.

pub mod compute;
pub mod config;
pub mod entities;
pub mod grid;
pub mod spawn;
