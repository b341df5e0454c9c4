//! # server
//!
//! REST API server for the prediction engine. The router is exposed as a
//! library so integration tests can drive it without binding a socket.

pub mod routes;
