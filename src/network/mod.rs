//! HTTP networking module
//!
//! Provides HTTP client functionality for talking to the geocoding provider.

mod client;

pub use client::{HttpClient, HttpResponse};
