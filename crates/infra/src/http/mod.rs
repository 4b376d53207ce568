//! HTTP client shared by the text-generation integrations

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
