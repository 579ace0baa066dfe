//! Image search provider implementations.
//!
//! Each module provides a struct implementing
//! [`crate::provider::ImageSearchProvider`].

pub mod serpapi;

pub use serpapi::SerpApiProvider;
