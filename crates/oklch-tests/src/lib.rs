//! Integration tests for the OKLCH picker crates.
//!
//! Color model properties live here; `pipeline` drives the store, the
//! scheduler and the rasterizer together.

#[cfg(test)]
mod pipeline;
