//! Public library API for decoding Cadence values from JSON-CDC and CCF payloads.

/// Wire decoders, the typed value model, and native conversion.
pub mod cadence;
