//! Host platform collaborators
//!
//! Image decoding and speech synthesis live outside the core; this module
//! provides their interfaces and the implementations the CLI uses.

pub mod decode;
pub mod speech;
