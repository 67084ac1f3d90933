//! sigbeam client engine.
//!
//! This crate wires the envelope codec, service dispatcher, session
//! coordinator, and liveness monitor into a cohesive call-signaling engine.
//! Everything that touches the outside world (the signaling transport, the
//! peer session, media capture, user prompts) is an injected capability, so
//! the engine is independently testable without any rendering surface or
//! network stack.

pub mod capabilities;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod liveness;
pub mod obs;
pub mod services;
pub mod session;
pub mod transport;
