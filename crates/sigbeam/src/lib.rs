//! Top-level facade crate for sigbeam.
//!
//! Re-exports the protocol core and the client engine so users can depend on
//! a single crate.

pub mod core {
    pub use sigbeam_core::*;
}

pub mod client {
    pub use sigbeam_client::*;
}
