//! Top-level facade crate for fieldguard.
//!
//! Re-exports the core guard and the host model layer so users can depend on a single crate.

pub mod core {
    pub use fieldguard_core::*;
}

pub mod host {
    pub use fieldguard_host::*;
}
