//! Library surface of the perfgate binary. The pipeline module holds
//! the command implementations so integration tests can drive them
//! without spawning the binary.

pub mod pipeline;
