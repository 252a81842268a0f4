//! # era_cheatcodes
//!
//! Handles calls made to [`CHEATCODE_ADDRESS`]: decodes the [`Vm`] interface, applies the
//! requested mutation to the sandbox state and encodes the result.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cheatcodes;
pub use cheatcodes::{CheatcodeContext, apply_cheatcode, dispatch_cheatcode};

mod error;
pub use error::{CheatcodeError, Result};

mod vm;
pub use vm::Vm;

pub mod utils;

pub use era_sandbox_core::constants::CHEATCODE_ADDRESS;
