// src/exit.rs
//! Standardized process exit codes for `fieldnorm`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FieldnormExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, config).
    Error = 1,
    /// Input documents could not be parsed, or the batch was empty.
    InvalidInput = 2,
}

impl FieldnormExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for FieldnormExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
