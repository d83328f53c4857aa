pub mod fix;
pub mod validate;

use std::process::ExitCode;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Empty,
    Sorted,
    Unsorted,
    Fixed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        !matches!(self, Outcome::Unsorted)
    }

    pub fn exit_code(self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
