pub mod apply;
pub mod diff;
pub mod status;
pub mod validate;

/// Terminal outcome of a command, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Validated or applied cleanly, or nothing to do
    Clean,
    /// Validation or architectural violation; blocked before review
    Blocked,
    /// Operator aborted without approving anything
    Aborted,
    /// External interrupt during review
    Interrupted,
}

impl Outcome {
    pub fn code(self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::Blocked => 1,
            Outcome::Aborted => 2,
            Outcome::Interrupted => 130,
        }
    }
}
