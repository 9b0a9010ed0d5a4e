pub mod loan;
pub mod response;
pub mod scalar;
pub mod user;

use std::fmt;

pub use loan::{AmountValue, Loan, LoanChanges, LoanInput, LoanRow, LoanStatus, NewLoan};
pub use response::{ErrorResponse, MessageResponse};
pub use user::{NewUser, User, ValidUser};

/// Schema validation failure for a single document write.
///
/// Collects every failing field so the message lists all of them, in the
/// order the fields are declared on the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    model: &'static str,
    failures: Vec<(&'static str, String)>,
}

impl ValidationError {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            failures: Vec::new(),
        }
    }

    pub fn push(&mut self, path: &'static str, message: impl Into<String>) {
        self.failures.push((path, message.into()));
    }

    pub fn required(&mut self, path: &'static str) {
        self.push(path, format!("Path `{}` is required.", path));
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.failures.iter().map(|(path, _)| *path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failed: ", self.model)?;
        for (i, (path, message)) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", path, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
