/// The outcome class of a call to a cache or store collaborator.
///
/// Mirrors the status taxonomy the collaborators speak: a miss, a cancelled
/// call, or anything else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Status {
  #[error("not found: {0}")]
  NotFound(String),
  #[error("cancelled: {0}")]
  Cancelled(String),
  #[error("unknown: {0}")]
  Unknown(String),
}

impl Status {
  pub fn not_found(message: impl Into<String>) -> Self {
    Status::NotFound(message.into())
  }

  pub fn cancelled(message: impl Into<String>) -> Self {
    Status::Cancelled(message.into())
  }

  pub fn unknown(message: impl Into<String>) -> Self {
    Status::Unknown(message.into())
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Status::NotFound(_))
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, Status::Cancelled(_))
  }

  pub fn message(&self) -> &str {
    match self {
      Status::NotFound(m) | Status::Cancelled(m) | Status::Unknown(m) => m,
    }
  }
}
