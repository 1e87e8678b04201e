use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
  #[error("cannot resolve history range {from}...{to}: {detail}")]
  InvalidRange { from: String, to: String, detail: String },

  #[error("failed to spawn git {args:?}: {source}")]
  GitSpawn {
    args: Vec<String>,
    #[source]
    source: std::io::Error,
  },

  #[error("git {args:?} failed: {stderr}")]
  GitFailed { args: Vec<String>, stderr: String },
}

impl VcsError {
  /// Whether a failed git invocation was caused by an unknown or malformed revision.
  pub fn is_unknown_revision(&self) -> bool {
    match self {
      VcsError::GitFailed { stderr, .. } => {
        let s = stderr.to_lowercase();
        s.contains("unknown revision") || s.contains("bad revision") || s.contains("ambiguous argument")
      }
      VcsError::InvalidRange { .. } => true,
      VcsError::GitSpawn { .. } => false,
    }
  }
}

pub type VcsResult<T> = std::result::Result<T, VcsError>;
