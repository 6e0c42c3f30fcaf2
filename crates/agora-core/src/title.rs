//! Title normalization and the explicit partial-update request.
//!
//! Titles are identities: every title that reaches a store has been trimmed
//! and lowercased, so backends compare them with plain equality.

use serde::Deserialize;

/// Normalize a user-supplied title. A blank title normalizes to `""`.
pub fn normalize_title(raw: &str) -> String { raw.trim().to_lowercase() }

/// A partial update accepted by both services. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Update {
  pub title: Option<String>,
  pub votes: Option<i64>,
}

impl Update {
  pub fn title(title: impl Into<String>) -> Self {
    Self { title: Some(title.into()), votes: None }
  }

  pub fn votes(votes: i64) -> Self { Self { title: None, votes: Some(votes) } }

  /// Normalize the title; a blank title is treated as not supplied.
  pub fn normalized(self) -> Self {
    Self {
      title: self
        .title
        .map(|t| normalize_title(&t))
        .filter(|t| !t.is_empty()),
      votes: self.votes,
    }
  }

  pub fn is_empty(&self) -> bool { self.title.is_none() && self.votes.is_none() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_trims_and_lowercases() {
    assert_eq!(normalize_title("  Bartending "), "bartending");
    assert_eq!(normalize_title("TÉCNICAS"), "técnicas");
    assert_eq!(normalize_title("   "), "");
  }

  #[test]
  fn blank_title_counts_as_absent() {
    let update = Update { title: Some("  ".into()), votes: None }.normalized();
    assert!(update.is_empty());

    let update = Update { title: Some(" Retro ".into()), votes: Some(3) }.normalized();
    assert_eq!(update.title.as_deref(), Some("retro"));
    assert_eq!(update.votes, Some(3));
  }

  #[test]
  fn deserializes_partial_bodies() {
    let update: Update = serde_json::from_str(r#"{"votes": -4}"#).unwrap();
    assert_eq!(update, Update::votes(-4));

    let update: Update = serde_json::from_str("{}").unwrap();
    assert!(update.is_empty());
  }
}
