//! Canonical viewing links for subtopics.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the characters `encodeURIComponent` leaves alone.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

/// The path at which a subtopic's detail view is served. Both titles are
/// expected to be normalized already.
pub fn subtopic_link(topic_title: &str, subtopic_title: &str) -> String {
  format!(
    "/topics/{}/subtopics/view/{}",
    utf8_percent_encode(topic_title, PATH_SEGMENT),
    utf8_percent_encode(subtopic_title, PATH_SEGMENT),
  )
}
