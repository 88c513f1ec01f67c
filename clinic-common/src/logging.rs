//! Structured values in log lines
//!
//! Search settings, constraint descriptors and validation outcomes are
//! easier to read in a debug log as a YAML block than as one long `Debug`
//! line. [`Pretty`] does that rendering lazily, only when the event is
//! actually emitted.

use std::fmt;

use serde::Serialize;

/// Renders the wrapped value as a YAML block starting on its own line.
///
/// ```
/// use clinic_common::Pretty;
///
/// #[derive(Debug, serde::Serialize)]
/// struct Settings { page_size: usize }
///
/// let line = format!("search config: {}", Pretty(&Settings { page_size: 200 }));
/// assert_eq!(line, "search config: \npage_size: 200\n");
/// ```
///
/// Values YAML cannot represent fall back to pretty `Debug` output.
pub struct Pretty<T>(pub T);

impl<T: Serialize + fmt::Debug> fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(yaml) = serde_yaml::to_string(&self.0) else {
            return write!(f, "\n{:#?}", self.0);
        };
        write!(f, "\n{yaml}")
    }
}

// `{:?}` in tracing fields gets the same YAML block
impl<T: Serialize + fmt::Debug> fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
