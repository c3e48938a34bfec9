use std::fmt;
use std::sync::Arc;

/// Call name excluded from diagnostic mirroring unless configured otherwise.
pub const DEFAULT_EXCLUDED_CALL: &str = "server.getVersion";

/// Decides whether a serialized frame is mirrored to the diagnostic sink.
///
/// The predicate sees the frame text and returns `true` to mirror it.
#[derive(Clone)]
pub struct DiagnosticFilter {
    predicate: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    label: &'static str,
}

impl DiagnosticFilter {
    /// Wrap an arbitrary predicate.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            label: "custom",
        }
    }

    /// Mirror every frame.
    pub fn mirror_all() -> Self {
        Self {
            predicate: Arc::new(|_: &str| true),
            label: "mirror_all",
        }
    }

    /// Suppress frames whose text mentions any of `names`.
    pub fn excluding<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.is_empty())
            .collect();
        Self {
            predicate: Arc::new(move |text: &str| {
                !names.iter().any(|name| text.contains(name.as_str()))
            }),
            label: "excluding",
        }
    }

    /// True when `frame` should be mirrored.
    pub fn admits(&self, frame: &str) -> bool {
        (self.predicate)(frame)
    }
}

impl Default for DiagnosticFilter {
    fn default() -> Self {
        Self::excluding([DEFAULT_EXCLUDED_CALL])
    }
}

impl fmt::Debug for DiagnosticFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticFilter")
            .field("kind", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_suppresses_version_probe() {
        let filter = DiagnosticFilter::default();
        assert!(!filter.admits(r#"{"id":1,"method":"server.getVersion"}"#));
        assert!(filter.admits(r#"{"id":2,"method":"analysis.setRoots"}"#));
    }

    #[test]
    fn excluding_matches_any_name() {
        let filter = DiagnosticFilter::excluding(["a.ping", "b.status"]);
        assert!(!filter.admits(r#"{"method":"a.ping"}"#));
        assert!(!filter.admits(r#"{"method":"b.status"}"#));
        assert!(filter.admits(r#"{"method":"c.run"}"#));
    }

    #[test]
    fn empty_names_do_not_suppress_everything() {
        let filter = DiagnosticFilter::excluding([""]);
        assert!(filter.admits(r#"{"method":"x"}"#));
    }

    #[test]
    fn mirror_all_and_custom() {
        assert!(DiagnosticFilter::mirror_all().admits("server.getVersion"));

        let short_only = DiagnosticFilter::from_fn(|text| text.len() < 4);
        assert!(short_only.admits("abc"));
        assert!(!short_only.admits("abcd"));
        assert!(format!("{short_only:?}").contains("custom"));
    }
}
