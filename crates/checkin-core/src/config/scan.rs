use serde::{Deserialize, Serialize};

/// Per-scan admission policy supplied by the terminal.
///
/// Not persisted. The defaults match a freshly started terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Exact-match filter on the payload's event name. Empty means no filter.
    #[serde(default)]
    pub event_name: Option<String>,

    #[serde(default = "default_allow_re_entry")]
    pub allow_re_entry: bool,

    #[serde(default)]
    pub range_limit_on: bool,

    /// Lowest admissible numeric id when `range_limit_on` is set
    #[serde(default = "default_min_id")]
    pub min_id: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            event_name: None,
            allow_re_entry: default_allow_re_entry(),
            range_limit_on: false,
            min_id: default_min_id(),
        }
    }
}

fn default_allow_re_entry() -> bool {
    true
}

fn default_min_id() -> u64 {
    1
}

impl ScanConfig {
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    pub fn with_re_entry(mut self, allow: bool) -> Self {
        self.allow_re_entry = allow;
        self
    }

    /// Turn the range floor on with the given minimum id
    pub fn with_min_id(mut self, min_id: u64) -> Self {
        self.range_limit_on = true;
        self.min_id = min_id;
        self
    }

    /// The event-name filter, if one is actually set
    pub fn event_filter(&self) -> Option<&str> {
        self.event_name.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_event_name_is_no_filter() {
        let cfg = ScanConfig::default().with_event_name("");
        assert_eq!(cfg.event_filter(), None);

        let cfg = ScanConfig::default().with_event_name("EXPO");
        assert_eq!(cfg.event_filter(), Some("EXPO"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let cfg: ScanConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ScanConfig::default());
        assert!(cfg.allow_re_entry);
        assert!(!cfg.range_limit_on);
        assert_eq!(cfg.min_id, 1);
    }
}
