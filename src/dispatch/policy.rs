//! How the dispatcher treats overlapping replies and clears.

use serde::{Deserialize, Serialize};

/// What happens when the user sends while a reply is still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Every message gets its own in-flight reply, keyed by message id.
    #[default]
    Concurrent,
    /// Messages are appended immediately; replies are produced one at a
    /// time in send order.
    Queue,
}

/// What clearing the chat does to replies that are still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearPolicy {
    /// Abort pending replies and drop the typing indicator.
    #[default]
    CancelPending,
    /// Leave pending replies running; they land in the cleared log.
    KeepPending,
}

/// Dispatcher behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPolicy {
    #[serde(default)]
    pub overlap: OverlapPolicy,
    #[serde(default)]
    pub on_clear: ClearPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_use_kebab_case_names() {
        let policy: DispatchPolicy =
            serde_json::from_str(r#"{"overlap":"queue","on_clear":"keep-pending"}"#).unwrap();
        assert_eq!(policy.overlap, OverlapPolicy::Queue);
        assert_eq!(policy.on_clear, ClearPolicy::KeepPending);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let policy: DispatchPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, DispatchPolicy::default());
        assert_eq!(policy.on_clear, ClearPolicy::CancelPending);
    }
}
