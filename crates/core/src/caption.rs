//! Caption text validation and the trigger-word prefix policy.

use crate::error::CoreError;

/// Marker a caption must start with to be considered trigger-prefixed.
pub const TRIGGER_MARKER: &str = "[trigger]";

/// Prefix prepended by the trigger policy (marker plus separating space).
pub const TRIGGER_PREFIX: &str = "[trigger] ";

/// Normalize a raw caption for persistence.
///
/// Trims surrounding whitespace and fails with [`CoreError::EmptyCaption`]
/// when nothing remains. When `include_trigger` is set and the text does
/// not already start with [`TRIGGER_MARKER`], prepends [`TRIGGER_PREFIX`].
/// Re-applying the policy to an already-prefixed caption is a no-op, so
/// repeated saves never double-prefix.
pub fn apply_trigger_policy(raw: &str, include_trigger: bool) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyCaption);
    }
    if include_trigger && !trimmed.starts_with(TRIGGER_MARKER) {
        Ok(format!("{TRIGGER_PREFIX}{trimmed}"))
    } else {
        Ok(trimmed.to_string())
    }
}
