use serde_json::Value;

/// Return the string stored at `settings.icon` in a design document.
///
/// Absent keys, a non-object `settings`, or a non-string `icon` all yield
/// `None`. No validation of the string itself happens here.
pub fn extract_icon_field(document: &Value) -> Option<String> {
    document
        .get("settings")?
        .get("icon")?
        .as_str()
        .map(str::to_owned)
}
