use serde::Deserialize;

/// Request payload for the `/download` endpoint.
/// The flag defaults match what the form sends when untouched: both
/// standard exports enabled, everything else opt-in.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub tricount_key: String,
    #[serde(default)]
    pub download_attachments: bool,
    #[serde(default = "default_true")]
    pub export_csv: bool,
    #[serde(default = "default_true")]
    pub export_excel: bool,
    #[serde(default)]
    pub export_sesterce: bool,
}

fn default_true() -> bool {
    true
}

/// Request payload for the `/preview` endpoint.
/// Contains only the tricount key to summarize.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub tricount_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_request_defaults() {
        let request: DownloadRequest =
            serde_json::from_str(r#"{"tricount_key": "abc"}"#).unwrap();
        assert_eq!(request.tricount_key, "abc");
        assert!(!request.download_attachments);
        assert!(request.export_csv);
        assert!(request.export_excel);
        assert!(!request.export_sesterce);
    }

    #[test]
    fn missing_key_deserializes_to_empty_string() {
        let request: DownloadRequest = serde_json::from_str("{}").unwrap();
        assert!(request.tricount_key.is_empty());

        let preview: PreviewRequest = serde_json::from_str("{}").unwrap();
        assert!(preview.tricount_key.is_empty());
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let request: DownloadRequest = serde_json::from_str(
            r#"{"tricount_key": "abc", "export_csv": false, "export_sesterce": true}"#,
        )
        .unwrap();
        assert!(!request.export_csv);
        assert!(request.export_sesterce);
        assert!(request.export_excel);
    }
}
