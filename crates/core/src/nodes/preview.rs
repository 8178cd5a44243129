use serde::Serialize;

/// Side-channel payload the sink hands to the host UI each tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PreviewPayload {
    /// Frames buffered after this tick.
    pub counter: usize,
    pub should_dump: bool,
    /// Base64 WebP thumbnails.
    pub frames: Vec<String>,
    pub fps: u32,
    /// Base64 WAV clip aligned to the buffered duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waveform: Option<String>,
}

impl PreviewPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_omits_missing_waveform() {
        let payload = PreviewPayload {
            counter: 3,
            should_dump: false,
            frames: vec!["abc".to_string()],
            fps: 24,
            audio: Some("UklGRg==".to_string()),
            waveform: None,
        };
        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value["counter"], 3);
        assert_eq!(value["should_dump"], false);
        assert_eq!(value["frames"][0], "abc");
        assert_eq!(value["fps"], 24);
        assert_eq!(value["audio"], "UklGRg==");
        assert!(value.get("waveform").is_none());
    }
}
