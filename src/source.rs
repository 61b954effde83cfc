//! Video URL handling

use regex::Regex;

use crate::{ClientError, Result};

/// Trim user input and reject empty URLs before any request is made
pub fn normalize_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation("video URL is empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Extract a YouTube-style video id.
/// `watch?v=ID` links use the query parameter, anything else the last path segment.
pub fn extract_video_id(url: &str) -> String {
    if let Ok(re) = Regex::new(r"[?&]v=([^&#]+)") {
        if let Some(caps) = re.captures(url) {
            return caps[1].to_string();
        }
    }

    match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .unwrap_or_default(),
        Err(_) => url.rsplit('/').next().unwrap_or(url).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("  https://youtu.be/abc \n").unwrap(), "https://youtu.be/abc");
        assert!(matches!(normalize_url(""), Err(ClientError::Validation(_))));
        assert!(matches!(normalize_url(" \t "), Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(extract_video_id("https://www.youtube.com/watch?feature=x&v=abc123&t=10"), "abc123");
        assert_eq!(extract_video_id("https://youtu.be/abc"), "abc");
        assert_eq!(extract_video_id("https://youtu.be/abc/"), "abc");
        assert_eq!(extract_video_id("abc"), "abc");
    }
}
