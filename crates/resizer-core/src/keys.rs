//! Source/destination key handling.

use crate::error::{PipelineError, PipelineResult};

/// Prefix every source key must carry.
pub const ORIGIN_SEGMENT: &str = "origin/";

/// Derive the destination key for a rendition label.
///
/// Replaces the first `origin/` with `resize/<label>/` and keeps the rest of
/// the path verbatim. A key without `origin/` is a malformed trigger.
pub fn destination_key(source_key: &str, label: &str) -> PipelineResult<String> {
    if !source_key.contains(ORIGIN_SEGMENT) {
        return Err(PipelineError::Routing {
            key: source_key.to_string(),
            message: format!("key has no '{ORIGIN_SEGMENT}' segment"),
        });
    }
    Ok(source_key.replacen(ORIGIN_SEGMENT, &format!("resize/{label}/"), 1))
}

/// Decode an object key as delivered in a storage event.
///
/// Event keys are form-encoded: `+` stands for a space and everything else is
/// percent-encoded.
pub fn decode_event_key(raw: &str) -> PipelineResult<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PipelineError::Routing {
            key: raw.to_string(),
            message: format!("key is not valid percent-encoded UTF-8: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_destination_key_replaces_origin() {
        assert_eq!(
            destination_key("origin/article/photo.jpg", "s").unwrap(),
            "resize/s/article/photo.jpg"
        );
    }

    #[test]
    fn test_destination_key_preserves_surrounding_segments() {
        for (source, label, expected) in [
            ("a/origin/profile/x/y.png", "m", "a/resize/m/profile/x/y.png"),
            ("origin/message/origin/z.jpg", "l", "resize/l/message/origin/z.jpg"),
            ("tenant/origin/article/my photo.jpg", "s", "tenant/resize/s/article/my photo.jpg"),
        ] {
            assert_eq!(destination_key(source, label).unwrap(), expected);
        }
    }

    #[test]
    fn test_destination_key_requires_origin_segment() {
        let err = destination_key("uploads/article/photo.jpg", "s").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Routing);

        // "origin" without a trailing separator is not the segment
        assert!(destination_key("origin", "s").is_err());
    }

    #[test]
    fn test_decode_event_key() {
        assert_eq!(
            decode_event_key("origin/article/my+summer+photo.jpg").unwrap(),
            "origin/article/my summer photo.jpg"
        );
        assert_eq!(
            decode_event_key("origin/article/caf%C3%A9.jpg").unwrap(),
            "origin/article/café.jpg"
        );
        // An encoded plus survives as a literal plus
        assert_eq!(
            decode_event_key("origin/article/a%2Bb.jpg").unwrap(),
            "origin/article/a+b.jpg"
        );
    }

    #[test]
    fn test_decode_event_key_rejects_invalid_utf8() {
        let err = decode_event_key("origin/article/%FF.jpg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Routing);
    }
}
