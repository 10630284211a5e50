//! Compact link encoding for [`PromptState`].
//!
//! A state is serialized to JSON and base64-encoded with the URL-safe
//! alphabet and no padding, so it can sit in a URL fragment as-is.
//! [`decode`] also accepts links produced by the web form, which used the
//! standard alphabet wrapped in `encodeURIComponent` (`+`, `/` and `=` as
//! `%2B`, `%2F` and `%3D`).

use crate::error::{Error, Result};
use crate::state::PromptState;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use tracing::debug;

/// Encode a state for embedding in a URL fragment.
pub fn encode(state: &PromptState) -> Result<String> {
    let json = serde_json::to_vec(state)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a state produced by [`encode`] or by the web form.
///
/// Leading `#` and surrounding whitespace are ignored. Fields missing from
/// the payload take their defaults; fields of the wrong type produce
/// [`Error::TypeMismatch`].
pub fn decode(encoded: &str) -> Result<PromptState> {
    let encoded = encoded.trim();
    let encoded = encoded.strip_prefix('#').unwrap_or(encoded);

    let bytes = match URL_SAFE_NO_PAD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(url_safe_err) => {
            let standard = encoded
                .replace("%2B", "+")
                .replace("%2F", "/")
                .replace("%3D", "=")
                .replace("%2b", "+")
                .replace("%2f", "/")
                .replace("%3d", "=");
            STANDARD.decode(standard).map_err(|standard_err| {
                debug!(%url_safe_err, %standard_err, "share payload is not base64");
                Error::Encoding(standard_err)
            })?
        }
    };

    serde_json::from_slice(&bytes).map_err(Error::from_decode)
}

/// Attach the encoded state to `base` as its fragment, replacing any
/// existing fragment.
pub fn share_url(base: &str, state: &PromptState) -> Result<String> {
    let base = base.split_once('#').map_or(base, |(head, _)| head);
    Ok(format!("{base}#{}", encode(state)?))
}

/// Decode the state carried in a URL's fragment.
pub fn state_from_url(url: &str) -> Result<PromptState> {
    match url.split_once('#') {
        Some((_, fragment)) if !fragment.trim().is_empty() => decode(fragment),
        _ => Err(Error::MissingFragment(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Example;

    fn sample() -> PromptState {
        let mut state = PromptState {
            goal: "Explain {{topic}} to {{reader}}".into(),
            role: "Teacher".into(),
            examples: vec![Example::new("a", "1"), Example::new("b", "2")],
            ..Default::default()
        };
        state.set_variable("topic", "tides");
        state.set_variable("reader", "a ten-year-old");
        state
    }

    #[test]
    fn encoded_form_is_fragment_safe() {
        let encoded = encode(&sample()).unwrap();
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let state = sample();
        assert_eq!(decode(&encode(&state).unwrap()).unwrap(), state);
    }

    #[test]
    fn decodes_web_form_links() {
        // encodeURIComponent(btoa('{"goal":"Hi?","examples":[]}'))
        let json = r#"{"goal":"Hi?","examples":[]}"#;
        let legacy = STANDARD
            .encode(json)
            .replace('+', "%2B")
            .replace('/', "%2F")
            .replace('=', "%3D");
        let state = decode(&legacy).unwrap();
        assert_eq!(state.goal, "Hi?");
    }

    #[test]
    fn leading_hash_ignored() {
        let encoded = format!("#{}", encode(&sample()).unwrap());
        assert_eq!(decode(&encoded).unwrap(), sample());
    }

    #[test]
    fn garbage_is_encoding_error() {
        assert!(matches!(decode("***"), Err(Error::Encoding(_))));
    }

    #[test]
    fn non_text_variable_is_type_mismatch() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"variables":{"n":3}}"#);
        assert!(matches!(decode(&payload), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn share_url_replaces_fragment() {
        let url = share_url("https://example.test/builder#stale", &sample()).unwrap();
        assert!(url.starts_with("https://example.test/builder#"));
        assert!(!url.contains("stale"));
        assert_eq!(state_from_url(&url).unwrap(), sample());
    }

    #[test]
    fn url_without_fragment_is_error() {
        assert!(matches!(
            state_from_url("https://example.test/builder"),
            Err(Error::MissingFragment(_))
        ));
        assert!(matches!(
            state_from_url("https://example.test/builder#"),
            Err(Error::MissingFragment(_))
        ));
    }
}
