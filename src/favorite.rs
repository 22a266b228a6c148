//! Favorite Id Resolution
//!
//! The favorite checkbox lives on a seiyuu's page, so the page URL's last
//! path segment names the seiyuu.

use percent_encoding::percent_decode_str;

use crate::error::{ApiError, IdError};
use crate::models::SeiyuuId;
use crate::sequence::Settled;

pub const UNKNOWN_SEIYUU_MESSAGE: &str = "Couldn't tell which seiyuu this page is about.";

/// What the checkbox does after a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxAction {
    Keep,
    /// Flip back to the state before the change and show an error toast
    Revert(&'static str),
}

impl CheckboxAction {
    /// No id to send, so nothing was posted
    pub fn unresolved() -> Self {
        CheckboxAction::Revert(UNKNOWN_SEIYUU_MESSAGE)
    }

    /// Only the latest request may undo the box
    pub fn settled(outcome: &Settled<Result<(), ApiError>>) -> Self {
        match outcome {
            Settled::Current(Err(err)) => CheckboxAction::Revert(err.user_message()),
            Settled::Current(Ok(())) | Settled::Superseded(_) => CheckboxAction::Keep,
        }
    }
}

/// Take the last path segment of `url`, ignoring one trailing slash,
/// the query string and the fragment.
pub fn seiyuu_id_from_url(url: &str) -> Result<SeiyuuId, IdError> {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    // Skip "scheme://host" so a bare origin never yields the host name
    let after_scheme = match without_query.find("://") {
        Some(idx) => &without_query[idx + 3..],
        None => without_query,
    };
    let path = match after_scheme.find('/') {
        Some(idx) => &after_scheme[idx..],
        None if without_query.contains("://") => "",
        None => after_scheme,
    };

    let path = path.trim_end();
    let path = path.strip_suffix('/').unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or_default();
    if segment.trim().is_empty() {
        return Err(IdError::Missing(url.to_string()));
    }

    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| IdError::Malformed(segment.to_string()))?;
    SeiyuuId::parse(&decoded)
}

/// Use the id the page handed us, or fall back to the current URL
pub fn resolve_seiyuu_id(fixed: Option<&SeiyuuId>, href: Option<&str>) -> Result<SeiyuuId, IdError> {
    if let Some(id) = fixed {
        return Ok(id.clone());
    }
    let href = href.ok_or_else(|| IdError::Missing("page location".to_string()))?;
    seiyuu_id_from_url(href)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    use crate::commands::testing::RecordingTransport;
    use crate::commands::ApiClient;
    use crate::config::ApiConfig;
    use crate::sequence::RequestSequencer;

    fn id(url: &str) -> String {
        seiyuu_id_from_url(url).unwrap().to_string()
    }

    #[test]
    fn test_last_segment_is_the_id() {
        assert_eq!(id("http://host/favorite/42"), "42");
        assert_eq!(id("http://127.0.0.1:5000/person/11661"), "11661");
        assert_eq!(id("/person/55082"), "55082");
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(id("http://host/favorite/42/"), "42");
        assert_eq!(id("http://host/favorite/42/ "), "42");
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        assert_eq!(id("http://host/person/42?tab=roles"), "42");
        assert_eq!(id("http://host/person/42/#main"), "42");
    }

    #[test]
    fn test_percent_encoded_segment_is_decoded() {
        assert_eq!(id("http://host/person/kana%2Dh"), "kana-h");
        assert!(matches!(
            seiyuu_id_from_url("http://host/person/a%20b"),
            Err(IdError::Malformed(_))
        ));
    }

    #[test]
    fn test_url_without_path_has_no_id() {
        assert!(matches!(seiyuu_id_from_url("http://host"), Err(IdError::Missing(_))));
        assert!(matches!(seiyuu_id_from_url("http://host/"), Err(IdError::Missing(_))));
        assert!(matches!(seiyuu_id_from_url(""), Err(IdError::Missing(_))));
    }

    #[test]
    fn test_fixed_id_wins() {
        let fixed = SeiyuuId::parse("7").unwrap();
        assert_eq!(resolve_seiyuu_id(Some(&fixed), Some("http://host/person/42")).unwrap(), fixed);
        assert_eq!(resolve_seiyuu_id(None, Some("http://host/person/42")).unwrap().as_str(), "42");
    }

    #[test]
    fn test_unknown_id_reverts_without_posting() {
        let transport = RecordingTransport::replying(200, r#"{"message":"success"}"#);
        let api = ApiClient::with_transport(ApiConfig::new("http://host"), transport.clone());

        let action = match resolve_seiyuu_id(None, Some("http://host/")) {
            Ok(id) => CheckboxAction::settled(&Settled::Current(block_on(api.toggle_favorite(&id)))),
            Err(_) => CheckboxAction::unresolved(),
        };
        assert_eq!(action, CheckboxAction::Revert(UNKNOWN_SEIYUU_MESSAGE));
        assert!(resolve_seiyuu_id(None, None).is_err());
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_latest_failure_reverts_with_toast() {
        let transport = RecordingTransport::failing(ApiError::Network("offline".to_string()));
        let api = ApiClient::with_transport(ApiConfig::new("http://host"), transport);
        let seq = RequestSequencer::new();
        let id = SeiyuuId::parse("42").unwrap();

        let ticket = seq.issue();
        let outcome = block_on(seq.settle(ticket, api.toggle_favorite(&id)));
        assert_eq!(
            CheckboxAction::settled(&outcome),
            CheckboxAction::Revert(ApiError::Network(String::new()).user_message())
        );
    }

    #[test]
    fn test_older_failure_leaves_checkbox_alone() {
        let transport = RecordingTransport::replying(401, r#"{"error":"Unauthorized User"}"#);
        let api = ApiClient::with_transport(ApiConfig::new("http://host"), transport.clone());
        let seq = RequestSequencer::new();
        let id = SeiyuuId::parse("42").unwrap();

        let first = seq.issue();
        let _second = seq.issue();
        let outcome = block_on(seq.settle(first, api.toggle_favorite(&id)));
        assert!(matches!(outcome, Settled::Superseded(Err(ApiError::Unauthorized(_)))));
        assert_eq!(CheckboxAction::settled(&outcome), CheckboxAction::Keep);
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_success_keeps_new_state() {
        assert_eq!(CheckboxAction::settled(&Settled::Current(Ok(()))), CheckboxAction::Keep);
    }
}
