//! Rank Commands

use super::{ApiClient, Transport};
use crate::error::ApiError;
use crate::ranking::RankMapping;

impl<T: Transport> ApiClient<T> {
    /// Replace the user's favorite order with `mapping`
    pub async fn set_rank(&self, mapping: &RankMapping) -> Result<(), ApiError> {
        let url = self.config.rank_url();
        self.post(url, mapping).await
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use crate::commands::testing::RecordingTransport;
    use crate::commands::ApiClient;
    use crate::config::ApiConfig;
    use crate::error::ApiError;
    use crate::models::SeiyuuId;
    use crate::ranking::RankMapping;

    fn mapping(raw: &[&str]) -> RankMapping {
        RankMapping::from_ordered_ids(raw.iter().map(|r| SeiyuuId::parse(r).unwrap())).unwrap()
    }

    #[test]
    fn test_set_rank_posts_list_order() {
        let transport = RecordingTransport::replying(200, r#"{"message":"success"}"#);
        let api = ApiClient::with_transport(ApiConfig::new("http://host/"), transport.clone());

        block_on(api.set_rank(&mapping(&["7", "3", "9"]))).unwrap();

        assert_eq!(
            transport.calls(),
            vec![("http://host/rank/seiyuu".to_string(), r#"{"7":1,"3":2,"9":3}"#.to_string())]
        );
    }

    #[test]
    fn test_server_error_surfaces_as_status() {
        let transport = RecordingTransport::replying(500, "");
        let api = ApiClient::with_transport(ApiConfig::new("http://host"), transport);

        let err = block_on(api.set_rank(&mapping(&["55082", "11661"]))).unwrap_err();
        assert_eq!(err, ApiError::Status { status: 500, message: String::new() });
    }

    #[test]
    fn test_network_failure_does_not_panic() {
        let transport = RecordingTransport::failing(ApiError::Network("offline".to_string()));
        let api = ApiClient::with_transport(ApiConfig::new("http://host"), transport);

        let result = block_on(api.set_rank(&mapping(&["1"])));
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
