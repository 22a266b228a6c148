//! Favorite Commands
//!
//! The backend flips the favorite flag: posting an id that is already a
//! favorite removes it.

use super::{ApiClient, Transport};
use crate::error::ApiError;
use crate::models::{FavoriteRequest, SeiyuuId};

impl<T: Transport> ApiClient<T> {
    pub async fn toggle_favorite(&self, seiyuu_id: &SeiyuuId) -> Result<(), ApiError> {
        let url = self.config.favorite_url();
        self.post(url, &FavoriteRequest { seiyuu_id }).await
    }
}
