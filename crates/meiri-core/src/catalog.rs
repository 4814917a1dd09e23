use crate::error::Result;
use crate::types::VideoRef;

/// Maximum number of video ids per detail request accepted by the catalog API.
pub const MAX_DETAIL_BATCH: usize = 50;

/// A source of channel videos.
pub trait VideoCatalog {
    /// Lists every video uploaded to `channel_id`.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Catalog` if the listing fails. A partial listing
    /// is never returned.
    fn list_videos(&self, channel_id: &str) -> Result<Vec<VideoRef>>;
}

impl<T: VideoCatalog + ?Sized> VideoCatalog for &T {
    fn list_videos(&self, channel_id: &str) -> Result<Vec<VideoRef>> {
        (**self).list_videos(channel_id)
    }
}

impl<T: VideoCatalog + ?Sized> VideoCatalog for Box<T> {
    fn list_videos(&self, channel_id: &str) -> Result<Vec<VideoRef>> {
        (**self).list_videos(channel_id)
    }
}
