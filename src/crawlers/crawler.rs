use crate::error::Result;
use url::Url;

/// Produces fully rendered markup for a URL
///
/// Implementations block until the page is ready, client-side content
/// included. A failed or timed-out render is reported as an error; the
/// traversal logs it and skips the page.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    /// Navigate to `url` and return the rendered page source
    async fn render(&mut self, url: &Url) -> Result<String>;

    /// Release the underlying browser resources
    async fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}
