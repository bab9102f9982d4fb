use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport seam for the measurement API; wrappers add credentials.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
