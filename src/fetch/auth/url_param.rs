use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// data.go.kr services expect the key as `serviceKey`; see
/// [`UrlParam::service_key`].
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    pub fn service_key(inner: C, key: String) -> Self {
        Self {
            inner,
            param_name: "serviceKey".to_string(),
            key,
        }
    }

    pub(crate) fn apply(&self, req: &mut reqwest::Request) {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.apply(&mut req);
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_key_is_appended_and_encoded() {
        let client = UrlParam::service_key(BasicClient::new(), "a+b/c==".to_string());
        let mut req = reqwest::Request::new(
            reqwest::Method::GET,
            "http://example.com/measure?returnType=json".parse().unwrap(),
        );

        client.apply(&mut req);

        assert_eq!(
            req.url().as_str(),
            "http://example.com/measure?returnType=json&serviceKey=a%2Bb%2Fc%3D%3D"
        );
    }
}
