//! Topics API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use serde_json::Value;

/// Which related collections to include with a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicOptions {
    pub with_links: bool,
    pub with_refs: bool,
}

impl TopicOptions {
    fn query(&self) -> Vec<(&'static str, &'static str)> {
        let mut query = Vec::new();
        if self.with_links {
            query.push(("with_links", "1"));
        }
        if self.with_refs {
            query.push(("with_refs", "1"));
        }
        query
    }
}

/// Topics API.
pub struct TopicsApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> TopicsApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Get a topic by slug.
    pub async fn get(&self, slug: &str, options: TopicOptions) -> SefariaResult<Value> {
        self.client
            .http
            .get_with_query("api/v2/topics", Some(slug), &options.query())
            .await
    }
}
