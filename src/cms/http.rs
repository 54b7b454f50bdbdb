//! CMS query API over HTTP.
//!
//! `GET https://{project}.api.sanity.io/v{version}/data/query/{dataset}` with
//! the GROQ text in `query`, parameters as JSON-encoded `$name` values and
//! the read perspective. Published reads may use the API CDN host; draft
//! reads always go to the live API with the bearer token.

use super::{CmsError, ContentQuery, ContentSource, Perspective, queries};
use crate::config::CmsConfig;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use ureq::Agent;

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

pub struct HttpSource {
    agent: Agent,
    project_id: String,
    dataset: String,
    api_version: String,
    use_cdn: bool,
    token: Option<String>,
    token_env: String,
}

impl HttpSource {
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        if config.project_id.is_empty() {
            return Err(CmsError::NotConfigured);
        }
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build();
        Ok(Self {
            agent: Agent::new_with_config(agent_config),
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
            api_version: config.api_version.clone(),
            use_cdn: config.use_cdn,
            token: config.token(),
            token_env: config.token_env.clone(),
        })
    }

    /// Query endpoint for `perspective`. The CDN only serves published,
    /// unauthenticated reads.
    pub fn endpoint(&self, perspective: Perspective) -> String {
        let host = if self.use_cdn && perspective == Perspective::Published && self.token.is_none()
        {
            "apicdn"
        } else {
            "api"
        };
        format!(
            "https://{}.{host}.sanity.io/v{}/data/query/{}",
            self.project_id, self.api_version, self.dataset
        )
    }
}

impl ContentSource for HttpSource {
    fn fetch(&self, query: &ContentQuery, perspective: Perspective) -> Result<Value, CmsError> {
        let url = self.endpoint(perspective);
        let mut request = self
            .agent
            .get(&url)
            .query("query", queries::groq(query))
            .query("perspective", perspective.as_str());
        if let Some(slug) = query.slug() {
            // Parameters are GROQ literals, so strings carry their quotes.
            request = request.query("$slug", Value::from(slug).to_string());
        }
        if perspective == Perspective::Drafts {
            self.draft_support()?;
        }
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let mut response = request.call().map_err(|source| CmsError::Http {
            url: url.clone(),
            source: Box::new(source),
        })?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(CmsError::Status { url, status });
        }
        let body: QueryResponse =
            response
                .body_mut()
                .read_json()
                .map_err(|source| CmsError::Http {
                    url,
                    source: Box::new(source),
                })?;
        Ok(body.result)
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.project_id, self.dataset)
    }

    /// Drafts are private; reading them needs the token.
    fn draft_support(&self) -> Result<(), CmsError> {
        match self.token {
            Some(_) => Ok(()),
            None => Err(CmsError::MissingToken(self.token_env.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(project_id: &str, use_cdn: bool) -> CmsConfig {
        CmsConfig {
            project_id: project_id.to_string(),
            use_cdn,
            token_env: "RESORT_SITE_TEST_UNSET_TOKEN".to_string(),
            ..CmsConfig::default()
        }
    }

    #[test]
    fn requires_a_project_id() {
        assert!(matches!(
            HttpSource::new(&config("", true)),
            Err(CmsError::NotConfigured)
        ));
    }

    #[test]
    fn published_reads_use_the_cdn_host() {
        let source = HttpSource::new(&config("abc123", true)).unwrap();
        assert_eq!(
            source.endpoint(Perspective::Published),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
        assert_eq!(
            source.endpoint(Perspective::Drafts),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn cdn_can_be_disabled() {
        let source = HttpSource::new(&config("abc123", false)).unwrap();
        assert!(source.endpoint(Perspective::Published).contains(".api.sanity.io"));
    }

    #[test]
    fn draft_reads_without_token_fail_before_any_request() {
        let source = HttpSource::new(&config("abc123", false)).unwrap();
        let err = source
            .fetch(&ContentQuery::Articles, Perspective::Drafts)
            .unwrap_err();
        assert!(matches!(err, CmsError::MissingToken(var) if var == "RESORT_SITE_TEST_UNSET_TOKEN"));
        assert!(source.draft_support().is_err());
    }
}
