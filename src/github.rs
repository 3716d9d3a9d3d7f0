// src/github.rs

use crate::config::GithubConfig;
use crate::error::{Error, Result};
use crate::model::CommitTimestamp;
use crate::pagination::{Fetched, Page, PageProgress, PageRequest, Paginator};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Body of any GitHub search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CommitItem {
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub committer: Signature,
}

#[derive(Debug, Deserialize)]
pub struct Signature {
    pub date: DateTime<Utc>,
}

impl CommitItem {
    pub fn timestamp(&self) -> CommitTimestamp {
        self.commit.committer.date
    }
}

/// Only the presence of a pull request matters, its fields are not read
#[derive(Debug, Deserialize)]
pub struct IssueItem {
    pub number: u64,
}

pub fn decode_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>> {
    let response: SearchResponse<T> = serde_json::from_str(body)?;
    Ok(Page {
        items: response.items,
        total_count: response.total_count,
    })
}

pub fn commit_query(user: &str, since: DateTime<Utc>) -> String {
    format!("author:{} committer-date:>={}", user, since.format("%Y-%m-%d"))
}

pub fn open_pulls_query(user: &str) -> String {
    format!("is:pr is:open author:{}", user)
}

pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn user(&self) -> &str {
        &self.config.user
    }

    async fn search<T: DeserializeOwned>(&self, endpoint: &str, query: &str, request: PageRequest) -> Result<Page<T>> {
        let url = format!("{}/search/{}", self.config.api_base.trim_end_matches('/'), endpoint);
        let mut builder = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", query.to_string()),
                ("per_page", request.per_page.to_string()),
                ("page", request.page.to_string()),
            ]);
        if endpoint == "commits" {
            builder = builder.query(&[("sort", "committer-date"), ("order", "desc")]);
        }
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        decode_page(&body)
    }

    /// Every commit by the configured user since `since`, up to the paginator's cap
    pub async fn commits_since<O>(&self, since: DateTime<Utc>, observe: O) -> Result<Fetched<CommitTimestamp>>
    where
        O: FnMut(PageProgress),
    {
        let paginator = Paginator::new(self.config.per_page, self.config.max_items)?;
        let query = commit_query(&self.config.user, since);
        let fetched = paginator
            .fetch_all(
                |request| {
                    let query = query.as_str();
                    async move {
                        let page: Page<CommitItem> = self.search("commits", query, request).await?;
                        Ok(Page {
                            items: page.items.iter().map(CommitItem::timestamp).collect(),
                            total_count: page.total_count,
                        })
                    }
                },
                observe,
            )
            .await?;
        Ok(fetched)
    }

    /// Number of open pull requests authored by the configured user
    pub async fn open_pull_count(&self) -> Result<u64> {
        let query = open_pulls_query(&self.config.user);
        let page: Page<IssueItem> = self
            .search("issues", &query, PageRequest { page: 1, per_page: 1 })
            .await?;
        Ok(page.total_count.unwrap_or(page.items.len() as u64))
    }
}
