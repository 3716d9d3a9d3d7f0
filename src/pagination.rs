// src/pagination.rs

use crate::error::{Error, Result};
use std::future::Future;

/// One page request handed to the page fetcher. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: usize,
}

/// One page of a search response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total the upstream claims to have, if it says
    pub total_count: Option<u64>,
}

/// Reported after every successful page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    pub page: u32,
    pub fetched: usize,
    pub accumulated: usize,
}

/// Everything a pagination run collected
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
    pub pages: u32,
}

impl<T> Fetched<T> {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
    max_items: usize,
}

impl Paginator {
    pub fn new(per_page: usize, max_items: usize) -> Result<Self> {
        if per_page == 0 {
            return Err(Error::InvalidInput("page size must be positive".into()));
        }
        if max_items == 0 {
            return Err(Error::InvalidInput("item cap must be positive".into()));
        }
        Ok(Self { per_page, max_items })
    }

    /// Requests pages one after another and concatenates their items.
    ///
    /// Stops on an empty page, once `max_items` is reached, or as soon as the
    /// running total is no longer a multiple of the page size. The first
    /// failing page aborts the whole run.
    pub async fn fetch_all<T, F, Fut, O>(&self, mut fetch_page: F, mut observe: O) -> Result<Fetched<T>>
    where
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
        O: FnMut(PageProgress),
    {
        let mut items: Vec<T> = Vec::new();
        let mut total_count = None;
        let mut page = 0u32;

        loop {
            page += 1;
            let response = fetch_page(PageRequest {
                page,
                per_page: self.per_page,
            })
            .await?;

            let fetched = response.items.len();
            if response.total_count.is_some() {
                total_count = response.total_count;
            }
            items.extend(response.items);

            let progress = PageProgress {
                page,
                fetched,
                accumulated: items.len(),
            };
            log::debug!(
                "page {}: {} items fetched, {} so far",
                progress.page,
                progress.fetched,
                progress.accumulated
            );
            observe(progress);

            if fetched == 0 || items.len() >= self.max_items || items.len() % self.per_page != 0 {
                break;
            }
        }

        items.truncate(self.max_items);
        Ok(Fetched {
            items,
            total_count,
            pages: page,
        })
    }
}
