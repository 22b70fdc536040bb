//! Page decoding and cursor pagination
//!
//! [`Page`] is one decoded list response. [`CursorPager`] turns a
//! single-page fetch function into a lazy [`Stream`] of items that follows
//! `next_page_token` until the server stops returning one.

use crate::error::{Error, Result};
use futures::Stream;
use pin_project_lite::pin_project;
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Response key carrying the continuation cursor
pub const NEXT_PAGE_TOKEN: &str = "next_page_token";

/// One batch of list results plus its continuation cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque cursor for the next page; `None` on the last page
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}

impl Page<Value> {
    /// Decode a list response
    ///
    /// Accepts `{ <items_key>: [...], next_page_token: string|null }` or a bare
    /// JSON array (a single, final page). A missing item key yields an empty
    /// page; an empty-string cursor is treated as the end.
    pub fn from_response(response: Value, items_key: &str) -> Result<Self> {
        let mut map = match response {
            Value::Array(items) => return Ok(Self::new(items, None)),
            Value::Null => return Ok(Self::new(Vec::new(), None)),
            Value::Object(map) => map,
            other => {
                return Err(Error::UnexpectedResponse(format!(
                    "list response is neither an object nor an array: {}",
                    other
                )))
            }
        };

        let items = match map.remove(items_key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::UnexpectedResponse(format!(
                    "`{}` is not an array: {}",
                    items_key, other
                )))
            }
        };

        let next_page_token = match map.remove(NEXT_PAGE_TOKEN) {
            None | Some(Value::Null) => None,
            Some(Value::String(token)) if token.is_empty() => None,
            Some(Value::String(token)) => Some(token),
            Some(other) => {
                return Err(Error::UnexpectedResponse(format!(
                    "`{}` is not a string: {}",
                    NEXT_PAGE_TOKEN, other
                )))
            }
        };

        Ok(Self::new(items, next_page_token))
    }
}

pin_project! {
    /// A cursor-based pager that implements `Stream` for paginated items.
    ///
    /// Pages are fetched one at a time and only once every buffered item of
    /// the previous page has been taken. Dropping the stream stops fetching.
    /// A fetch error is yielded once and ends the stream.
    pub struct CursorPager<T, E, F, Fut>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = std::result::Result<Page<T>, E>>,
    {
        next_cursor: Option<String>,
        buffer: VecDeque<T>,
        done: bool,
        pages_fetched: usize,
        fetcher: F,
        #[pin]
        current_fetch: Option<Fut>,
    }
}

impl<T, E, F, Fut> CursorPager<T, E, F, Fut>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = std::result::Result<Page<T>, E>>,
{
    /// Create a pager; the first fetch receives no cursor
    pub fn new(fetcher: F) -> Self {
        Self {
            next_cursor: None,
            buffer: VecDeque::new(),
            done: false,
            pages_fetched: 0,
            fetcher,
            current_fetch: None,
        }
    }

    /// Number of pages received so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<T, E, F, Fut> Stream for CursorPager<T, E, F, Fut>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = std::result::Result<Page<T>, E>>,
{
    type Item = std::result::Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if *this.done {
                return Poll::Ready(None);
            }

            if let Some(fut) = this.current_fetch.as_mut().as_pin_mut() {
                match fut.poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.current_fetch.set(None);
                        *this.pages_fetched += 1;

                        *this.next_cursor = page.next_page_token;
                        if this.next_cursor.is_none() {
                            *this.done = true;
                        }

                        this.buffer.extend(page.items);
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.current_fetch.set(None);
                        *this.done = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            tracing::debug!(
                "fetching page {} ({})",
                *this.pages_fetched + 1,
                if this.next_cursor.is_some() {
                    "with cursor"
                } else {
                    "first page"
                }
            );
            let fut = (this.fetcher)(this.next_cursor.clone());
            this.current_fetch.set(Some(fut));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct FakeError(String);

    /// Serves canned pages and records every cursor it was asked for
    #[derive(Clone)]
    struct FakeFetcher {
        pages: Arc<Vec<std::result::Result<Page<u32>, FakeError>>>,
        cursors: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl FakeFetcher {
        fn new(pages: Vec<std::result::Result<Page<u32>, FakeError>>) -> Self {
            Self {
                pages: Arc::new(pages),
                cursors: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn fetch(&self, cursor: Option<String>) -> std::result::Result<Page<u32>, FakeError> {
            let mut cursors = self.cursors.lock().unwrap();
            let index = cursors.len();
            cursors.push(cursor);
            self.pages
                .get(index)
                .cloned()
                .unwrap_or_else(|| Err(FakeError("no more pages".to_string())))
        }

        fn calls(&self) -> Vec<Option<String>> {
            self.cursors.lock().unwrap().clone()
        }
    }

    fn pager(
        fetcher: &FakeFetcher,
    ) -> impl Stream<Item = std::result::Result<u32, FakeError>> {
        let fetcher = fetcher.clone();
        CursorPager::new(move |cursor| {
            let fetcher = fetcher.clone();
            async move { fetcher.fetch(cursor) }
        })
    }

    #[tokio::test]
    async fn test_two_pages_in_order() {
        let fetcher = FakeFetcher::new(vec![
            Ok(Page::new(vec![1, 2], Some("next1".to_string()))),
            Ok(Page::new(vec![3], None)),
        ]);

        let items: Vec<_> = pager(&fetcher).collect().await;

        assert_eq!(items, vec![Ok(1), Ok(2), Ok(3)]);
        assert_eq!(fetcher.calls(), vec![None, Some("next1".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_first_page_ends_stream() {
        let fetcher = FakeFetcher::new(vec![Ok(Page::new(vec![], None))]);
        let items: Vec<_> = pager(&fetcher).collect().await;
        assert!(items.is_empty());
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_middle_page_is_followed() {
        let fetcher = FakeFetcher::new(vec![
            Ok(Page::new(vec![1], Some("a".to_string()))),
            Ok(Page::new(vec![], Some("b".to_string()))),
            Ok(Page::new(vec![2], None)),
        ]);
        let items: Vec<_> = pager(&fetcher).collect().await;
        assert_eq!(items, vec![Ok(1), Ok(2)]);
        assert_eq!(fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_error_is_yielded_after_previous_items() {
        let fetcher = FakeFetcher::new(vec![
            Ok(Page::new(vec![1], Some("a".to_string()))),
            Err(FakeError("boom".to_string())),
        ]);

        let items: Vec<_> = pager(&fetcher).collect().await;

        assert_eq!(items, vec![Ok(1), Err(FakeError("boom".to_string()))]);
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_no_fetch_after_consumer_stops() {
        let fetcher = FakeFetcher::new(vec![
            Ok(Page::new(vec![1, 2], Some("a".to_string()))),
            Ok(Page::new(vec![3], None)),
        ]);

        let items: Vec<_> = pager(&fetcher).take(2).collect().await;

        assert_eq!(items, vec![Ok(1), Ok(2)]);
        assert_eq!(fetcher.calls(), vec![None]);
    }

    #[test]
    fn test_nothing_fetched_until_polled() {
        let fetcher = FakeFetcher::new(vec![Ok(Page::new(vec![1], None))]);
        let stream = pager(&fetcher);
        assert!(fetcher.calls().is_empty());
        drop(stream);
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pages_fetched_counter() {
        let fetcher = FakeFetcher::new(vec![
            Ok(Page::new(vec![1], Some("a".to_string()))),
            Ok(Page::new(vec![2], None)),
        ]);
        let inner = fetcher.clone();
        let mut pager = Box::pin(CursorPager::new(move |cursor| {
            let fetcher = inner.clone();
            async move { fetcher.fetch(cursor) }
        }));

        assert_eq!(pager.next().await, Some(Ok(1)));
        assert_eq!(pager.pages_fetched(), 1);
        assert_eq!(pager.next().await, Some(Ok(2)));
        assert_eq!(pager.next().await, None);
        assert_eq!(pager.pages_fetched(), 2);
    }

    #[test]
    fn test_page_from_object_response() {
        let page = Page::from_response(
            json!({"persons": [{"id": 1}, {"id": 2}], "next_page_token": "abc"}),
            "persons",
        )
        .unwrap();
        assert_eq!(page.items, vec![json!({"id": 1}), json!({"id": 2})]);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_page_terminal_cursor_forms() {
        for response in [
            json!({"notes": [], "next_page_token": null}),
            json!({"notes": []}),
            json!({"notes": [], "next_page_token": ""}),
        ] {
            let page = Page::from_response(response, "notes").unwrap();
            assert!(page.is_last());
        }
    }

    #[test]
    fn test_page_from_bare_array() {
        let page = Page::from_response(json!([{"id": 7}]), "lists").unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.is_last());
    }

    #[test]
    fn test_page_missing_items_key_is_empty() {
        let page = Page::from_response(json!({"next_page_token": null}), "fields").unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_rejects_malformed_cursor() {
        let err = Page::from_response(json!({"fields": [], "next_page_token": 42}), "fields")
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));

        let err = Page::from_response(json!({"fields": {"id": 1}}), "fields").unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }
}
