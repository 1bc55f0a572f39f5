//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::{SHORT_CODE_LENGTH, generate_code};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

/// Default bound on the generated-code collision loop.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and resolving short links.
///
/// Holds no state besides the injected store, so one instance is shared by all
/// concurrent requests.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    max_code_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `max_code_attempts` bounds how many random codes are tried before
    /// [`Self::create_link`] gives up; values below 1 are raised to 1.
    pub fn new(store: Arc<dyn LinkStore>, max_code_attempts: usize) -> Self {
        Self {
            store,
            max_code_attempts: max_code_attempts.max(1),
        }
    }

    /// Creates a short link.
    ///
    /// # Code Selection
    ///
    /// - If `custom_slug` is non-empty it is used verbatim, unless already taken
    /// - Otherwise a random 6-character code is generated, regenerating on collision
    ///
    /// The mapping is written with [`LinkStore::put_if_absent`], so a concurrent
    /// request that claims the same code in between is detected instead of being
    /// silently overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is empty.
    ///
    /// Returns [`AppError::Conflict`] if the custom slug already exists.
    ///
    /// Returns [`AppError::Internal`] if no free code is found within the attempt
    /// bound, or on store errors.
    pub async fn create_link(
        &self,
        long_url: String,
        custom_slug: Option<String>,
    ) -> Result<Link, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "longUrl required",
                json!({ "field": "longUrl" }),
            ));
        }

        let code = match custom_slug.filter(|slug| !slug.is_empty()) {
            Some(slug) => self.claim_custom_slug(slug, &long_url).await?,
            None => self.claim_generated_code(&long_url).await?,
        };

        info!(code = %code, "Created short link");

        Ok(Link::new(code, long_url))
    }

    /// Resolves a short code to its stored link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `code` is empty.
    /// Returns [`AppError::NotFound`] if nothing is stored under `code`.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve_link(&self, code: &str) -> Result<Link, AppError> {
        if code.is_empty() {
            return Err(AppError::bad_request("short code required", Value::Null));
        }

        match self.store.get(code).await? {
            Some(long_url) => Ok(Link::new(code, long_url)),
            None => {
                debug!(code = %code, "Short code not found");
                Err(AppError::not_found(
                    "short link not found",
                    json!({ "code": code }),
                ))
            }
        }
    }

    async fn claim_custom_slug(&self, slug: String, long_url: &str) -> Result<String, AppError> {
        if self.store.get(&slug).await?.is_some() {
            warn!(slug = %slug, "Custom slug already in use");
            return Err(slug_conflict(&slug));
        }

        if !self.store.put_if_absent(&slug, long_url).await? {
            warn!(slug = %slug, "Custom slug claimed concurrently");
            return Err(slug_conflict(&slug));
        }

        Ok(slug)
    }

    async fn claim_generated_code(&self, long_url: &str) -> Result<String, AppError> {
        for attempt in 1..=self.max_code_attempts {
            let code = generate_code(SHORT_CODE_LENGTH);

            if self.store.get(&code).await?.is_some() {
                debug!(code = %code, attempt, "Generated code collision");
                continue;
            }

            if self.store.put_if_absent(&code, long_url).await? {
                return Ok(code);
            }

            warn!(code = %code, attempt, "Generated code claimed concurrently");
        }

        error!(
            attempts = self.max_code_attempts,
            "Failed to generate unique short code"
        );

        Err(AppError::internal(
            "failed to generate unique short code",
            json!({ "attempts": self.max_code_attempts }),
        ))
    }
}

fn slug_conflict(slug: &str) -> AppError {
    AppError::conflict("custom slug already in use", json!({ "slug": slug }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkStore;
    use mockall::Sequence;

    fn service(store: MockLinkStore) -> LinkService {
        LinkService::new(Arc::new(store), DEFAULT_MAX_CODE_ATTEMPTS)
    }

    fn is_generated_code(code: &str) -> bool {
        code.len() == SHORT_CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
    }

    #[tokio::test]
    async fn test_create_link_generates_code() {
        let mut store = MockLinkStore::new();

        store
            .expect_get()
            .withf(|code| is_generated_code(code))
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_put_if_absent()
            .withf(|code, url| is_generated_code(code) && url == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(true));

        store.expect_put().times(0);

        let link = service(store)
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert!(is_generated_code(&link.code));
        assert_eq!(link.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_link_regenerates_on_collision() {
        let mut store = MockLinkStore::new();
        let mut seq = Sequence::new();

        store
            .expect_get()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some("https://taken.com".to_string())));

        store
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        store
            .expect_put_if_absent()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));

        let result = service(store)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_retries_when_conditional_write_loses() {
        let mut store = MockLinkStore::new();
        let mut seq = Sequence::new();

        store.expect_get().times(2).returning(|_| Ok(None));

        store
            .expect_put_if_absent()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(false));

        store
            .expect_put_if_absent()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));

        let result = service(store)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_gives_up_after_max_attempts() {
        let mut store = MockLinkStore::new();

        store
            .expect_get()
            .times(3)
            .returning(|_| Ok(Some("https://taken.com".to_string())));

        store.expect_put_if_absent().times(0);

        let service = LinkService::new(Arc::new(store), 3);
        let result = service
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_link_with_custom_slug() {
        let mut store = MockLinkStore::new();

        store
            .expect_get()
            .withf(|code| code == "promo")
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_put_if_absent()
            .withf(|code, url| code == "promo" && url == "https://a.com")
            .times(1)
            .returning(|_, _| Ok(true));

        let link = service(store)
            .create_link("https://a.com".to_string(), Some("promo".to_string()))
            .await
            .unwrap();

        assert_eq!(link.code, "promo");
        assert_eq!(link.long_url, "https://a.com");
    }

    #[tokio::test]
    async fn test_create_link_custom_slug_conflict() {
        let mut store = MockLinkStore::new();

        store
            .expect_get()
            .withf(|code| code == "promo")
            .times(1)
            .returning(|_| Ok(Some("https://a.com".to_string())));

        store.expect_put_if_absent().times(0);
        store.expect_put().times(0);

        let result = service(store)
            .create_link("https://b.com".to_string(), Some("promo".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_link_custom_slug_lost_race_is_conflict() {
        let mut store = MockLinkStore::new();

        store.expect_get().times(1).returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .times(1)
            .returning(|_, _| Ok(false));

        let result = service(store)
            .create_link("https://b.com".to_string(), Some("promo".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_link_empty_slug_generates_code() {
        let mut store = MockLinkStore::new();

        store
            .expect_get()
            .withf(|code| is_generated_code(code))
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .times(1)
            .returning(|_, _| Ok(true));

        let link = service(store)
            .create_link("https://example.com".to_string(), Some(String::new()))
            .await
            .unwrap();

        assert!(is_generated_code(&link.code));
    }

    #[tokio::test]
    async fn test_create_link_empty_url_touches_no_store() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(0);
        store.expect_put_if_absent().times(0);

        let result = service(store)
            .create_link(String::new(), Some("promo".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_link_propagates_store_error() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(AppError::internal("Store error", Value::Null)));

        let result = service(store)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_link_found() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let link = service(store).resolve_link("abc123").await.unwrap();

        assert_eq!(link, Link::new("abc123", "https://example.com"));
    }

    #[tokio::test]
    async fn test_resolve_link_not_found() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));

        let result = service(store).resolve_link("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_link_empty_code() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(0);

        let result = service(store).resolve_link("").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_zero_attempts_is_raised_to_one() {
        let service = LinkService::new(Arc::new(MockLinkStore::new()), 0);
        assert_eq!(service.max_code_attempts, 1);
    }
}
