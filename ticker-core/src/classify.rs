use crate::error::FeedError;
use crate::types::ErrorCase;

const HTTP_TOO_MANY_REQUESTS: u16 = 429;

/// Сводит ошибку транспорта к классу, который показывается пользователю
pub fn classify(err: &FeedError) -> ErrorCase {
    match err {
        FeedError::Unreachable(_) => ErrorCase::Connectivity,
        FeedError::Timeout(_) => ErrorCase::Timeout,
        FeedError::Status(HTTP_TOO_MANY_REQUESTS) => ErrorCase::RateLimited,
        FeedError::Status(_) | FeedError::Body(_) | FeedError::Other(_) => ErrorCase::Generic,
    }
}

impl From<&FeedError> for ErrorCase {
    fn from(err: &FeedError) -> Self {
        classify(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_resolution_is_connectivity() {
        let e = FeedError::Unreachable("dns error: failed to lookup address".into());
        assert_eq!(classify(&e), ErrorCase::Connectivity);
    }

    #[test]
    fn timeout_is_timeout() {
        assert_eq!(classify(&FeedError::Timeout("read".into())), ErrorCase::Timeout);
    }

    #[test]
    fn status_429_is_rate_limited() {
        assert_eq!(classify(&FeedError::Status(429)), ErrorCase::RateLimited);
    }

    #[test]
    fn everything_else_is_generic() {
        for e in [
            FeedError::Status(500),
            FeedError::Status(404),
            FeedError::Status(403),
            FeedError::Body("expected array".into()),
            FeedError::Other("boom".into()),
        ] {
            assert_eq!(ErrorCase::from(&e), ErrorCase::Generic, "{e}");
        }
    }
}
