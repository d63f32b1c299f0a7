//! Cookie Management Infrastructure
//!
//! A configured cookie envelope ([`CookieConfig`]) stamps out concrete
//! [`SetCookie`] values, either live (value + lifetime) or expired (used to
//! make the client drop the cookie).

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponseParts, ResponseParts};
use chrono::{DateTime, Utc};

/// `Expires` attribute format (IMF-fixdate, RFC 7231)
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Static attributes shared by every cookie of one kind
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            path: "/".to_string(),
            domain: None,
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
        }
    }
}

impl CookieConfig {
    /// Live cookie carrying `value` for `ttl`, counted from `now`
    pub fn issue(&self, value: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> SetCookie {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let expires = chrono::Duration::try_seconds(ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SetCookie {
            name: self.name.clone(),
            value: value.into(),
            path: self.path.clone(),
            domain: self.domain.clone(),
            expires,
            max_age_secs: ttl_secs,
            same_site: self.same_site,
            http_only: self.http_only,
            secure: self.secure,
        }
    }

    /// Same name/path/domain/flags, empty value, epoch expiry, negative max-age
    pub fn expire(&self) -> SetCookie {
        SetCookie {
            name: self.name.clone(),
            value: String::new(),
            path: self.path.clone(),
            domain: self.domain.clone(),
            expires: DateTime::UNIX_EPOCH,
            max_age_secs: -1,
            same_site: self.same_site,
            http_only: self.http_only,
            secure: self.secure,
        }
    }
}

/// A concrete `Set-Cookie` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub domain: Option<String>,
    pub expires: DateTime<Utc>,
    /// Negative means "delete now"
    pub max_age_secs: i64,
    pub same_site: SameSite,
    pub http_only: bool,
    pub secure: bool,
}

impl SetCookie {
    /// Render the `Set-Cookie` header value
    pub fn header_value(&self) -> String {
        let mut cookie = format!("{}={}", self.name, self.value);

        cookie.push_str(&format!("; Path={}", self.path));
        if let Some(domain) = &self.domain {
            cookie.push_str(&format!("; Domain={}", domain));
        }
        cookie.push_str(&format!("; Expires={}", self.expires.format(EXPIRES_FORMAT)));
        // Non-positive Max-Age is written as 0 (RFC 6265: expire immediately)
        cookie.push_str(&format!("; Max-Age={}", self.max_age_secs.max(0)));
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));

        cookie
    }

    pub fn is_expired(&self) -> bool {
        self.max_age_secs < 0
    }
}

impl IntoResponseParts for SetCookie {
    type Error = StatusCode;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let value = HeaderValue::from_str(&self.header_value())
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        res.headers_mut().append(header::SET_COOKIE, value);
        Ok(res)
    }
}

/// Extract a cookie value from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> CookieConfig {
        CookieConfig {
            name: "refresh_token".to_string(),
            path: "/".to_string(),
            domain: Some("localhost".to_string()),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
        }
    }

    #[test]
    fn test_issue_sets_lifetime_from_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let cookie = config().issue("abc", Duration::from_secs(86_400), now);

        assert_eq!(cookie.value, "abc");
        assert_eq!(cookie.max_age_secs, 86_400);
        assert_eq!(
            cookie.expires,
            Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()
        );
        assert!(!cookie.is_expired());
    }

    #[test]
    fn test_header_value_attributes() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let header = config()
            .issue("abc", Duration::from_secs(60), now)
            .header_value();

        assert!(header.starts_with("refresh_token=abc"));
        assert!(header.contains("; Path=/"));
        assert!(header.contains("; Domain=localhost"));
        assert!(header.contains("; Expires=Fri, 01 Mar 2024 12:01:00 GMT"));
        assert!(header.contains("; Max-Age=60"));
        assert!(header.contains("; HttpOnly"));
        assert!(header.contains("; Secure"));
        assert!(header.contains("; SameSite=Strict"));
    }

    #[test]
    fn test_expire() {
        let cookie = config().expire();

        assert_eq!(cookie.value, "");
        assert_eq!(cookie.max_age_secs, -1);
        assert_eq!(cookie.expires, DateTime::<Utc>::UNIX_EPOCH);
        assert!(cookie.is_expired());

        let header = cookie.header_value();
        assert!(header.starts_with("refresh_token=;"));
        assert!(header.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(header.contains("Max-Age=0"));
        assert!(header.contains("SameSite=Strict"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; refresh_token=abc.def.ghi; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "refresh_token"),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));

        assert_eq!(extract_cookie(&headers, "b"), Some("2".to_string()));
    }
}
