use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    LinkedIn,
    Twitter,
    Facebook,
    Email,
}

impl SharePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePlatform::LinkedIn => "linkedin",
            SharePlatform::Twitter => "twitter",
            SharePlatform::Facebook => "facebook",
            SharePlatform::Email => "email",
        }
    }

    /// Builds the share link for `page_url`. Query values are form-encoded.
    pub fn share_url(&self, page_url: &str, title: &str) -> Result<Url, AppError> {
        let (base, params): (&str, Vec<(&str, &str)>) = match self {
            SharePlatform::LinkedIn => (
                "https://www.linkedin.com/sharing/share-offsite/",
                vec![("url", page_url)],
            ),
            SharePlatform::Twitter => (
                "https://twitter.com/intent/tweet",
                vec![("url", page_url), ("text", title)],
            ),
            SharePlatform::Facebook => (
                "https://www.facebook.com/sharer/sharer.php",
                vec![("u", page_url)],
            ),
            SharePlatform::Email => ("mailto:", vec![("subject", title), ("body", page_url)]),
        };

        let mut url = Url::parse(base)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("bad share base {base}: {e}")))?;
        url.query_pairs_mut().extend_pairs(params);
        if *self == SharePlatform::Email {
            // Mail clients show a form-encoded `+` literally. A real `+` is already `%2B`.
            let query = url.query().map(|q| q.replace('+', "%20"));
            url.set_query(query.as_deref());
        }
        Ok(url)
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePlatform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(SharePlatform::LinkedIn),
            "twitter" => Ok(SharePlatform::Twitter),
            "facebook" => Ok(SharePlatform::Facebook),
            "email" => Ok(SharePlatform::Email),
            other => Err(AppError::InvalidCommand(format!(
                "unknown share platform '{other}'"
            ))),
        }
    }
}
