//! Web page content extraction
//!
//! Turns a page URL into a short topic string for hashtag generation.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::{redirect, Client};
use scraper::{Html, Selector};
use url::{Host, Url};

use crate::error::AppError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const MAX_REDIRECTS: usize = 5;
/// Largest page body read, in bytes
const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

const MAX_HEADINGS: usize = 3;
const MAX_HEADING_CHARS: usize = 200;
const MAX_PARAGRAPHS: usize = 3;
const MIN_PARAGRAPH_CHARS: usize = 50;
const MAX_BODY_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub content: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Fetches pages on public hosts only.
///
/// Host names are resolved through [`PublicOnlyResolver`]; IP-literal hosts
/// are checked on the submitted URL and on every redirect hop.
#[derive(Clone)]
pub struct ContentExtractor {
    client: Client,
    allow_private_hosts: bool,
}

impl ContentExtractor {
    pub fn new() -> Result<Self, AppError> {
        Self::build(FETCH_TIMEOUT, false)
    }

    fn build(timeout: Duration, allow_private_hosts: bool) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(redirect_policy(allow_private_hosts));
        if !allow_private_hosts {
            builder = builder.dns_resolver(Arc::new(PublicOnlyResolver));
        }

        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            allow_private_hosts,
        })
    }

    pub async fn extract(&self, raw_url: &str) -> Result<ExtractedContent, AppError> {
        let url = normalize_url(raw_url)?;
        if !self.allow_private_hosts && !is_public_host(&url) {
            return Err(AppError::ValidationError(
                "URL must point to a public host.".to_string(),
            ));
        }
        tracing::info!(url = %url, "Fetching page content");

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ExtractionFailed("the page took too long to respond".to_string())
                } else {
                    AppError::ExtractionFailed(format!("failed to fetch URL: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExtractionFailed(format!(
                "the page answered with HTTP {}",
                status.as_u16()
            )));
        }

        let too_large = || {
            AppError::ExtractionFailed(format!(
                "the page is larger than {} MB",
                MAX_PAGE_BYTES / (1024 * 1024)
            ))
        };
        if response
            .content_length()
            .is_some_and(|len| len > MAX_PAGE_BYTES as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            if e.is_timeout() {
                AppError::ExtractionFailed("the page took too long to respond".to_string())
            } else {
                AppError::ExtractionFailed(format!("failed to read page body: {e}"))
            }
        })? {
            if body.len() + chunk.len() > MAX_PAGE_BYTES {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        let html = String::from_utf8_lossy(&body);

        let extracted = extract_from_html(&html, url.as_str());
        if extracted.content.is_empty() {
            return Err(AppError::ExtractionFailed(
                "no readable content found on the page".to_string(),
            ));
        }

        tracing::debug!(
            content_length = extracted.content.len(),
            "Page content extracted"
        );
        Ok(extracted)
    }
}

fn redirect_policy(allow_private_hosts: bool) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if !matches!(attempt.url().scheme(), "http" | "https") {
            attempt.error("redirect to a non-http URL")
        } else if !allow_private_hosts && !is_public_host(attempt.url()) {
            attempt.error("redirect to a non-public address")
        } else {
            attempt.follow()
        }
    })
}

/// Resolves host names and refuses any that map to a non-public address
struct PublicOnlyResolver;

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let host = name.as_str().to_string();
        Box::pin(async move {
            let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
                .await?
                .collect();
            if addrs.is_empty() || addrs.iter().any(|addr| !is_public_ip(addr.ip())) {
                return Err(format!("{host} does not resolve to a public address").into());
            }
            Ok::<Addrs, Box<dyn std::error::Error + Send + Sync>>(Box::new(addrs.into_iter()))
        })
    }
}

/// False for IP-literal hosts outside public address space; domain names
/// are left to the resolver.
fn is_public_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => is_public_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_public_ip(IpAddr::V6(ip)),
        Some(Host::Domain(_)) => true,
        None => false,
    }
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.is_multicast()
                || a == 0
                || (a == 100 && (64..128).contains(&b)))
        }
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_public_ip(IpAddr::V4(mapped));
            }
            let first = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                || v6.is_multicast()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80)
        }
    }
}

/// Prepends `https://` when no scheme is given and requires an http(s) URL with a host
pub fn normalize_url(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError("URL is required.".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let invalid = || AppError::ValidationError(format!("Invalid URL format: {trimmed}"));
    let url = Url::parse(&candidate).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid()),
    }
}

/// Condenses an HTML document into `Title | Description | Key topics | Content`
pub fn extract_from_html(html: &str, url: &str) -> ExtractedContent {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title").unwrap_or_default();
    let description = meta_content(&document, "meta[name=\"description\"]")
        .or_else(|| meta_content(&document, "meta[property=\"og:description\"]"))
        .unwrap_or_default();

    let headings: Vec<String> = texts(&document, "h1, h2, h3")
        .into_iter()
        .filter(|text| text.chars().count() < MAX_HEADING_CHARS)
        .take(MAX_HEADINGS)
        .collect();

    let paragraphs: Vec<String> = texts(&document, "p")
        .into_iter()
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .take(MAX_PARAGRAPHS)
        .collect();

    let mut parts = Vec::new();
    if !title.is_empty() {
        parts.push(format!("Title: {title}"));
    }
    if !description.is_empty() {
        parts.push(format!("Description: {description}"));
    }
    if !headings.is_empty() {
        parts.push(format!("Key topics: {}", headings.join(", ")));
    }
    if !paragraphs.is_empty() {
        let body: String = paragraphs.join(" ").chars().take(MAX_BODY_CHARS).collect();
        parts.push(format!("Content: {body}..."));
    }

    ExtractedContent {
        content: parts.join(" | "),
        title,
        description,
        url: url.to_string(),
    }
}

fn texts(document: &Html, selector: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect()
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    texts(document, selector).into_iter().next()
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("content"))
        .map(collapse_whitespace)
        .find(|content| !content.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
