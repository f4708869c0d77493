//! Recognition of search-engine result pages.
//!
//! A URL counts as a search when its host matches a known provider and its
//! path (plus, for providers that put the terms in the query string, the
//! query parameter) matches that provider's results page.

use adpulse_host::UrlComponents;

struct SearchProvider {
    host: &'static str,
    /// Path prefix of the provider's results page.
    path_prefix: &'static str,
    /// Query parameter carrying the search terms, when the path alone is
    /// not specific enough.
    query_param: Option<&'static str>,
}

const SEARCH_PROVIDERS: &[SearchProvider] = &[
    SearchProvider { host: "google.com", path_prefix: "/search", query_param: Some("q") },
    SearchProvider { host: "bing.com", path_prefix: "/search", query_param: Some("q") },
    SearchProvider { host: "search.yahoo.com", path_prefix: "/search", query_param: Some("p") },
    SearchProvider { host: "duckduckgo.com", path_prefix: "/", query_param: Some("q") },
    SearchProvider { host: "qwant.com", path_prefix: "/", query_param: Some("q") },
    SearchProvider { host: "ecosia.org", path_prefix: "/search", query_param: Some("q") },
    SearchProvider { host: "startpage.com", path_prefix: "/do/search", query_param: None },
    SearchProvider { host: "yandex.com", path_prefix: "/search", query_param: Some("text") },
    SearchProvider { host: "baidu.com", path_prefix: "/s", query_param: Some("wd") },
    SearchProvider { host: "search.aol.com", path_prefix: "/aol/search", query_param: Some("q") },
    SearchProvider { host: "ask.com", path_prefix: "/web", query_param: Some("q") },
    SearchProvider { host: "wolframalpha.com", path_prefix: "/input", query_param: Some("i") },
    SearchProvider { host: "github.com", path_prefix: "/search", query_param: Some("q") },
    SearchProvider { host: "stackoverflow.com", path_prefix: "/search", query_param: Some("q") },
    SearchProvider { host: "twitter.com", path_prefix: "/search", query_param: Some("q") },
    SearchProvider { host: "youtube.com", path_prefix: "/results", query_param: Some("search_query") },
    SearchProvider { host: "amazon.com", path_prefix: "/s", query_param: Some("k") },
];

/// Whether the components point at a search engine's results page.
pub fn is_search_engine(components: &UrlComponents) -> bool {
    let host = components.host.strip_prefix("www.").unwrap_or(&components.host);

    SEARCH_PROVIDERS.iter().any(|provider| {
        host == provider.host
            && components.path.starts_with(provider.path_prefix)
            && provider
                .query_param
                .map_or(true, |param| has_query_param(&components.query, param))
    })
}

fn has_query_param(query: &str, param: &str) -> bool {
    query
        .split('&')
        .any(|pair| pair.split('=').next() == Some(param))
}
