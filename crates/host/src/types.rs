//! Shared DTOs crossing the host boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operating system the host runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
}

impl Platform {
    pub fn is_mobile(self) -> bool {
        matches!(self, Platform::Android | Platform::Ios)
    }
}

/// Information about the embedding client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub platform: Platform,
    /// Host application version string.
    #[serde(default)]
    pub application_version: String,
}

/// Components of a parsed URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlComponents {
    pub scheme: String,
    pub host: String,
    /// Zero when the URL carries no explicit port.
    pub port: u16,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

/// HTTP method for a host-mediated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
}

/// An HTTP request handed to the host for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRequest {
    pub url: String,
    pub headers: Vec<String>,
    pub body: String,
    pub content_type: String,
    pub method: HttpMethod,
}

/// Response to a [`UrlRequest`], delivered on the main task loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlResponse {
    pub status_code: i32,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

/// A notification ready for presentation by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationInfo {
    pub advertiser: String,
    pub category: String,
    pub text: String,
    pub url: String,
    pub creative_set_id: String,
    pub uuid: String,
}

/// How the user resolved a shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationResultKind {
    Clicked,
    Dismissed,
    TimedOut,
}
