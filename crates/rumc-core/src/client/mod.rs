//! Client classification from request headers.
//!
//! Produces one tag from a closed taxonomy: `undefined`, `desktop[:os]`,
//! `mobile[:os]`, `bot[:category]`. Rules are evaluated in a fixed order and
//! the first match wins; the order is the precedence.

mod os;
mod signatures;

pub use os::{desktop_os, mobile_os, DesktopOs, MobileOs};
pub use signatures::{
    BotSignatureTable, CategorySource, Signature, SignatureError, SignatureTableSource,
};

use crate::headers::{names, HeaderSource};
use crate::UNDEFINED;
use std::fmt;

/// Category used for requests from monitoring vendors.
pub const MONITORING: &str = "monitoring";

/// Client class tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientClass {
    Undefined,
    Desktop(Option<DesktopOs>),
    Mobile(Option<MobileOs>),
    /// Automated client, with the signature category when one matched.
    Bot(Option<String>),
}

#[derive(Debug, Clone, Copy)]
enum Device {
    Desktop,
    Mobile,
}

/// CDN viewer hints, in precedence order.
const VIEWER_HINTS: &[(&str, Device)] = &[
    (names::CF_DESKTOP_VIEWER, Device::Desktop),
    (names::CF_MOBILE_VIEWER, Device::Mobile),
    (names::CF_SMARTTV_VIEWER, Device::Desktop),
    (names::CF_TABLET_VIEWER, Device::Mobile),
];

const MOBILE_TOKENS: &[&str] = &["mobile", "android", "opera mini"];

const BOT_TOKENS: &[&str] = &[
    "bot",
    "spider",
    "crawler",
    "ahc/",
    "node",
    "python",
    "probe",
    "axios",
    "curl",
    "synthetics",
    "+https://",
    "+http://",
];

type HeaderRule = fn(&dyn HeaderSource) -> Option<ClientClass>;

/// Header-only rules, evaluated before the user-agent is looked at.
const HEADER_RULES: &[HeaderRule] = &[viewer_hint, monitoring_vendor];

fn viewer_hint(headers: &dyn HeaderSource) -> Option<ClientClass> {
    VIEWER_HINTS
        .iter()
        .find(|(name, _)| headers.header(name) == Some("true"))
        .map(|(_, device)| match device {
            Device::Desktop => ClientClass::Desktop(None),
            Device::Mobile => ClientClass::Mobile(None),
        })
}

fn monitoring_vendor(headers: &dyn HeaderSource) -> Option<ClientClass> {
    headers
        .non_empty(names::NEWRELIC_ID)
        .map(|_| ClientClass::Bot(Some(MONITORING.to_string())))
}

/// Classify a request by its headers. `None` means no header map at all.
pub fn classify_client<H: HeaderSource>(
    headers: Option<&H>,
    table: &BotSignatureTable,
) -> ClientClass {
    let Some(headers) = headers else {
        return ClientClass::Undefined;
    };
    let headers: &dyn HeaderSource = headers;

    if let Some(class) = HEADER_RULES.iter().find_map(|rule| rule(headers)) {
        return class;
    }

    match headers.non_empty(names::USER_AGENT) {
        Some(ua) => classify_user_agent(ua, table),
        None => ClientClass::Undefined,
    }
}

/// Classify a raw user-agent string.
pub fn classify_user_agent(user_agent: &str, table: &BotSignatureTable) -> ClientClass {
    let lc = user_agent.to_lowercase();

    if MOBILE_TOKENS.iter().any(|t| lc.contains(t)) {
        return ClientClass::Mobile(mobile_os(&lc));
    }

    if BOT_TOKENS.iter().any(|t| lc.contains(t)) || table.is_match(&lc) {
        let category = table.category(&lc).map(str::to_string);
        tracing::trace!(category = ?category, "user-agent classified as bot");
        return ClientClass::Bot(category);
    }

    ClientClass::Desktop(desktop_os(&lc))
}

/// String form of [`classify_client`].
pub fn masked_user_agent<H: HeaderSource>(
    headers: Option<&H>,
    table: &BotSignatureTable,
) -> String {
    classify_client(headers, table).to_string()
}

impl ClientClass {
    pub fn is_bot(&self) -> bool {
        matches!(self, ClientClass::Bot(_))
    }
}

impl fmt::Display for ClientClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientClass::Undefined => f.write_str(UNDEFINED),
            ClientClass::Desktop(None) => f.write_str("desktop"),
            ClientClass::Desktop(Some(os)) => write!(f, "desktop:{os}"),
            ClientClass::Mobile(None) => f.write_str("mobile"),
            ClientClass::Mobile(Some(os)) => write!(f, "mobile:{os}"),
            ClientClass::Bot(None) => f.write_str("bot"),
            ClientClass::Bot(Some(category)) => write!(f, "bot:{category}"),
        }
    }
}
