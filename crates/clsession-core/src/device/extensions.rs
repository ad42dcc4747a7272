//! Device extension listing.

use std::collections::BTreeSet;

use crate::{
    error::{Result, SessionError},
    query::keys,
    runtime::ComputeRuntime,
};

/// Extension tokens advertised by a device.
///
/// Tokens keep the order the driver reported them in. Membership and
/// equality ignore order and repeats.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSet {
    tokens: Vec<String>,
}

impl ExtensionSet {
    /// Tokenizes a raw extension string.
    ///
    /// Some drivers pad the string with NUL bytes; everything from the first
    /// NUL on is dropped before splitting on whitespace.
    pub fn parse(raw: &[u8]) -> Self {
        let text = raw.split(|&b| b == 0).next().unwrap_or_default();
        let tokens = String::from_utf8_lossy(text)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    /// Whether the device advertises `token`.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Whether the device advertises any of `tokens`.
    pub fn contains_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|token| self.contains(token))
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the device advertises no extensions.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates the tokens in reported order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    fn distinct(&self) -> BTreeSet<&str> {
        self.iter().collect()
    }
}

impl PartialEq for ExtensionSet {
    fn eq(&self, other: &Self) -> bool {
        self.distinct() == other.distinct()
    }
}

impl Eq for ExtensionSet {}

impl IntoIterator for ExtensionSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Lists the extensions `device` reports.
pub fn device_extensions<R: ComputeRuntime>(runtime: &R, device: R::Device) -> Result<ExtensionSet> {
    let raw = runtime
        .device_info(device, keys::DEVICE_EXTENSIONS)
        .map_err(|err| SessionError::query("CL_DEVICE_EXTENSIONS", err))?;
    Ok(ExtensionSet::parse(&raw))
}
