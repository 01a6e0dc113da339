//! Sales channel selection and shared helpers

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::config::Config;
use crate::traits::SalesChannel;

pub mod etsy;
pub mod website;

pub use etsy::EtsyChannel;
pub use website::WebsiteChannel;

/// Every channel a product can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Etsy,
    Website,
}

impl ChannelKind {
    pub const ALL: [Self; 2] = [Self::Etsy, Self::Website];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Etsy => "etsy",
            Self::Website => "website",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown channel '{s}'. Available channels: {}", known.join(", "))
            })
    }
}

/// Builds the channel implementation for `kind`.
pub fn build_channel(kind: ChannelKind, config: &Config) -> Result<Box<dyn SalesChannel>> {
    Ok(match kind {
        ChannelKind::Etsy => Box::new(EtsyChannel::new(&config.etsy)?),
        ChannelKind::Website => Box::new(WebsiteChannel::new(&config.website)),
    })
}

/// Lower-cases `title` and collapses every run of non-alphanumerics into one hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Formats `value` in lower-case base 36.
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
