//! Delivery channels and the address shapes each one accepts.

use serde::Serialize;

/// Prefix that marks a push-notification device token.
pub const DEVICE_PREFIX: &str = "device_";

/// A delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
}

impl Channel {
    /// Returns true if `address` has this channel's shape.
    ///
    /// These are loose shape checks, not address validation.
    pub fn accepts(&self, address: &str) -> bool {
        match self {
            Channel::Email => address.contains('@'),
            Channel::Sms => is_phone_shaped(address),
            Channel::Push => address.starts_with(DEVICE_PREFIX),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `+` followed by 10 to 15 ASCII digits and nothing else.
fn is_phone_shaped(address: &str) -> bool {
    match address.strip_prefix('+') {
        Some(digits) => {
            (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
