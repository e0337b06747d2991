//! IP address normalization.
//!
//! Query text is classified into IPv4 or IPv6 and reduced to a plain
//! unsigned integer (`u32` or `u128`). Three IPv6 blocks actually carry an
//! IPv4 address and are rewritten to it, so the search engine only ever
//! sees two address families:
//!
//! - v4-mapped (`::ffff:0:0/96`) - the v4 address is the low 32 bits
//! - 6to4 (`2002::/16`) - the v4 address sits in bits 80..112
//! - Teredo (`2001::/32`) - the v4 address is the complement of the low 32 bits
//!
//! The block checks run in this order with inclusive bounds; each later
//! check relies on the earlier ones having already excluded their block.

use std::net::IpAddr;

// https://en.wikipedia.org/wiki/IPv6#IPv4-mapped_IPv6_addresses
const V4_MAPPED_MIN: u128 = 0xffff_0000_0000;
const V4_MAPPED_MAX: u128 = 0xffff_ffff_ffff;

// 6to4, 2002::/16
const SIX_TO_FOUR_MIN: u128 = 0x2002 << 112;
const SIX_TO_FOUR_MAX: u128 = (0x2003 << 112) - 1;

// Teredo tunneling, 2001::/32
const TEREDO_MIN: u128 = 0x2001_0000 << 96;
const TEREDO_MAX: u128 = (0x2001_0001u128 << 96) - 1;

/// A normalized IP address: the family plus its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpValue {
    /// IPv4, including v4 addresses recovered from v6 carrier forms
    V4(u32),
    /// Plain IPv6
    V6(u128),
}

/// Classify address text and reduce it to `(family, integer)`.
///
/// Returns `None` when the text does not parse as any IP literal.
pub fn normalize(addr: &str) -> Option<IpValue> {
    match addr.parse::<IpAddr>().ok()? {
        IpAddr::V4(v4) => Some(IpValue::V4(u32::from(v4))),
        IpAddr::V6(v6) => {
            let n = u128::from(v6);

            if (V4_MAPPED_MIN..=V4_MAPPED_MAX).contains(&n) {
                Some(IpValue::V4((n - V4_MAPPED_MIN) as u32))
            } else if (SIX_TO_FOUR_MIN..=SIX_TO_FOUR_MAX).contains(&n) {
                Some(IpValue::V4((n >> 80) as u32))
            } else if (TEREDO_MIN..=TEREDO_MAX).contains(&n) {
                // Teredo embeds the complement of the client address
                Some(IpValue::V4(!n as u32))
            } else {
                Some(IpValue::V6(n))
            }
        }
    }
}
