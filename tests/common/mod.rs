//! Synthetic DB1 image builder shared by the integration tests, the CLI
//! tests and the benches.
//!
//! Lays out a complete, valid database: header, string pool, sorted range
//! tables terminated by one boundary address each, and (optionally) full
//! 16-bit-bucket index tables computed from the rows. Header offset fields
//! are written 1-based, the way the format stores them.
#![allow(dead_code)]

/// Countries available to the fixture rows.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("AU", "Australia"),
    ("US", "United States"),
    ("DE", "Germany"),
    ("GB", "United Kingdom"),
];

/// Everything needed to lay out one database image.
pub struct DbLayout {
    pub v4: Vec<(u32, &'static str)>,
    pub v4_boundary: u32,
    pub v6: Vec<(u128, &'static str)>,
    pub v6_boundary: u128,
    pub with_index: bool,
    pub version: (u8, u8, u8),
}

/// The canonical fixture world used across the test suites.
///
/// IPv4: 1.0.0.0 -> AU, 8.0.0.0 -> US, 9.0.0.0 -> DE, 11.0.0.0 -> GB up to
/// the top of the space; anything below 1.0.0.0 is uncovered.
/// IPv6: 2001:4860:: -> US, 2001:4870:: -> DE up to the top of the space;
/// anything below 2001:4860:: is uncovered.
pub fn standard(with_index: bool) -> DbLayout {
    DbLayout {
        v4: vec![
            (0x0100_0000, "AU"),
            (0x0800_0000, "US"),
            (0x0900_0000, "DE"),
            (0x0B00_0000, "GB"),
        ],
        v4_boundary: u32::MAX,
        v6: vec![
            (0x2001_4860 << 96, "US"),
            (0x2001_4870 << 96, "DE"),
        ],
        v6_boundary: u128::MAX,
        with_index,
        version: (25, 8, 7),
    }
}

/// Serialize a `DbLayout` into DB1 image bytes.
pub fn build(layout: &DbLayout) -> Vec<u8> {
    let mut image = vec![0u8; 32];

    // String pool: [len][code][len][name] per country; the name record
    // sits exactly 3 bytes past the code record.
    let mut pool = Vec::new();
    for &(code, name) in COUNTRIES {
        pool.push((code, image.len() as u32));
        image.push(code.len() as u8);
        image.extend_from_slice(code.as_bytes());
        image.push(name.len() as u8);
        image.extend_from_slice(name.as_bytes());
    }
    let ptr = |code: &str| -> u32 {
        pool.iter()
            .find(|(c, _)| *c == code)
            .map(|(_, off)| *off)
            .expect("fixture row names an unknown country")
    };

    // IPv4 range table + terminating boundary address
    let v4_data = image.len() as u32;
    for &(from, code) in &layout.v4 {
        image.extend_from_slice(&from.to_le_bytes());
        image.extend_from_slice(&ptr(code).to_le_bytes());
    }
    image.extend_from_slice(&layout.v4_boundary.to_le_bytes());

    // IPv6 range table + terminating boundary address
    let v6_data = image.len() as u32;
    for &(from, code) in &layout.v6 {
        image.extend_from_slice(&from.to_le_bytes());
        image.extend_from_slice(&ptr(code).to_le_bytes());
    }
    image.extend_from_slice(&layout.v6_boundary.to_le_bytes());

    // Index tables: per 16-bit bucket, the row bounds covering it
    let (v4_index, v6_index) = if layout.with_index {
        let v4_froms: Vec<u128> = layout.v4.iter().map(|&(f, _)| f as u128).collect();
        let v4_index = image.len() as u32;
        write_index(&mut image, &v4_froms, 16);

        let v6_froms: Vec<u128> = layout.v6.iter().map(|&(f, _)| f).collect();
        let v6_index = image.len() as u32;
        write_index(&mut image, &v6_froms, 112);

        (v4_index + 1, v6_index + 1)
    } else {
        (0, 0)
    };

    // Fixed header; offset fields are 1-based
    image[0] = 1;
    image[1] = 2; // columns: address + country pointer
    image[2] = layout.version.0;
    image[3] = layout.version.1;
    image[4] = layout.version.2;
    image[5..9].copy_from_slice(&(layout.v4.len() as u32).to_le_bytes());
    image[9..13].copy_from_slice(&(v4_data + 1).to_le_bytes());
    image[13..17].copy_from_slice(&(layout.v6.len() as u32).to_le_bytes());
    image[17..21].copy_from_slice(&(v6_data + 1).to_le_bytes());
    image[21..25].copy_from_slice(&v4_index.to_le_bytes());
    image[25..29].copy_from_slice(&v6_index.to_le_bytes());

    image
}

/// Append 65536 `[low_row, high_row]` entries bounding each bucket of the
/// top 16 address bits.
fn write_index(image: &mut Vec<u8>, froms: &[u128], bucket_shift: u32) {
    for bucket in 0..=0xFFFFu32 {
        let start = (bucket as u128) << bucket_shift;
        let end = start | ((1u128 << bucket_shift) - 1);
        let low = last_row_at_or_below(froms, start);
        let high = last_row_at_or_below(froms, end);
        image.extend_from_slice(&low.to_le_bytes());
        image.extend_from_slice(&high.to_le_bytes());
    }
}

/// Index of the last row starting at or below `value`; 0 when none does
/// (the search then probes row 0 and misses cleanly).
fn last_row_at_or_below(froms: &[u128], value: u128) -> u32 {
    froms
        .iter()
        .filter(|&&from| from <= value)
        .count()
        .saturating_sub(1) as u32
}
