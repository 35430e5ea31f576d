//! Directory record tags
//!
//! Every directory record begins with a four-character code packed
//! little-endian into a `u32` (byte 0 in bits 0-7). Tags are plain integer
//! constants compared at parse time.

/// Pack a four-character code little-endian.
pub const fn tag(fcc: [u8; 4]) -> u32 {
    u32::from_le_bytes(fcc)
}

/// `PGRP` - group header record.
pub const TAG_GROUP: u32 = tag(*b"PGRP");

/// `PFIL` - per-(file, chunk) record.
pub const TAG_FILE: u32 = tag(*b"PFIL");

/// Render a tag for diagnostics. Non-printable bytes come out as `.`.
pub fn tag_name(raw: u32) -> String {
    raw.to_le_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_pack_little_endian() {
        // 'P' = 0x50, 'G' = 0x47, 'R' = 0x52
        assert_eq!(TAG_GROUP, 0x5052_4750);
        assert_eq!(TAG_FILE, 0x4c49_4650);
    }

    #[test]
    fn tag_name_round_trips_printable_tags() {
        assert_eq!(tag_name(TAG_GROUP), "PGRP");
        assert_eq!(tag_name(TAG_FILE), "PFIL");
    }

    #[test]
    fn tag_name_masks_unprintable_bytes() {
        assert_eq!(tag_name(0x0000_0041), "A...");
    }
}
