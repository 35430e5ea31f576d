//! 32-bit content-name hashes
//!
//! Directory records refer to names by hash rather than storing them inline,
//! and `DATA` assets ship on disc under the uppercase-hex hash of their
//! logical name instead of the name itself. Both uses are CRC-32 (IEEE).
//!
//! The two variants are deliberately separate functions: string-table
//! resolution and on-disc artifact naming are independent call sites and are
//! not required to agree on case handling.

/// Hash a name, ignoring ASCII case.
pub fn hash_name(name: &str) -> u32 {
    let lowered: Vec<u8> = name.bytes().map(|b| b.to_ascii_lowercase()).collect();
    crc32fast::hash(&lowered)
}

/// Hash a name exactly as given.
pub fn hash_name_exact(name: &str) -> u32 {
    crc32fast::hash(name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_variant_folds_ascii_case() {
        assert_eq!(hash_name("TEXT/STRINGS.CSV"), hash_name("text/strings.csv"));
        assert_eq!(hash_name("Package.toc"), hash_name("package.toc"));
    }

    #[test]
    fn exact_variant_distinguishes_case() {
        assert_ne!(
            hash_name_exact("TEXT/STRINGS.CSV"),
            hash_name_exact("text/strings.csv")
        );
    }

    #[test]
    fn lowercase_input_hashes_identically_in_both_variants() {
        assert_eq!(hash_name("data/menu.bin"), hash_name_exact("data/menu.bin"));
    }

    #[test]
    fn known_crc32_vector() {
        // CRC-32/IEEE of "123456789"
        assert_eq!(hash_name_exact("123456789"), 0xcbf4_3926);
    }
}
