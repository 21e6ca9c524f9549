//! Magic-byte content classification
//!
//! Client-declared content types are untrusted. Classification reads a
//! bounded prefix of the actual bytes and the result is matched against a
//! closed whitelist; anything unrecognized is rejected.

/// Bytes inspected for classification. Every supported signature sits
/// within the first few bytes, so this window is more than enough.
pub const SNIFF_LEN: usize = 512;

/// Content types accepted for stored assets.
pub const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// Classifies `data` by its leading bytes. Returns `None` when no known
/// signature matches.
pub fn sniff_content_type(data: &[u8]) -> Option<&'static str> {
    let window = &data[..data.len().min(SNIFF_LEN)];
    infer::get(window).map(|kind| kind.mime_type())
}

/// Whether a sniffed content type is allowed for storage.
pub fn is_allowed(content_type: &str) -> bool {
    ALLOWED_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_MAGIC: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];
    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_sniffs_jpeg() {
        let mut data = JPEG_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 64]);
        assert_eq!(sniff_content_type(&data), Some("image/jpeg"));
    }

    #[test]
    fn test_sniffs_png() {
        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 64]);
        assert_eq!(sniff_content_type(&data), Some("image/png"));
    }

    #[test]
    fn test_sniffs_pdf() {
        let data = b"%PDF-1.7\n%some pdf body".to_vec();
        assert_eq!(sniff_content_type(&data), Some("application/pdf"));
    }

    #[test]
    fn test_unknown_bytes_sniff_to_none() {
        assert_eq!(sniff_content_type(b"hello world, plain text"), None);
        assert_eq!(sniff_content_type(&[]), None);
    }

    #[test]
    fn test_executable_not_allowed() {
        // ELF sniffs to a real type, but not a whitelisted one
        let data = [0x7F, 0x45, 0x4C, 0x46, 0x02, 0x01, 0x01, 0x00];
        if let Some(kind) = sniff_content_type(&data) {
            assert!(!is_allowed(kind));
        }
    }

    #[test]
    fn test_whitelist_membership() {
        assert!(is_allowed("image/jpeg"));
        assert!(is_allowed("image/png"));
        assert!(is_allowed("application/pdf"));
        assert!(!is_allowed("image/gif"));
        assert!(!is_allowed("text/html"));
    }
}
