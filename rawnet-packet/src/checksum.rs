//! Internet checksum calculation (RFC 1071)
//!
//! Used for the IPv4 header checksum and the ICMP message checksum of
//! outgoing echo requests.

/// Calculates the Internet Checksum as defined in RFC 1071.
///
/// The data is treated as a sequence of big-endian 16-bit words which are
/// summed with end-around carry; the result is the one's complement of the
/// folded sum. An odd trailing byte is padded with a zero low byte.
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    let mut chunks = data.chunks_exact(2);
    for chunk in &mut chunks {
        let word = u16::from_be_bytes([chunk[0], chunk[1]]);
        sum += word as u32;
    }

    if let Some(&byte) = chunks.remainder().first() {
        sum += (byte as u32) << 8;
    }

    // Fold 32-bit sum to 16 bits
    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    !sum as u16
}

/// Validates data that carries its checksum inline.
///
/// Summing a packet including its checksum field yields 0 (or the one's
/// complement equivalent 0xFFFF) when the checksum is correct.
pub fn validate_checksum(data: &[u8]) -> bool {
    let result = internet_checksum(data);
    result == 0 || result == 0xFFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_empty() {
        assert_eq!(internet_checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_checksum_odd_length_pads_low_byte() {
        // 0x0001 + 0x0200 = 0x0201, complement 0xFDFE
        let data = [0x00, 0x01, 0x02];
        assert_eq!(internet_checksum(&data), 0xFDFE);
    }

    #[test]
    fn test_checksum_end_around_carry() {
        // 0xFFFF + 0x0001 folds to 0x0001, complement 0xFFFE
        let data = [0xFF, 0xFF, 0x00, 0x01];
        assert_eq!(internet_checksum(&data), 0xFFFE);
    }

    #[test]
    fn test_checksum_complement_identity() {
        let data = vec![0x45, 0x00, 0x00, 0x3c, 0x12, 0x34];
        let checksum = internet_checksum(&data);

        let mut with_checksum = data;
        with_checksum.extend_from_slice(&checksum.to_be_bytes());
        assert!(validate_checksum(&with_checksum));
    }
}
