//! TCP segment parsing
//!
//! Only the fields the capture workflow reports are decoded: ports, sequence
//! and acknowledgment numbers, data offset, and the control bits at byte 13
//! (a fixed offset inside the 20-byte minimum header). The payload starts
//! after the full header as given by the data-offset field.

use rawnet_core::{DecodeError, Layer};

/// TCP control bit masks (byte 13 of the header)
pub mod flags {
    pub const FIN: u8 = 0x01;
    pub const SYN: u8 = 0x02;
    pub const RST: u8 = 0x04;
    pub const PSH: u8 = 0x08;
    pub const ACK: u8 = 0x10;
    pub const URG: u8 = 0x20;
}

/// TCP segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpSegment {
    /// Source port
    pub source_port: u16,
    /// Destination port
    pub destination_port: u16,
    /// Sequence number
    pub sequence: u32,
    /// Acknowledgment number
    pub acknowledgment: u32,
    /// Header length in 32-bit words (minimum 5)
    pub data_offset: u8,
    /// Control bits (CWR/ECE excluded, byte 13 only)
    pub flags: u8,
    /// Payload data (bytes after data_offset * 4)
    pub payload: Vec<u8>,
}

impl TcpSegment {
    /// Minimum TCP header size (data offset = 5, no options)
    pub const MIN_HEADER_SIZE: usize = 20;

    /// Header length in bytes (data_offset * 4)
    pub fn header_len(&self) -> usize {
        self.data_offset as usize * 4
    }

    /// Check whether a control bit from [`flags`] is set
    pub fn has_flag(&self, mask: u8) -> bool {
        self.flags & mask != 0
    }

    /// Parse a TCP segment from raw bytes
    ///
    /// Fails with `TooShort` below 20 bytes or below the header length the
    /// data-offset field announces, and with `InvalidHeaderLength` if the
    /// data offset is below the 5-word minimum.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::MIN_HEADER_SIZE {
            return Err(DecodeError::too_short(
                Layer::Tcp,
                Self::MIN_HEADER_SIZE,
                data.len(),
            ));
        }

        let data_offset = data[12] >> 4;
        if data_offset < 5 {
            return Err(DecodeError::InvalidHeaderLength(data_offset));
        }

        let header_len = data_offset as usize * 4;
        if data.len() < header_len {
            return Err(DecodeError::too_short(Layer::Tcp, header_len, data.len()));
        }

        Ok(TcpSegment {
            source_port: u16::from_be_bytes([data[0], data[1]]),
            destination_port: u16::from_be_bytes([data[2], data[3]]),
            sequence: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            acknowledgment: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            data_offset,
            flags: data[13],
            payload: data[header_len..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Header with data offset 5 and the given flags, then `payload`
    fn sample_segment(data_offset: u8, flags_byte: u8, payload: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; 20];
        data[0..2].copy_from_slice(&443u16.to_be_bytes());
        data[2..4].copy_from_slice(&51000u16.to_be_bytes());
        data[4..8].copy_from_slice(&0x1122_3344u32.to_be_bytes());
        data[8..12].copy_from_slice(&0x5566_7788u32.to_be_bytes());
        data[12] = data_offset << 4;
        data[13] = flags_byte;
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_nineteen_bytes_too_short() {
        let err = TcpSegment::from_bytes(&[0u8; 19]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                layer: Layer::Tcp,
                required: 20,
                actual: 19,
            }
        );
    }

    #[test]
    fn test_header_fields() {
        let segment = TcpSegment::from_bytes(&sample_segment(5, flags::SYN | flags::ACK, &[]))
            .unwrap();
        assert_eq!(segment.source_port, 443);
        assert_eq!(segment.destination_port, 51000);
        assert_eq!(segment.sequence, 0x1122_3344);
        assert_eq!(segment.acknowledgment, 0x5566_7788);
        assert!(segment.has_flag(flags::SYN));
        assert!(segment.has_flag(flags::ACK));
        assert!(!segment.has_flag(flags::FIN));
        assert!(segment.payload.is_empty());
    }

    #[test]
    fn test_payload_after_options() {
        let mut data = sample_segment(6, flags::PSH, &[]);
        data.extend_from_slice(&[0, 0, 0, 0]); // 4 bytes of options
        data.extend_from_slice(b"data");
        let segment = TcpSegment::from_bytes(&data).unwrap();
        assert_eq!(segment.header_len(), 24);
        assert_eq!(segment.payload, b"data");
    }

    #[test]
    fn test_data_offset_below_minimum() {
        let data = sample_segment(4, 0, &[]);
        assert_eq!(
            TcpSegment::from_bytes(&data).unwrap_err(),
            DecodeError::InvalidHeaderLength(4)
        );
    }

    #[test]
    fn test_announced_header_longer_than_input() {
        let data = sample_segment(7, 0, &[]); // announces 28 bytes, input is 20
        assert_eq!(
            TcpSegment::from_bytes(&data).unwrap_err(),
            DecodeError::TooShort {
                layer: Layer::Tcp,
                required: 28,
                actual: 20,
            }
        );
    }
}
