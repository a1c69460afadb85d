//! Packet framing and checksums.

use crate::PacketError;

/// Positive acknowledgment token.
pub const ACK: u8 = b'+';

/// Negative acknowledgment token (request retransmit).
pub const NACK: u8 = b'-';

const PACKET_START: u8 = b'$';
const CHECKSUM_SEP: u8 = b'#';

/// A decoded RSP packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Text between `$` and `#`, verbatim.
    pub payload: String,
    /// Checksum as transmitted, `None` if the sender omitted the digits.
    pub checksum: Option<u8>,
}

impl Packet {
    /// Checksum computed over the payload.
    #[must_use]
    pub fn computed_checksum(&self) -> u8 {
        checksum(self.payload.as_bytes())
    }

    /// Compare the transmitted checksum against the computed one.
    ///
    /// A packet without checksum digits is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::ChecksumMismatch`] if the two differ.
    pub fn verify(&self) -> Result<(), PacketError> {
        let expected = self.computed_checksum();
        match self.checksum {
            Some(received) if received != expected => {
                Err(PacketError::ChecksumMismatch { expected, received })
            }
            _ => Ok(()),
        }
    }
}

/// Modulo-256 sum of `bytes`.
#[must_use]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Frame `payload` as `$<payload>#<xx>`.
#[must_use]
pub fn encode(payload: &str) -> Vec<u8> {
    let sum = checksum(payload.as_bytes());
    format!("${payload}#{sum:02x}").into_bytes()
}

/// Extract the first packet from `raw`.
///
/// Anything before the first `$` (typically acknowledgment tokens) is
/// skipped, as is anything after the checksum digits. The transmitted
/// checksum is parsed but not checked; see [`Packet::verify`].
///
/// # Errors
///
/// Fails if the frame delimiters are missing, the checksum has one digit
/// or non-hex digits, or the payload is not UTF-8.
pub fn decode(raw: &[u8]) -> Result<Packet, PacketError> {
    let start = raw
        .iter()
        .position(|&b| b == PACKET_START)
        .ok_or(PacketError::MissingStart)?;
    let body = &raw[start + 1..];
    let sep = body
        .iter()
        .position(|&b| b == CHECKSUM_SEP)
        .ok_or(PacketError::MissingTerminator)?;

    let payload = std::str::from_utf8(&body[..sep])
        .map_err(|_| PacketError::InvalidUtf8)?
        .to_string();

    let trailer = &body[sep + 1..];
    let checksum = match trailer.len() {
        0 => None,
        1 => return Err(PacketError::InvalidChecksum(trailer.escape_ascii().to_string())),
        _ => Some(parse_checksum(&trailer[..2])?),
    };

    Ok(Packet { payload, checksum })
}

fn parse_checksum(digits: &[u8]) -> Result<u8, PacketError> {
    let invalid = || PacketError::InvalidChecksum(String::from_utf8_lossy(digits).into_owned());
    // from_str_radix would accept a sign prefix
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return Err(invalid());
    }
    let text = std::str::from_utf8(digits).map_err(|_| invalid())?;
    u8::from_str_radix(text, 16).map_err(|_| invalid())
}

/// True if `chunk` holds nothing but acknowledgment tokens.
#[must_use]
pub fn is_ack_only(chunk: &[u8]) -> bool {
    !chunk.is_empty() && chunk.iter().all(|&b| b == ACK || b == NACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(b""), 0);
        assert_eq!(checksum(b"S05"), 0xb8);
        assert_eq!(checksum(b"PacketSize=120"), 0xc3);
        // Wraps modulo 256
        assert_eq!(checksum(&[0xff, 0x02]), 0x01);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(""), b"$#00");
    }

    #[test]
    fn test_encode_stop_reply() {
        assert_eq!(encode("S05"), b"$S05#b8");
    }

    #[test]
    fn test_encode_pads_checksum() {
        // "\x05" sums to 5, must render as two digits
        assert_eq!(encode("\u{5}"), b"$\x05#05");
    }

    #[test]
    fn test_decode_basic() {
        let packet = decode(b"$g#67").unwrap();
        assert_eq!(packet.payload, "g");
        assert_eq!(packet.checksum, Some(0x67));
        assert!(packet.verify().is_ok());
    }

    #[test]
    fn test_decode_skips_leading_ack() {
        let packet = decode(b"+$qSupported:swbreak+;hwbreak+#a1").unwrap();
        assert_eq!(packet.payload, "qSupported:swbreak+;hwbreak+");
    }

    #[test]
    fn test_decode_without_checksum_digits() {
        let packet = decode(b"$s#").unwrap();
        assert_eq!(packet.payload, "s");
        assert_eq!(packet.checksum, None);
        assert!(packet.verify().is_ok());

    }

    #[test]
    fn test_decode_truncated_checksum() {
        assert_eq!(
            decode(b"$s#7"),
            Err(PacketError::InvalidChecksum("7".to_string()))
        );
        assert_eq!(
            decode(b"$s#0"),
            Err(PacketError::InvalidChecksum("0".to_string()))
        );
    }

    #[test]
    fn test_decode_uppercase_checksum() {
        assert_eq!(decode(b"$S05#B8").unwrap().checksum, Some(0xb8));
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(b"qSupported"), Err(PacketError::MissingStart));
        assert_eq!(decode(b"$qSupported"), Err(PacketError::MissingTerminator));
        assert_eq!(
            decode(b"$g#zz"),
            Err(PacketError::InvalidChecksum("zz".to_string()))
        );
        assert_eq!(decode(b"$\xff\xfe#00"), Err(PacketError::InvalidUtf8));
    }

    #[test]
    fn test_verify_mismatch() {
        let packet = decode(b"$?#00").unwrap();
        assert_eq!(
            packet.verify(),
            Err(PacketError::ChecksumMismatch {
                expected: 0x3f,
                received: 0x00
            })
        );
    }

    #[test]
    fn test_round_trip() {
        for payload in ["", "?", "g", "S05", "qXfer:features:read:target.xml:0,ffb", "vCont?"] {
            let packet = decode(&encode(payload)).unwrap();
            assert_eq!(packet.payload, payload);
            assert!(packet.verify().is_ok());
        }
    }

    #[test]
    fn test_is_ack_only() {
        assert!(is_ack_only(b"+"));
        assert!(is_ack_only(b"-"));
        assert!(is_ack_only(b"++-"));
        assert!(!is_ack_only(b""));
        assert!(!is_ack_only(b"+$?#3f"));
    }
}
