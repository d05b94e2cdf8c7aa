//! Lowercase hex encoding and decoding for fixed-width byte values.

/// Encode bytes as lowercase hex without a prefix.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", encode(bytes))
}

/// Decode a hex string, with or without a `0x` prefix, into exactly `N` bytes.
///
/// When `left_pad` is set, shorter inputs are left-padded with zeros
/// (the `uint256` convention). Returns `None` on any non-hex character,
/// odd length, or overflow.
pub fn decode_fixed<const N: usize>(input: &str, left_pad: bool) -> Option<[u8; N]> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if digits.is_empty() || digits.len() > N * 2 {
        return None;
    }
    if !left_pad && digits.len() != N * 2 {
        return None;
    }

    let mut out = [0u8; N];
    // Walk from the least-significant nibble so odd-length padded input works.
    let nibbles: Vec<u8> = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;
    for (i, nibble) in nibbles.iter().rev().enumerate() {
        let byte = N - 1 - i / 2;
        if i % 2 == 0 {
            out[byte] |= nibble;
        } else {
            out[byte] |= nibble << 4;
        }
    }
    Some(out)
}

/// Decode an arbitrary-length hex string (even length, optional `0x`).
pub fn decode_vec(input: &str) -> Option<Vec<u8>> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let s = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(s, 16).ok()
        })
        .collect()
}
