//! # Headers
//!
//! graph6 and sparse6 files may start with an optional header (`>>graph6<<` or `>>sparse6<<`),
//! followed by the number of nodes `N`:
//! - `N + 63` as a single byte if `N <= 62`,
//! - otherwise the byte `126` followed by `N` as three big-endian 6-bit digits, each `+ 63`.
//!
//! Larger graphs use an eight byte form that is not supported here.

use super::*;

/// Largest number of nodes that fits into the four byte size encoding
pub const MAX_NODES: usize = 258_047;

/// Largest number of nodes that fits into a single byte
const MAX_SHORT_NODES: usize = 62;

/// Marks the multi-byte size encoding
const LONG_SIZE_MARKER: u8 = 126;

/// Removes the header of `format` from the front of `input` if there is one.
///
/// Input starting with `>` must carry the complete header.
pub fn strip_header(input: &[u8], format: FileFormat) -> Result<&[u8]> {
    if input.first() != Some(&b'>') {
        return Ok(input);
    }

    let header = format.header().as_bytes();
    raise_error_unless!(
        input.starts_with(header),
        format,
        "invalid file header"
    );
    Ok(&input[header.len()..])
}

/// Appends the size encoding of `n` to `out`
pub fn encode_size(n: usize, format: FileFormat, out: &mut Vec<u8>) -> Result<()> {
    raise_error_unless!(
        n <= MAX_NODES,
        format,
        format!("{n} nodes exceed the maximum of {MAX_NODES}")
    );

    if n <= MAX_SHORT_NODES {
        out.push(n as u8 + PRINTABLE_OFFSET);
    } else {
        out.push(LONG_SIZE_MARKER);
        out.extend(
            [12, 6, 0]
                .into_iter()
                .map(|shift| ((n >> shift) & 63) as u8 + PRINTABLE_OFFSET),
        );
    }
    Ok(())
}

/// Decodes the size at the front of `input` and returns it together with the remaining input
pub fn decode_size(input: &[u8], format: FileFormat) -> Result<(usize, &[u8])> {
    let Some(&first) = input.first() else {
        return Err(GraphError::format(format, "missing number of nodes"));
    };

    if first != LONG_SIZE_MARKER {
        raise_error_unless!(
            (PRINTABLE_OFFSET..LONG_SIZE_MARKER).contains(&first),
            format,
            format!("invalid size byte {first}")
        );
        return Ok(((first - PRINTABLE_OFFSET) as usize, &input[1..]));
    }

    raise_error_unless!(
        input.len() >= 4,
        format,
        "truncated number of nodes"
    );
    raise_error_unless!(
        input[1] != LONG_SIZE_MARKER,
        format,
        format!("graphs with more than {MAX_NODES} nodes are not supported")
    );

    let mut n = 0;
    for &digit in &input[1..4] {
        raise_error_unless!(
            (PRINTABLE_OFFSET..=LONG_SIZE_MARKER).contains(&digit),
            format,
            format!("invalid size byte {digit}")
        );
        n = (n << 6) | (digit - PRINTABLE_OFFSET) as usize;
    }
    Ok((n, &input[4..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(n: usize) -> Vec<u8> {
        let mut out = Vec::new();
        encode_size(n, FileFormat::Graph6, &mut out).unwrap();
        out
    }

    #[test]
    fn sizes() {
        assert_eq!(encoded(0), b"?");
        assert_eq!(encoded(62), b"}");
        assert_eq!(encoded(63), vec![126, 63, 63, 126]);
        assert_eq!(encoded(MAX_NODES), vec![126, 125, 126, 126]);

        for n in [0, 1, 62, 63, 460, 4096, MAX_NODES] {
            let mut bytes = encoded(n);
            bytes.push(b'x');
            assert_eq!(decode_size(&bytes, FileFormat::Graph6).unwrap(), (n, &b"x"[..]));
        }

        assert!(matches!(
            encode_size(MAX_NODES + 1, FileFormat::Sparse6, &mut Vec::new()),
            Err(GraphError::InvalidFormat { format: FileFormat::Sparse6, .. })
        ));
        assert!(decode_size(&[126, 126, 63, 63, 63, 63, 63, 63], FileFormat::Graph6).is_err());
        assert!(decode_size(&[126, 64], FileFormat::Graph6).is_err());
        assert!(decode_size(b"", FileFormat::Graph6).is_err());
    }

    #[test]
    fn headers() {
        assert_eq!(strip_header(b">>graph6<<Bw", FileFormat::Graph6).unwrap(), b"Bw");
        assert_eq!(strip_header(b"Bw", FileFormat::Graph6).unwrap(), b"Bw");
        assert!(strip_header(b">>sparse6<<:Bf", FileFormat::Graph6).is_err());
        assert_eq!(
            strip_header(b">>sparse6<<:Bf", FileFormat::Sparse6).unwrap(),
            b":Bf"
        );
    }
}
