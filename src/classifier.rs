use std::io::{self, Read, Seek, SeekFrom};
use tracing::debug;

/// Number of leading bytes sampled when deciding whether a file is binary
pub const PREFIX_SIZE_TO_CHECK: usize = 2048;

/// Share of NUL / non-ASCII bytes (in percent) at which a prefix counts as binary
pub const MAX_NON_ASCII_PERCENT: usize = 3;

/// Classify a byte prefix as binary.
///
/// Counts bytes that are `0x00` or above `0x7F`; the prefix is binary when they make up
/// at least [`MAX_NON_ASCII_PERCENT`] percent of it. An empty prefix is never binary.
/// Only the first [`PREFIX_SIZE_TO_CHECK`] bytes of `prefix` are considered.
pub fn is_binary_prefix(prefix: &[u8]) -> bool {
    let window = &prefix[..prefix.len().min(PREFIX_SIZE_TO_CHECK)];
    if window.is_empty() {
        return false;
    }

    let non_ascii = window.iter().filter(|&&b| b == 0 || b > 0x7f).count();
    // Integer form of `100 * non_ascii / len >= 3.0`, exact at the boundary
    non_ascii * 100 >= window.len() * MAX_NON_ASCII_PERCENT
}

/// Sample the start of `source` and report whether it looks binary.
///
/// The cursor is moved to the start before sampling and rewound to the start afterwards,
/// so the same handle can be handed straight to the normalizer.
pub fn seems_binary<R: Read + Seek>(source: &mut R) -> io::Result<bool> {
    source.seek(SeekFrom::Start(0))?;

    let mut prefix = Vec::with_capacity(PREFIX_SIZE_TO_CHECK);
    source
        .by_ref()
        .take(PREFIX_SIZE_TO_CHECK as u64)
        .read_to_end(&mut prefix)?;

    source.seek(SeekFrom::Start(0))?;

    let binary = is_binary_prefix(&prefix);
    debug!(bytes_sampled = prefix.len(), binary, "Classified file prefix");
    Ok(binary)
}
