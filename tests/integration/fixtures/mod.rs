// Test inputs with known line endings and their expected conversions
// Naming: <CONTENT>_<TARGET> is the expected output for that terminator

/// One line ending of each kind
pub const MIXED: &[u8] = b"x\ry\nz\r\n";
pub const MIXED_UNIX: &[u8] = b"x\ny\nz\n";
pub const MIXED_MAC: &[u8] = b"x\ry\rz\r";
pub const MIXED_DOS: &[u8] = b"x\r\ny\r\nz\r\n";

/// Classic Mac text ending in a lone carriage return
pub const MAC_TRAILING_CR: &[u8] = b"first\rsecond\rthird\r";
pub const MAC_TRAILING_CR_UNIX: &[u8] = b"first\nsecond\nthird\n";

/// Windows text with no final terminator
pub const DOS_NO_FINAL_EOL: &[u8] = b"alpha\r\nbeta\r\ngamma";
pub const DOS_NO_FINAL_EOL_UNIX: &[u8] = b"alpha\nbeta\ngamma";

/// Text without any terminator
pub const NO_EOL: &[u8] = b"just one line, no terminator";

/// 2048-byte prefix with `count` NUL bytes sprinkled through ASCII text
pub fn prefix_with_nuls(count: usize) -> Vec<u8> {
    let mut data: Vec<u8> = b"some text\r\n".iter().copied().cycle().take(2048).collect();
    let stride = 2048 / count.max(1);
    for i in 0..count {
        data[i * stride] = 0;
    }
    data
}
