use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Total capacity of an [`InputBuffer`], terminator slot included.
///
/// The last slot is reserved for the appended NUL byte, so the largest
/// payload a buffer can hold is `MAX_INPUT_SIZE - 1` bytes. Anything the
/// engine hands us beyond that is truncated, not rejected.
pub const MAX_INPUT_SIZE: usize = 1 << 20;

/// One engine-supplied input, read once from disk and never mutated after
/// the terminator is appended.
///
/// Downstream the bytes are treated two ways at once: as a NUL-terminated
/// string when passed as the target's argument, and as a raw byte stream
/// when written to its stdin. The buffer keeps both views, `payload()` and
/// `as_bytes_with_nul()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    data: Vec<u8>,
}

impl InputBuffer {
    /// Reads up to `MAX_INPUT_SIZE - 1` bytes from `path` and appends the
    /// terminator.
    ///
    /// An unopenable file yields an empty buffer rather than an error; the
    /// caller decides whether zero bytes is fatal. A file larger than the
    /// payload cap is truncated with a warning and used as-is.
    pub fn load(path: &Path) -> Self {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                log::debug!("could not open input file {path:?}: {e}");
                return Self::empty();
            }
        };

        let cap = MAX_INPUT_SIZE - 1;
        let mut data = Vec::with_capacity(MAX_INPUT_SIZE);
        data.resize(cap, 0);
        let mut bytes_read = 0;
        while bytes_read < cap {
            match file.read(&mut data[bytes_read..cap]) {
                Ok(0) => break,
                Ok(n) => bytes_read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                // Mid-stream read errors keep what was already read.
                Err(e) => {
                    log::debug!("read error on input file {path:?} after {bytes_read} bytes: {e}");
                    break;
                }
            }
        }

        if bytes_read == cap {
            let mut probe = [0u8; 1];
            if matches!(file.read(&mut probe), Ok(n) if n > 0) {
                log::warn!("input file {path:?} exceeds {cap} bytes, truncating");
            }
        }

        data.truncate(bytes_read);
        data.push(0);
        Self { data }
    }

    /// Builds a buffer directly from bytes, clamped to the payload cap.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let cap = MAX_INPUT_SIZE - 1;
        let take = bytes.len().min(cap);
        let mut data = Vec::with_capacity(take + 1);
        data.extend_from_slice(&bytes[..take]);
        data.push(0);
        Self { data }
    }

    fn empty() -> Self {
        Self { data: vec![0] }
    }

    /// The payload bytes, terminator excluded.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.data.len() - 1]
    }

    /// The payload with its trailing NUL terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_input(bytes: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("create temp input");
        f.write_all(bytes).expect("write temp input");
        f.flush().expect("flush temp input");
        f
    }

    #[test]
    fn load_preserves_bytes_and_appends_terminator() {
        let payload = b"../../etc/passwd";
        let file = write_input(payload);

        let input = InputBuffer::load(file.path());
        assert_eq!(input.payload(), payload);
        assert_eq!(input.len(), payload.len());
        assert_eq!(input.as_bytes_with_nul().last(), Some(&0u8));
        assert_eq!(input.as_bytes_with_nul().len(), payload.len() + 1);
    }

    #[test]
    fn load_preserves_non_utf8_and_interior_nul_bytes() {
        let payload: Vec<u8> = vec![0xFF, 0x00, 0xFE, b'A', 0x00, 0x80];
        let file = write_input(&payload);

        let input = InputBuffer::load(file.path());
        assert_eq!(input.payload(), payload.as_slice());
    }

    #[test]
    fn load_truncates_oversized_input_to_payload_cap() {
        let oversized = vec![b'x'; MAX_INPUT_SIZE + 17];
        let file = write_input(&oversized);

        let input = InputBuffer::load(file.path());
        assert_eq!(input.len(), MAX_INPUT_SIZE - 1);
        assert_eq!(input.as_bytes_with_nul().len(), MAX_INPUT_SIZE);
        assert!(input.payload().iter().all(|&b| b == b'x'));
    }

    #[test]
    fn load_at_exact_payload_cap_keeps_every_byte() {
        let exact = vec![b'y'; MAX_INPUT_SIZE - 1];
        let file = write_input(&exact);

        let input = InputBuffer::load(file.path());
        assert_eq!(input.len(), MAX_INPUT_SIZE - 1);
    }

    #[test]
    fn load_missing_file_yields_empty_buffer() {
        let input = InputBuffer::load(Path::new("/nonexistent/definitely_not_here_49152"));
        assert!(input.is_empty());
        assert_eq!(input.as_bytes_with_nul(), &[0u8]);
    }

    #[test]
    fn load_empty_file_yields_empty_buffer() {
        let file = write_input(b"");
        let input = InputBuffer::load(file.path());
        assert!(input.is_empty());
    }

    #[test]
    fn from_bytes_clamps_to_cap() {
        let input = InputBuffer::from_bytes(&vec![1u8; MAX_INPUT_SIZE * 2]);
        assert_eq!(input.len(), MAX_INPUT_SIZE - 1);

        let small = InputBuffer::from_bytes(b"abc");
        assert_eq!(small.payload(), b"abc");
    }
}
