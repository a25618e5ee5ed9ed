pub mod chunk;
pub mod reader;
pub mod inspect;

use chunk::{Chunk, ChunkType};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File magic, ASCII `glTF`.
pub const MAGIC: [u8; 4] = *b"glTF";
/// Container version written in the header.
pub const VERSION: u32 = 2;
/// magic + version + total length.
pub const HEADER_LEN: usize = 12;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Container of {0} bytes does not fit the 32-bit length field")]
    ContainerTooLarge(usize),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A glTF-Binary file: the JSON chunk followed by the BIN chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    json: Chunk,
    bin: Chunk,
}

impl Container {
    pub fn new(json: Vec<u8>, bin: Vec<u8>) -> Self {
        Self {
            json: Chunk::new(ChunkType::Json, json),
            bin: Chunk::new(ChunkType::Bin, bin),
        }
    }

    /// Chunks in file order.
    pub fn chunks(&self) -> [&Chunk; 2] {
        [&self.json, &self.bin]
    }

    pub fn json(&self) -> &Chunk {
        &self.json
    }

    pub fn bin(&self) -> &Chunk {
        &self.bin
    }

    /// Total file length as stored in the header.
    pub fn total_len(&self) -> usize {
        total_len(self.chunks())
    }

    /// Encodes the complete file into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Err> {
        encode_chunks(self.chunks())
    }

    /// Writes the complete file to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), Err> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Creates or truncates `path` and writes the container into it. A
    /// container too large for the header leaves `path` untouched; a failure
    /// part way leaves the truncated file behind.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Err> {
        write_file(path.as_ref(), self.total_len(), || self.to_bytes())
    }
}

/// Encodes a header followed by `chunks` in the given order. Each chunk is
/// aligned against its absolute position in the file, so offsets are
/// accumulated chunk by chunk.
pub fn encode_chunks<'a, I>(chunks: I) -> Result<Vec<u8>, Err>
    where I: IntoIterator<Item = &'a Chunk>, I::IntoIter: Clone
{
    let chunks = chunks.into_iter();
    let total = total_len(chunks.clone());
    let total_u32 = length_field(total)?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&total_u32.to_le_bytes());

    for chunk in chunks {
        let start = out.len();
        chunk.encode_into(start, &mut out);
        tracing::debug!(
            "{:?} chunk at offset {}: {} payload bytes, {} padding bytes",
            chunk.chunk_type(),
            start,
            chunk.data().len(),
            chunk.padded_len(start) - chunk.data().len(),
        );
    }

    debug_assert_eq!(out.len(), total);
    Ok(out)
}

/// Encodes the chunks and writes them to `path`, creating or truncating it.
pub fn write_glb<'a, P, I>(path: P, chunks: I) -> Result<(), Err>
    where P: AsRef<Path>, I: IntoIterator<Item = &'a Chunk>, I::IntoIter: Clone
{
    let chunks = chunks.into_iter();
    write_file(path.as_ref(), total_len(chunks.clone()), || encode_chunks(chunks))
}

/// Value of the header's length field for a file of `total` bytes.
fn length_field(total: usize) -> Result<u32, Err> {
    u32::try_from(total).map_err(|_| Err::ContainerTooLarge(total))
}

/// Checks `total` against the length field before `path` is created, then
/// writes what `encode` produces.
fn write_file<F>(path: &Path, total: usize, encode: F) -> Result<(), Err>
    where F: FnOnce() -> Result<Vec<u8>, Err>
{
    length_field(total)?;
    let bytes = encode()?;
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&bytes)?;
    file.flush()?;
    tracing::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
    Ok(())
}

fn total_len<'a, I>(chunks: I) -> usize
    where I: IntoIterator<Item = &'a Chunk>
{
    chunks.into_iter().fold(HEADER_LEN, |offset, chunk| offset + chunk.encoded_len(offset))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleven_byte_json_twelve_byte_bin() {
        let container = Container::new(vec![b'x'; 11], vec![7; 12]);
        let bytes = container.to_bytes().unwrap();

        assert_eq!(bytes.len(), 52);
        assert_eq!(container.total_len(), 52);
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &52u32.to_le_bytes());

        // JSON chunk padded from 11 to 12 bytes
        assert_eq!(&bytes[12..16], &12u32.to_le_bytes());
        assert_eq!(&bytes[16..20], b"JSON");
        assert_eq!(bytes[31], b' ');

        // BIN chunk needs no padding
        assert_eq!(&bytes[32..36], &12u32.to_le_bytes());
        assert_eq!(&bytes[36..40], b"BIN\0");
        assert_eq!(&bytes[40..52], &[7; 12]);
    }

    #[test]
    fn bin_chunk_offset_follows_json_length() {
        for json_len in 0..8 {
            let container = Container::new(vec![b'x'; json_len], vec![1; 5]);
            let bytes = container.to_bytes().unwrap();
            assert_eq!(bytes.len() % 4, 0);
            assert_eq!(bytes.len(), container.total_len());

            let json_chunk_len = u32::from_le_bytes(bytes[12..16].try_into().unwrap()) as usize;
            assert_eq!(json_chunk_len % 4, 0);
            let bin_start = 20 + json_chunk_len;
            assert_eq!(&bytes[bin_start + 4..bin_start + 8], b"BIN\0");
            assert_eq!(u32::from_le_bytes(bytes[bin_start..bin_start + 4].try_into().unwrap()), 8);
        }
    }

    #[test]
    fn empty_payloads() {
        let bytes = Container::new(Vec::new(), Vec::new()).to_bytes().unwrap();
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[8..12], &28u32.to_le_bytes());
    }

    #[test]
    fn chunk_list_in_any_order_stays_aligned() {
        let bin = Chunk::bin(vec![1, 2, 3]);
        let json = Chunk::json(b"{}".to_vec());
        let bytes = encode_chunks([&bin, &json]).unwrap();
        // bin: 8 + 4, json: 8 + 4
        assert_eq!(bytes.len(), 12 + 12 + 12);
        assert_eq!(&bytes[28..32], b"JSON");
    }

    #[test]
    fn writes_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.glb");
        let container = Container::new(b"{\"asset\":{}}".to_vec(), vec![3; 10]);

        container.write_to_file(&path).unwrap();
        let first = std::fs::read(&path).unwrap();
        container.write_to_file(&path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, container.to_bytes().unwrap());
    }

    #[test]
    fn write_glb_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.glb");
        std::fs::write(&path, vec![0xaa; 1000]).unwrap();

        let json = Chunk::json(b"{}".to_vec());
        let bin = Chunk::bin(Vec::new());
        write_glb(&path, [&json, &bin]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap().len(), 12 + 12 + 8);
    }

    #[test]
    fn length_field_limit() {
        assert_eq!(length_field(52).unwrap(), 52);
        assert_eq!(length_field(u32::MAX as usize).unwrap(), u32::MAX);
        assert!(matches!(
            length_field(u32::MAX as usize + 1),
            Err(Err::ContainerTooLarge(n)) if n == u32::MAX as usize + 1
        ));
    }

    #[test]
    fn oversized_container_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.glb");
        let result = write_file(&path, u32::MAX as usize + 1, || {
            panic!("an oversized container must not be encoded")
        });
        assert!(matches!(result, Err(Err::ContainerTooLarge(_))));
        assert!(!path.exists());
    }

    #[test]
    fn write_to_matches_to_bytes() {
        let container = Container::new(b"{\"asset\":{}}".to_vec(), vec![9; 5]);
        let mut out = Vec::new();
        container.write_to(&mut out).unwrap();
        assert_eq!(out, container.to_bytes().unwrap());
        assert_eq!(out.len(), container.total_len());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_writer_is_an_io_error() {
        let result = Container::new(b"{}".to_vec(), Vec::new()).write_to(&mut BrokenPipe);
        assert!(matches!(result, Err(Err::IoError(e)) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scene.glb");
        let result = Container::new(Vec::new(), Vec::new()).write_to_file(&path);
        assert!(matches!(result, Err(Err::IoError(_))));
    }
}
