use super::chunk::{ChunkType, CHUNK_HEADER_LEN};
use super::{HEADER_LEN, MAGIC};

#[remain::sorted]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Invalid magic: {0:?}")]
    InvalidMagic([u8; 4]),
    #[error("Declared length {declared} does not match the {actual} bytes read")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("Chunk {0} runs past the end of the file")]
    TruncatedChunk(usize),
    #[error("File is shorter than the 12-byte header")]
    TruncatedHeader,
}

/// A chunk as found in the file. `data` includes the padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub tag: [u8; 4],
    pub data: &'a [u8],
}

impl RawChunk<'_> {
    pub fn chunk_type(&self) -> Option<ChunkType> {
        ChunkType::from_tag(self.tag)
    }
}

/// Header fields and chunks of a decoded container, borrowing from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContainer<'a> {
    pub version: u32,
    pub length: u32,
    pub chunks: Vec<RawChunk<'a>>,
}

impl<'a> DecodedContainer<'a> {
    fn first_of(&self, ty: ChunkType) -> Option<&'a [u8]> {
        self.chunks.iter()
            .find(|c| c.chunk_type() == Some(ty))
            .map(|c| c.data)
    }

    /// JSON chunk text with its trailing space padding removed.
    pub fn json_payload(&self) -> Option<&'a [u8]> {
        self.first_of(ChunkType::Json).map(|data| {
            let end = data.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
            &data[..end]
        })
    }

    /// BIN chunk data, padding included. The unpadded length is the
    /// `byteLength` of buffer 0 in the JSON chunk.
    pub fn bin_payload(&self) -> Option<&'a [u8]> {
        self.first_of(ChunkType::Bin)
    }
}

/// Decodes the header and walks the chunk list of a glTF-Binary file.
/// Unknown chunk types are kept as raw chunks.
pub fn decode(bytes: &[u8]) -> Result<DecodedContainer<'_>, Err> {
    if bytes.len() < HEADER_LEN {
        return Err(Err::TruncatedHeader);
    }
    let magic = read_tag(bytes, 0);
    if magic != MAGIC {
        return Err(Err::InvalidMagic(magic));
    }
    let version = read_u32(bytes, 4);
    let length = read_u32(bytes, 8);
    if length as usize != bytes.len() {
        return Err(Err::LengthMismatch { declared: length as usize, actual: bytes.len() });
    }

    let mut chunks = Vec::new();
    let mut offset = HEADER_LEN;
    while offset < bytes.len() {
        let index = chunks.len();
        if bytes.len() - offset < CHUNK_HEADER_LEN {
            return Err(Err::TruncatedChunk(index));
        }
        let chunk_len = read_u32(bytes, offset) as usize;
        let tag = read_tag(bytes, offset + 4);
        let start = offset + CHUNK_HEADER_LEN;
        let end = start.checked_add(chunk_len)
            .filter(|&end| end <= bytes.len())
            .ok_or(Err::TruncatedChunk(index))?;

        chunks.push(RawChunk { tag, data: &bytes[start..end] });
        offset = end;
    }

    Ok(DecodedContainer { version, length, chunks })
}

fn read_tag(bytes: &[u8], offset: usize) -> [u8; 4] {
    [bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]]
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(read_tag(bytes, offset))
}
