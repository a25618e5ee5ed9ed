/// Size of the `length || type` prefix of every chunk.
pub const CHUNK_HEADER_LEN: usize = 8;

/// The two chunk kinds of a glTF-Binary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    Json,
    Bin,
}

impl ChunkType {
    /// Four-byte type tag as it appears in the file.
    pub const fn tag(self) -> [u8; 4] {
        match self {
            ChunkType::Json => *b"JSON",
            ChunkType::Bin => *b"BIN\0",
        }
    }

    /// Filler appended to align the payload: spaces keep the JSON text
    /// valid, the binary chunk is padded with zeros.
    pub const fn padding_byte(self) -> u8 {
        match self {
            ChunkType::Json => b' ',
            ChunkType::Bin => 0,
        }
    }

    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        match &tag {
            b"JSON" => Some(ChunkType::Json),
            b"BIN\0" => Some(ChunkType::Bin),
            _ => None,
        }
    }
}

/// A typed payload waiting to be written into a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: ChunkType,
    data: Vec<u8>,
}

impl Chunk {
    pub fn new(chunk_type: ChunkType, data: Vec<u8>) -> Self {
        Self { chunk_type, data }
    }

    pub fn json(data: Vec<u8>) -> Self {
        Self::new(ChunkType::Json, data)
    }

    pub fn bin(data: Vec<u8>) -> Self {
        Self::new(ChunkType::Bin, data)
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes in the chunk when it starts at file offset `chunk_start`,
    /// including its 8-byte prefix and its padding.
    pub fn encoded_len(&self, chunk_start: usize) -> usize {
        CHUNK_HEADER_LEN + self.padded_len(chunk_start)
    }

    /// Value of the chunk's length field: payload plus padding.
    pub fn padded_len(&self, chunk_start: usize) -> usize {
        self.data.len() + padding_len(chunk_start + CHUNK_HEADER_LEN, self.data.len())
    }

    /// Appends `length || type || payload || padding` to `out`. The chunk is
    /// assumed to start at absolute file offset `chunk_start`, and the caller
    /// has checked that the padded length fits the 32-bit length field.
    pub(crate) fn encode_into(&self, chunk_start: usize, out: &mut Vec<u8>) {
        let padding = padding_len(chunk_start + CHUNK_HEADER_LEN, self.data.len());
        let length = (self.data.len() + padding) as u32;

        out.extend_from_slice(&length.to_le_bytes());
        out.extend_from_slice(&self.chunk_type.tag());
        out.extend_from_slice(&self.data);
        out.extend(std::iter::repeat_n(self.chunk_type.padding_byte(), padding));
    }
}

/// Number of filler bytes needed so that a payload of `payload_len` bytes
/// starting at absolute offset `offset` ends on a 4-byte boundary.
pub fn padding_len(offset: usize, payload_len: usize) -> usize {
    (4 - (offset + payload_len) % 4) % 4
}
