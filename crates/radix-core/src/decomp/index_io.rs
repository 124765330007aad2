use std::fs;
use std::path::Path;

use super::{ComponentIndex, IndexIoError};

pub(super) const MAGIC: &[u8; 4] = b"RDXI";
pub(super) const VERSION: u8 = 1;
/// magic(4) + version(1) + reserved(3) + depth(4) + crc32(4) + body_len(4)
pub(super) const HEADER_SIZE: usize = 20;
/// Depth slot value for indexes without a depth.
const NO_DEPTH: u32 = u32::MAX;

fn read_u32(data: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&data[at..at + 4]);
    u32::from_le_bytes(word)
}

impl ComponentIndex {
    pub fn to_bytes(&self) -> Result<Vec<u8>, IndexIoError> {
        let mut buckets: Vec<(char, &Vec<char>)> =
            self.buckets.iter().map(|(&c, chars)| (c, chars)).collect();
        buckets.sort_unstable_by_key(|&(c, _)| c);

        let body = bincode::serialize(&buckets).map_err(IndexIoError::Serialize)?;
        let body_len: u32 = body
            .len()
            .try_into()
            .map_err(|_| IndexIoError::BodyTooLarge(body.len()))?;
        let depth = self.max_depth.unwrap_or(NO_DEPTH);

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&depth.to_le_bytes());
        buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        buf.extend_from_slice(&body_len.to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, IndexIoError> {
        if data.len() < 5 {
            return Err(IndexIoError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(IndexIoError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(IndexIoError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(IndexIoError::InvalidHeader);
        }

        let depth = read_u32(data, 8);
        let checksum = read_u32(data, 12);
        let body_len = read_u32(data, 16) as usize;
        let end = HEADER_SIZE
            .checked_add(body_len)
            .ok_or(IndexIoError::InvalidHeader)?;
        let body = data.get(HEADER_SIZE..end).ok_or(IndexIoError::InvalidHeader)?;
        if data.len() > end {
            return Err(IndexIoError::TrailingData(data.len() - end));
        }
        if crc32fast::hash(body) != checksum {
            return Err(IndexIoError::ChecksumMismatch);
        }

        let buckets: Vec<(char, Vec<char>)> =
            bincode::deserialize(body).map_err(IndexIoError::Deserialize)?;
        let max_depth = (depth != NO_DEPTH).then_some(depth);
        Ok(Self::from_buckets(buckets, max_depth))
    }

    pub fn save(&self, path: &Path) -> Result<(), IndexIoError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }

    pub fn load(path: &Path) -> Result<Self, IndexIoError> {
        Self::from_bytes(&fs::read(path)?)
    }
}
