mod file_reader;
mod memory_reader;
mod range_reader;
mod s3_reader;

pub(crate) use file_reader::open_error;
pub use file_reader::FileRangeReader;
pub use memory_reader::BytesRangeReader;
pub use range_reader::{
    read_i32_le_at, read_u16_be_at, read_u16_le_at, read_u24_le_at, read_u32_be_at,
    read_u32_le_at, read_u64_be_at, read_u64_le_at, read_u8_at, RangeReader,
};
pub use s3_reader::{create_s3_client, S3RangeReader};
