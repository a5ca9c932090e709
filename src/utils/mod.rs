mod byte_cursor;
pub mod bytes;

pub use self::byte_cursor::ByteCursor;
pub use self::bytes::{Endianness, FixedInt, c_string_bytes, read_c_string, read_int};
