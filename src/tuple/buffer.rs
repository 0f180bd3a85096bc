//! # Tuple - Fixed-Capacity Field Buffer
//!
//! `Tuple` owns a single byte buffer that holds its offset table followed by
//! the encoded fields. Fields are appended strictly in index order; the first
//! `num_offsets` of them get their byte position cached so they can be located
//! in O(1).
//!
//! ## Usage
//!
//! ```rust
//! use msgtuple::Tuple;
//!
//! let mut tuple = Tuple::new();
//! tuple.reset(3)?;
//! tuple.append_uint(5)?;
//! tuple.append_string(b"foo")?;
//! tuple.append_uint(9)?;
//!
//! assert_eq!(tuple.field_count(), 3);
//! assert_eq!(tuple.field(1)?.as_bytes(), Some(&b"foo"[..]));
//! # Ok::<(), eyre::Report>(())
//! ```
//!
//! ## Reuse
//!
//! `reset` rewinds the tuple without touching the allocation, so one `Tuple`
//! can be refilled many times.

use eyre::{ensure, Result};

use crate::config::{
    offset_table_size, DEFAULT_MAX_OFFSETS, DEFAULT_TUPLE_DATA_SIZE, OFFSET_ENTRY_SIZE,
};
use crate::encoding::msgpack::{encode_string, encode_uint, string_len, uint_len};
use crate::encoding::MsgReader;
use crate::types::FieldValue;

use super::iter::FieldIter;

#[derive(Clone)]
pub struct Tuple {
    field_count: u32,
    data_used: u32,
    num_offsets: u32,
    first_field_offset: u32,
    max_offsets: u32,
    data: Box<[u8]>,
}

impl Tuple {
    /// Default-sized tuple caching the offset of field 0 only.
    pub fn new() -> Self {
        tracing::trace!(
            capacity = DEFAULT_TUPLE_DATA_SIZE,
            max_offsets = DEFAULT_MAX_OFFSETS,
            "allocating default tuple"
        );
        Self {
            field_count: 0,
            data_used: 0,
            num_offsets: 1,
            first_field_offset: 0,
            max_offsets: DEFAULT_MAX_OFFSETS as u32,
            data: vec![0u8; DEFAULT_TUPLE_DATA_SIZE].into_boxed_slice(),
        }
    }

    pub fn with_capacity(data_capacity: usize, max_offsets: usize) -> Result<Self> {
        ensure!(max_offsets >= 1, "tuple must cache at least one offset");
        ensure!(
            data_capacity <= u32::MAX as usize,
            "tuple capacity {} exceeds u32 offsets",
            data_capacity
        );
        ensure!(
            offset_table_size(max_offsets) <= data_capacity,
            "offset table for {} offsets ({} bytes) does not fit in {} bytes",
            max_offsets,
            offset_table_size(max_offsets),
            data_capacity
        );

        tracing::debug!(data_capacity, max_offsets, "allocating tuple");

        Ok(Self {
            field_count: 0,
            data_used: 0,
            num_offsets: 1,
            first_field_offset: 0,
            max_offsets: max_offsets as u32,
            data: vec![0u8; data_capacity].into_boxed_slice(),
        })
    }

    /// Builds a tuple from `values` in one go.
    pub fn from_values(num_offsets: usize, values: &[FieldValue<'_>]) -> Result<Self> {
        let payload: usize = values
            .iter()
            .map(|v| match v {
                FieldValue::Uint(n) => uint_len(*n),
                FieldValue::Str(s) => string_len(s.len()),
            })
            .sum();
        let max_offsets = num_offsets.max(1);
        let mut tuple = Self::with_capacity(offset_table_size(max_offsets) + payload, max_offsets)?;
        tuple.reset(num_offsets)?;
        for value in values {
            tuple.append(*value)?;
        }
        Ok(tuple)
    }

    pub fn reset(&mut self, num_offsets: usize) -> Result<()> {
        ensure!(num_offsets >= 1, "num_offsets must be at least 1");
        ensure!(
            num_offsets <= self.max_offsets as usize,
            "num_offsets {} exceeds tuple limit {}",
            num_offsets,
            self.max_offsets
        );

        self.field_count = 0;
        self.num_offsets = num_offsets as u32;
        self.first_field_offset = 0;
        self.data_used = offset_table_size(num_offsets) as u32;
        Ok(())
    }

    pub fn append(&mut self, value: FieldValue<'_>) -> Result<()> {
        match value {
            FieldValue::Uint(v) => self.append_uint(v),
            FieldValue::Str(s) => self.append_string(s),
        }
    }

    pub fn append_uint(&mut self, value: u64) -> Result<()> {
        let start = self.reserve(uint_len(value))?;
        let written = encode_uint(value, &mut self.data[start..]);
        self.commit_field(start, written);
        Ok(())
    }

    pub fn append_string(&mut self, bytes: &[u8]) -> Result<()> {
        ensure!(
            bytes.len() <= u32::MAX as usize,
            "string of {} bytes exceeds str32 limit",
            bytes.len()
        );
        let start = self.reserve(string_len(bytes.len()))?;
        let written = encode_string(bytes, &mut self.data[start..]);
        self.commit_field(start, written);
        Ok(())
    }

    fn reserve(&self, len: usize) -> Result<usize> {
        let start = self.data_used as usize;
        ensure!(
            len <= self.data.len() - start,
            "field {} needs {} bytes but only {} of {} remain",
            self.field_count,
            len,
            self.data.len() - start,
            self.data.len()
        );
        Ok(start)
    }

    fn commit_field(&mut self, start: usize, written: usize) {
        let idx = self.field_count;
        if idx == 0 {
            self.first_field_offset = start as u32;
        } else if idx < self.num_offsets {
            self.write_offset(idx as usize, start as u32);
        }
        self.data_used = (start + written) as u32;
        self.field_count += 1;
    }

    fn offset_slot(idx: usize) -> usize {
        (idx - 1) * OFFSET_ENTRY_SIZE
    }

    fn write_offset(&mut self, idx: usize, offset: u32) {
        let slot = Self::offset_slot(idx);
        self.data[slot..slot + OFFSET_ENTRY_SIZE].copy_from_slice(&offset.to_le_bytes());
    }

    fn read_offset(&self, idx: usize) -> usize {
        let slot = Self::offset_slot(idx);
        u32::from_le_bytes([
            self.data[slot],
            self.data[slot + 1],
            self.data[slot + 2],
            self.data[slot + 3],
        ]) as usize
    }

    /// Byte position of a cached field inside the buffer.
    #[inline]
    pub fn field_offset(&self, idx: usize) -> Result<usize> {
        ensure!(
            idx < self.num_offsets as usize,
            "field {} is beyond the cached offset range (num_offsets = {})",
            idx,
            self.num_offsets
        );
        ensure!(
            idx < self.field_count as usize,
            "field {} has not been appended (field_count = {})",
            idx,
            self.field_count
        );

        if idx == 0 {
            Ok(self.first_field_offset as usize)
        } else {
            Ok(self.read_offset(idx))
        }
    }

    /// Encoded bytes from the start of field `idx` to the end of the tuple.
    #[inline]
    pub fn field_at(&self, idx: usize) -> Result<&[u8]> {
        let start = self.field_offset(idx)?;
        Ok(&self.data[start..self.data_used as usize])
    }

    #[inline]
    pub fn reader_at(&self, idx: usize) -> Result<MsgReader<'_>> {
        Ok(MsgReader::new(self.field_at(idx)?))
    }

    pub fn field(&self, idx: usize) -> Result<FieldValue<'_>> {
        self.reader_at(idx)?.read_value()
    }

    pub fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(self.payload(), self.field_count as usize)
    }

    /// Encoded fields without the offset table.
    pub fn payload(&self) -> &[u8] {
        let start = if self.field_count == 0 {
            offset_table_size(self.num_offsets as usize)
        } else {
            self.first_field_offset as usize
        };
        &self.data[start..self.data_used as usize]
    }

    pub fn field_count(&self) -> usize {
        self.field_count as usize
    }

    pub fn data_used(&self) -> usize {
        self.data_used as usize
    }

    pub fn num_offsets(&self) -> usize {
        self.num_offsets as usize
    }

    pub fn first_field_offset(&self) -> usize {
        self.first_field_offset as usize
    }

    pub fn max_offsets(&self) -> usize {
        self.max_offsets as usize
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Field 0 bytes with no bounds checks beyond slicing. Used by the
    /// single-uint comparator, which only needs the first field to exist.
    #[inline]
    pub(crate) fn first_field(&self) -> &[u8] {
        let end = if self.field_count == 0 {
            self.first_field_offset as usize
        } else {
            self.data_used as usize
        };
        &self.data[self.first_field_offset as usize..end]
    }
}

impl Default for Tuple {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for field in self.fields() {
            match field {
                Ok(v) => list.entry(&format_args!("{}", v)),
                Err(e) => list.entry(&format_args!("<{}>", e)),
            };
        }
        list.finish()
    }
}
