//! Sequential iteration over every field of a tuple, including fields past
//! the cached offset range.

use eyre::Result;

use crate::encoding::MsgReader;
use crate::types::FieldValue;

pub struct FieldIter<'a> {
    reader: MsgReader<'a>,
    remaining: usize,
}

impl<'a> FieldIter<'a> {
    pub(crate) fn new(payload: &'a [u8], field_count: usize) -> Self {
        Self {
            reader: MsgReader::new(payload),
            remaining: field_count,
        }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = Result<FieldValue<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.reader.read_value();
        // A decode failure leaves the cursor stuck; stop after reporting it.
        self.remaining = if item.is_ok() { self.remaining - 1 } else { 0 };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
