// SPDX-License-Identifier: Apache-2.0

use crate::{CursorExt, DecodeError, TokenCursor};

/// Decode a JSON array, appending each element to `out` in document order.
///
/// `decode_element` is called with the cursor on each element. A failing
/// element is reported at the index it would have had in `out`, and nothing of
/// it is appended.
pub fn decode_array<C, T, F>(
    cursor: &mut C,
    out: &mut Vec<T>,
    mut decode_element: F,
) -> Result<(), DecodeError>
where
    C: TokenCursor + ?Sized,
    F: FnMut(&mut C) -> Result<T, DecodeError>,
{
    cursor.for_each_element(|cursor, _| {
        let element = decode_element(cursor).map_err(|e| e.at_index(out.len()))?;
        out.push(element);
        Ok(())
    })
}
