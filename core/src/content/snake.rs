use std::ops::Deref;

use tonlib_core::cell::{Cell, CellBuilder, TonCellError};

/// Whole bytes a continuation cell of a snake string can hold (1016 of 1023 bits).
pub const SNAKE_CELL_MAX_BYTES: usize = 127;

/// Stores `data` as a snake string: the bytes fill the builder's free space,
/// the rest continues in a chain of single-reference cells.
pub fn store_snake_bytes<'a>(
    builder: &'a mut CellBuilder,
    data: &[u8],
) -> Result<&'a mut CellBuilder, TonCellError> {
    let head_len = data.len().min(builder.remaining_bits() / 8);
    let (head, tail) = data.split_at(head_len);
    builder.store_slice(head)?;
    if !tail.is_empty() {
        builder.store_child(build_snake_tail(tail)?)?;
    }
    Ok(builder)
}

/// Builds a standalone snake string cell, optionally starting with an 8-bit prefix.
pub fn snake_string_cell(prefix: Option<u8>, value: &str) -> Result<Cell, TonCellError> {
    let mut builder = CellBuilder::new();
    if let Some(prefix) = prefix {
        builder.store_u8(8, prefix)?;
    }
    store_snake_bytes(&mut builder, value.as_bytes())?;
    builder.build()
}

/// Collects the bytes of a snake string, skipping `skip_bits` of the first cell.
pub fn load_snake_bytes(cell: &Cell, skip_bits: usize) -> Result<Vec<u8>, TonCellError> {
    let mut buffer = Vec::new();
    let mut current = cell;
    let mut skip = skip_bits;
    loop {
        let mut parser = current.parser();
        parser.skip_bits(skip)?;
        let remaining_bits = parser.remaining_bits();
        if remaining_bits % 8 != 0 {
            return Err(TonCellError::cell_parser_error(format!(
                "Invalid snake format string: {} bits do not form whole bytes",
                remaining_bits
            )));
        }
        let remaining_bytes = remaining_bits / 8;
        let mut data = parser.load_bytes(remaining_bytes)?;
        buffer.append(&mut data);
        match current.references().len() {
            0 => return Ok(buffer),
            1 => {
                current = current.reference(0)?.deref();
                skip = 0;
            }
            n => {
                return Err(TonCellError::cell_parser_error(format!(
                    "Invalid snake format string: found cell with {} references",
                    n
                )))
            }
        }
    }
}

fn build_snake_tail(data: &[u8]) -> Result<Cell, TonCellError> {
    let mut next: Option<Cell> = None;
    for chunk in data.chunks(SNAKE_CELL_MAX_BYTES).rev() {
        let mut builder = CellBuilder::new();
        builder.store_slice(chunk)?;
        if let Some(cell) = next.take() {
            builder.store_child(cell)?;
        }
        next = Some(builder.build()?);
    }
    next.ok_or_else(|| TonCellError::cell_builder_error("snake tail must not be empty"))
}

#[cfg(test)]
mod tests {
    use tonlib_core::cell::{CellBuilder, TonCellError};

    use super::*;

    #[test]
    fn test_short_string_stays_in_one_cell() -> Result<(), TonCellError> {
        let cell = snake_string_cell(None, "MJT")?;
        assert_eq!(cell.bit_len(), 24);
        assert!(cell.references().is_empty());
        assert_eq!(load_snake_bytes(&cell, 0)?, b"MJT".to_vec());
        Ok(())
    }

    #[test]
    fn test_prefix_takes_first_byte() -> Result<(), TonCellError> {
        let cell = snake_string_cell(Some(0x00), "hello")?;
        assert_eq!(cell.bit_len(), 48);
        assert_eq!(cell.data()[0], 0x00);
        assert_eq!(load_snake_bytes(&cell, 8)?, b"hello".to_vec());
        Ok(())
    }

    #[test]
    fn test_long_string_is_chained() -> Result<(), TonCellError> {
        let text = "x".repeat(400);
        let mut builder = CellBuilder::new();
        builder.store_u8(8, 0x01)?;
        store_snake_bytes(&mut builder, text.as_bytes())?;
        let cell = builder.build()?;

        // 126 bytes after the tag, then 127 + 127 + 20
        assert_eq!(cell.bit_len(), 8 + 126 * 8);
        let second = cell.reference(0)?;
        assert_eq!(second.bit_len(), 127 * 8);
        let third = second.reference(0)?;
        assert_eq!(third.bit_len(), 127 * 8);
        let fourth = third.reference(0)?;
        assert_eq!(fourth.bit_len(), 20 * 8);
        assert!(fourth.references().is_empty());

        assert_eq!(load_snake_bytes(&cell, 8)?, text.into_bytes());
        Ok(())
    }

    #[test]
    fn test_utf8_bytes_survive_chunking() -> Result<(), TonCellError> {
        let text = "Токен ".repeat(40);
        let cell = snake_string_cell(None, &text)?;
        let bytes = load_snake_bytes(&cell, 0)?;
        assert_eq!(String::from_utf8(bytes).unwrap(), text);
        Ok(())
    }

    #[test]
    fn test_partial_byte_is_rejected() -> Result<(), TonCellError> {
        let mut builder = CellBuilder::new();
        builder.store_slice(b"MJ")?;
        builder.store_u8(4, 0x0f)?;
        let cell = builder.build()?;
        assert!(load_snake_bytes(&cell, 0).is_err());

        // a broken continuation cell is caught as well
        let mut head = CellBuilder::new();
        head.store_slice(b"MJT")?;
        head.store_child(cell)?;
        assert!(load_snake_bytes(&head.build()?, 0).is_err());
        Ok(())
    }

    #[test]
    fn test_empty_string() -> Result<(), TonCellError> {
        let cell = snake_string_cell(None, "")?;
        assert_eq!(cell.bit_len(), 0);
        assert!(load_snake_bytes(&cell, 0)?.is_empty());
        Ok(())
    }
}
