//! Bounds Checking for Safe Field Reads
//!
//! Every byte the codec reads goes through these helpers. Reads copy the
//! bytes out, so the input buffer needs no particular alignment.

use crate::error::{DecodeError, DecodeResult};
use gpumon_types::NumericKind;
use zerocopy::{AsBytes, FromBytes};

/// Check if a buffer has enough bytes for a read operation
pub fn check_buffer_bounds(buffer: &[u8], offset: usize, size: usize) -> DecodeResult<()> {
    match offset.checked_add(size) {
        Some(end) if end <= buffer.len() => Ok(()),
        Some(end) => Err(DecodeError::buffer_too_small(end, buffer.len())),
        None => Err(DecodeError::buffer_too_small(usize::MAX, buffer.len())),
    }
}

/// Safely extract a slice from a buffer with bounds checking
pub fn safe_slice(buffer: &[u8], offset: usize, size: usize) -> DecodeResult<&[u8]> {
    check_buffer_bounds(buffer, offset, size)?;
    Ok(&buffer[offset..offset + size])
}

/// Safely extract a mutable slice from a buffer with bounds checking
pub fn safe_slice_mut(buffer: &mut [u8], offset: usize, size: usize) -> DecodeResult<&mut [u8]> {
    check_buffer_bounds(buffer, offset, size)?;
    Ok(&mut buffer[offset..offset + size])
}

/// Read one native-endian unsigned integer of `kind` at `offset`
pub fn read_scalar(buffer: &[u8], offset: usize, kind: NumericKind) -> DecodeResult<u64> {
    let bytes = safe_slice(buffer, offset, kind.width())?;
    let value = match kind {
        NumericKind::U8 => u8::read_from(bytes).map(u64::from),
        NumericKind::U16 => u16::read_from(bytes).map(u64::from),
        NumericKind::U32 => u32::read_from(bytes).map(u64::from),
        NumericKind::U64 => u64::read_from(bytes),
    };
    // read_from only fails on a length mismatch, which safe_slice rules out
    value.ok_or_else(|| DecodeError::buffer_too_small(offset + kind.width(), buffer.len()))
}

/// Write one native-endian unsigned integer of `kind` at `offset`
///
/// `value` is truncated to the kind's width; callers check the range first.
pub fn write_scalar(buffer: &mut [u8], offset: usize, kind: NumericKind, value: u64) -> DecodeResult<()> {
    let dst = safe_slice_mut(buffer, offset, kind.width())?;
    match kind {
        NumericKind::U8 => dst.copy_from_slice((value as u8).as_bytes()),
        NumericKind::U16 => dst.copy_from_slice((value as u16).as_bytes()),
        NumericKind::U32 => dst.copy_from_slice((value as u32).as_bytes()),
        NumericKind::U64 => dst.copy_from_slice(value.as_bytes()),
    }
    Ok(())
}
