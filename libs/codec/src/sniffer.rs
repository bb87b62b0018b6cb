//! Header Sniffer
//!
//! Reads the common 4-byte header off the front of a buffer. The declared
//! `structure_size` is returned as-is; deciding whether to trust it is the
//! decoder's job.

use crate::error::HeaderError;
use gpumon_types::MetricsTableHeader;
use zerocopy::FromBytes;

/// Read the common header from the start of `buffer`
///
/// Copies the header out, so `buffer` needs no alignment. Fails only when
/// the buffer is shorter than [`MetricsTableHeader::SIZE`].
pub fn sniff(buffer: &[u8]) -> Result<MetricsTableHeader, HeaderError> {
    MetricsTableHeader::read_from_prefix(buffer)
        .ok_or_else(|| HeaderError::too_short(MetricsTableHeader::SIZE, buffer.len()))
}
