//! Bag-of-cells payloads, read and written through `everscale-types`.

use everscale_types::boc::de::{BocHeader, Options};
use everscale_types::boc::Boc;
use everscale_types::prelude::*;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum BocError {
    #[error("malformed bag of cells: {0}")]
    Malformed(#[from] everscale_types::boc::de::Error),

    #[error("bag of cells has no roots")]
    NoRoots,

    #[error("root cell #{0} not found")]
    MissingRoot(u32),
}

/// Every root of a bag of cells, in header order.
///
/// Unlike `Boc::decode` this accepts any number of roots; cells shared
/// between roots are shared in the result.
pub fn decode_roots(bytes: &[u8]) -> Result<Vec<Cell>, BocError> {
    let header = BocHeader::decode(bytes, &Options::default())?;
    let cells = header.finalize(&mut Cell::empty_context())?;
    let roots = header
        .roots()
        .iter()
        .map(|&index| cells.get(index).ok_or(BocError::MissingRoot(index)))
        .collect::<Result<Vec<_>, _>>()?;
    if roots.is_empty() {
        return Err(BocError::NoRoots);
    }
    trace!(roots = roots.len(), bytes = bytes.len(), "decoded bag of cells");
    Ok(roots)
}

/// Single-root bag of cells for `cell`.
pub fn encode(cell: &Cell) -> Vec<u8> {
    Boc::encode(cell)
}
