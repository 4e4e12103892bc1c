//! # Label Archive IO
//!
//! The label file is an uncompressed `.npz` archive holding two `u32`
//! matrices named [`SEQZ_LABELS`] and [`ZSEQ_LABELS`].

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};

use ndarray::Array2;
use ndarray_npy::{NpzReader, NpzWriter};

use crate::encoding::EncodedLabels;
use crate::errors::PreproResult;

/// Archive entry of the forward-padded labels.
pub const SEQZ_LABELS: &str = "seqz_labels";

/// Archive entry of the reverse-padded labels.
pub const ZSEQ_LABELS: &str = "zseq_labels";

/// Write labels to an npz stream.
pub fn write_labels<W: Write + Seek>(
    labels: &EncodedLabels<u32>,
    writer: W,
) -> PreproResult<W> {
    let mut npz = NpzWriter::new(writer);
    npz.add_array(SEQZ_LABELS, &labels.seqz)?;
    npz.add_array(ZSEQ_LABELS, &labels.zseq)?;
    Ok(npz.finish()?)
}

/// Save labels to an npz file.
pub fn save_labels_path<P: AsRef<Path>>(
    labels: &EncodedLabels<u32>,
    path: P,
) -> PreproResult<()> {
    let mut writer = write_labels(labels, BufWriter::new(File::create(path)?))?;
    writer.flush()?;
    Ok(())
}

/// Read labels from an npz stream.
pub fn read_labels<R: Read + Seek>(reader: R) -> PreproResult<EncodedLabels<u32>> {
    let mut npz = NpzReader::new(reader)?;
    let seqz: Array2<u32> = npz.by_name(SEQZ_LABELS)?;
    let zseq: Array2<u32> = npz.by_name(ZSEQ_LABELS)?;
    EncodedLabels::from_arrays(seqz, zseq)
}

/// Load labels from an npz file.
pub fn load_labels_path<P: AsRef<Path>>(path: P) -> PreproResult<EncodedLabels<u32>> {
    read_labels(BufReader::new(File::open(path)?))
}
