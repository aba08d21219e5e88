use crate::algorithms::initializer::InitializationMethod;
use crate::error::{Result, SvdError};
use ndarray::{Array2, ArrayView1, ArrayViewMut1};
use rand::Rng;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const FLOAT_BYTES: usize = std::mem::size_of::<f32>();

/// Row-major little-endian `f32` on disk, no header.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    factors: Array2<f32>,
}

impl FactorTable {
    pub fn new(capacity: usize, features: usize) -> Self {
        let mut table = Self {
            factors: Array2::zeros((capacity, features)),
        };
        table.initialize_constant(InitializationMethod::inverse_sqrt(features));
        table
    }

    pub fn initialize_constant(&mut self, value: f32) {
        self.factors.fill(value);
    }

    pub fn initialize<R: Rng + ?Sized>(&mut self, method: &InitializationMethod, rng: &mut R) {
        let features = self.features();
        for mut row in self.factors.rows_mut() {
            for (slot, value) in row.iter_mut().zip(method.initialize(features, rng)) {
                *slot = value;
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.factors.nrows()
    }

    pub fn features(&self) -> usize {
        self.factors.ncols()
    }

    /// Panics when `id >= capacity`.
    pub fn row(&self, id: usize) -> ArrayView1<'_, f32> {
        self.factors.row(id)
    }

    pub fn row_mut(&mut self, id: usize) -> ArrayViewMut1<'_, f32> {
        self.factors.row_mut(id)
    }

    pub fn byte_len(&self) -> usize {
        self.capacity() * self.features() * FLOAT_BYTES
    }

    pub fn load_from<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        reader.read_to_end(&mut bytes)?;
        if bytes.len() != self.byte_len() {
            return Err(SvdError::format(format!(
                "factor block is {} bytes, expected {} ({} rows x {} features)",
                bytes.len(),
                self.byte_len(),
                self.capacity(),
                self.features()
            )));
        }

        for (slot, chunk) in self
            .factors
            .iter_mut()
            .zip(bytes.chunks_exact(FLOAT_BYTES))
        {
            *slot = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(())
    }

    pub fn save_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for value in self.factors.iter() {
            writer.write_all(&value.to_le_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(path)?;
        self.load_from(BufReader::new(file))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.save_to(BufWriter::new(file))
    }
}
