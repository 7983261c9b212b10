use std::str::FromStr;

/// The [`FieldValue`] trait is a minimal trait describing a primitive type that can appear as a
/// field of a [`Record`](crate::record::Record).
///
/// Every implementor has a fixed little-endian encoding of [`FieldValue::WIDTH`] bytes, which is
/// what makes the record layout portable across targets.
pub trait FieldValue: sealed::Sealed + Copy + PartialEq + FromStr {
  /// Encoded width in bytes.
  const WIDTH: usize;

  /// Read the value from the first `WIDTH` bytes of `bytes`.
  fn read_le(bytes: &[u8]) -> Self;

  /// Write the value into the first `WIDTH` bytes of `bytes`.
  fn write_le(self, bytes: &mut [u8]);
}

impl FieldValue for i64 {
  const WIDTH: usize = 8;

  fn read_le(bytes: &[u8]) -> Self {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    i64::from_le_bytes(raw)
  }

  fn write_le(self, bytes: &mut [u8]) {
    bytes[..8].copy_from_slice(&self.to_le_bytes());
  }
}

impl FieldValue for i32 {
  const WIDTH: usize = 4;

  fn read_le(bytes: &[u8]) -> Self {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[..4]);
    i32::from_le_bytes(raw)
  }

  fn write_le(self, bytes: &mut [u8]) {
    bytes[..4].copy_from_slice(&self.to_le_bytes());
  }
}

impl FieldValue for f32 {
  const WIDTH: usize = 4;

  fn read_le(bytes: &[u8]) -> Self {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[..4]);
    f32::from_le_bytes(raw)
  }

  fn write_le(self, bytes: &mut [u8]) {
    bytes[..4].copy_from_slice(&self.to_le_bytes());
  }
}

mod sealed {
  pub trait Sealed {}

  impl Sealed for i64 {}
  impl Sealed for i32 {}
  impl Sealed for f32 {}
}
