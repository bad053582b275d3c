//! Grey values - sample storage for images over interval domains
//!
//! A [`GreyValues`] table holds one sample per present pixel of a domain,
//! in scan order (line by line, left to right within each interval).
//! Samples are homogeneous and use one of the [`GreyType`]s.
//!
//! Engines that want a single arithmetic type pull samples through the
//! [`FromGrey`] conversion, which widens integers and rounds floating
//! values to the nearest integer when narrowing.
//!
//! # Examples
//!
//! ```
//! use runedge_core::{GreySlice, GreyType, GreyValues};
//!
//! let values = GreyValues::Short(vec![-3, 0, 7]);
//! assert_eq!(values.grey_type(), GreyType::Short);
//!
//! let mut buf = [0.0f64; 3];
//! values.slice(0, 3).copy_to(&mut buf);
//! assert_eq!(buf, [-3.0, 0.0, 7.0]);
//! ```

/// Sample representation of a value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GreyType {
    /// Unsigned 8-bit
    UByte,
    /// Signed 16-bit
    Short,
    /// Signed 32-bit
    Int,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
}

impl GreyType {
    /// Whether samples of this type are floating point.
    pub fn is_floating(self) -> bool {
        matches!(self, GreyType::Float | GreyType::Double)
    }

    /// Size in bytes of one sample.
    pub fn sample_size(self) -> usize {
        match self {
            GreyType::UByte => 1,
            GreyType::Short => 2,
            GreyType::Int | GreyType::Float => 4,
            GreyType::Double => 8,
        }
    }
}

/// A single grey value of any representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GreyValue {
    UByte(u8),
    Short(i16),
    Int(i32),
    Float(f32),
    Double(f64),
}

impl GreyValue {
    /// Representation of this value.
    pub fn grey_type(self) -> GreyType {
        match self {
            GreyValue::UByte(_) => GreyType::UByte,
            GreyValue::Short(_) => GreyType::Short,
            GreyValue::Int(_) => GreyType::Int,
            GreyValue::Float(_) => GreyType::Float,
            GreyValue::Double(_) => GreyType::Double,
        }
    }

    /// Convert to `i32`, rounding floating values to the nearest integer
    /// and saturating at the `i32` range.
    pub fn to_int(self) -> i32 {
        self.convert()
    }

    /// Convert to `f64`. Exact for every representation.
    pub fn to_double(self) -> f64 {
        self.convert()
    }

    /// Convert to any [`FromGrey`] sample type.
    pub fn convert<T: FromGrey>(self) -> T {
        match self {
            GreyValue::UByte(v) => T::from_ubyte(v),
            GreyValue::Short(v) => T::from_short(v),
            GreyValue::Int(v) => T::from_int(v),
            GreyValue::Float(v) => T::from_float(v),
            GreyValue::Double(v) => T::from_double(v),
        }
    }
}

impl Default for GreyValue {
    fn default() -> Self {
        GreyValue::Int(0)
    }
}

impl From<u8> for GreyValue {
    fn from(v: u8) -> Self {
        GreyValue::UByte(v)
    }
}

impl From<i16> for GreyValue {
    fn from(v: i16) -> Self {
        GreyValue::Short(v)
    }
}

impl From<i32> for GreyValue {
    fn from(v: i32) -> Self {
        GreyValue::Int(v)
    }
}

impl From<f32> for GreyValue {
    fn from(v: f32) -> Self {
        GreyValue::Float(v)
    }
}

impl From<f64> for GreyValue {
    fn from(v: f64) -> Self {
        GreyValue::Double(v)
    }
}

/// Conversion from any grey sample representation.
///
/// Integer targets round floating sources to the nearest integer
/// (halves away from negative infinity) and saturate; NaN becomes zero.
pub trait FromGrey: Copy + Default {
    fn from_ubyte(v: u8) -> Self;
    fn from_short(v: i16) -> Self;
    fn from_int(v: i32) -> Self;
    fn from_float(v: f32) -> Self;
    fn from_double(v: f64) -> Self;
}

impl FromGrey for i32 {
    #[inline]
    fn from_ubyte(v: u8) -> Self {
        v as i32
    }

    #[inline]
    fn from_short(v: i16) -> Self {
        v as i32
    }

    #[inline]
    fn from_int(v: i32) -> Self {
        v
    }

    #[inline]
    fn from_float(v: f32) -> Self {
        Self::from_double(v as f64)
    }

    #[inline]
    fn from_double(v: f64) -> Self {
        // `as` saturates and maps NaN to 0
        (v + 0.5).floor() as i32
    }
}

impl FromGrey for f64 {
    #[inline]
    fn from_ubyte(v: u8) -> Self {
        v as f64
    }

    #[inline]
    fn from_short(v: i16) -> Self {
        v as f64
    }

    #[inline]
    fn from_int(v: i32) -> Self {
        v as f64
    }

    #[inline]
    fn from_float(v: f32) -> Self {
        v as f64
    }

    #[inline]
    fn from_double(v: f64) -> Self {
        v
    }
}

/// Homogeneous sample table, one sample per present pixel in scan order
#[derive(Debug, Clone, PartialEq)]
pub enum GreyValues {
    UByte(Vec<u8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl GreyValues {
    /// Create a zero-filled table of `len` samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`](crate::Error::AllocationFailed)
    /// if the storage cannot be reserved.
    pub fn zeros(grey_type: GreyType, len: usize) -> crate::Result<Self> {
        fn filled<T: Copy + Default>(len: usize) -> crate::Result<Vec<T>> {
            let mut v = Vec::new();
            v.try_reserve_exact(len)?;
            v.resize(len, T::default());
            Ok(v)
        }
        Ok(match grey_type {
            GreyType::UByte => GreyValues::UByte(filled(len)?),
            GreyType::Short => GreyValues::Short(filled(len)?),
            GreyType::Int => GreyValues::Int(filled(len)?),
            GreyType::Float => GreyValues::Float(filled(len)?),
            GreyType::Double => GreyValues::Double(filled(len)?),
        })
    }

    /// Representation of the samples.
    pub fn grey_type(&self) -> GreyType {
        match self {
            GreyValues::UByte(_) => GreyType::UByte,
            GreyValues::Short(_) => GreyType::Short,
            GreyValues::Int(_) => GreyType::Int,
            GreyValues::Float(_) => GreyType::Float,
            GreyValues::Double(_) => GreyType::Double,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            GreyValues::UByte(v) => v.len(),
            GreyValues::Short(v) => v.len(),
            GreyValues::Int(v) => v.len(),
            GreyValues::Float(v) => v.len(),
            GreyValues::Double(v) => v.len(),
        }
    }

    /// Whether the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<GreyValue> {
        match self {
            GreyValues::UByte(v) => v.get(index).map(|&x| GreyValue::UByte(x)),
            GreyValues::Short(v) => v.get(index).map(|&x| GreyValue::Short(x)),
            GreyValues::Int(v) => v.get(index).map(|&x| GreyValue::Int(x)),
            GreyValues::Float(v) => v.get(index).map(|&x| GreyValue::Float(x)),
            GreyValues::Double(v) => v.get(index).map(|&x| GreyValue::Double(x)),
        }
    }

    /// Borrow `len` samples starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, offset: usize, len: usize) -> GreySlice<'_> {
        let r = offset..offset + len;
        match self {
            GreyValues::UByte(v) => GreySlice::UByte(&v[r]),
            GreyValues::Short(v) => GreySlice::Short(&v[r]),
            GreyValues::Int(v) => GreySlice::Int(&v[r]),
            GreyValues::Float(v) => GreySlice::Float(&v[r]),
            GreyValues::Double(v) => GreySlice::Double(&v[r]),
        }
    }

    /// Append a slice of samples of the same representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`](crate::Error::TypeMismatch) if the
    /// representations differ.
    pub fn extend_from(&mut self, src: GreySlice<'_>) -> crate::Result<()> {
        match (self, src) {
            (GreyValues::UByte(d), GreySlice::UByte(s)) => d.extend_from_slice(s),
            (GreyValues::Short(d), GreySlice::Short(s)) => d.extend_from_slice(s),
            (GreyValues::Int(d), GreySlice::Int(s)) => d.extend_from_slice(s),
            (GreyValues::Float(d), GreySlice::Float(s)) => d.extend_from_slice(s),
            (GreyValues::Double(d), GreySlice::Double(s)) => d.extend_from_slice(s),
            (dst, src) => {
                return Err(crate::Error::TypeMismatch(format!(
                    "cannot append {:?} samples to {:?} values",
                    src.grey_type(),
                    dst.grey_type()
                )));
            }
        }
        Ok(())
    }

    /// Empty table of the given representation with reserved capacity.
    pub(crate) fn with_capacity(grey_type: GreyType, cap: usize) -> crate::Result<Self> {
        fn reserved<T>(cap: usize) -> crate::Result<Vec<T>> {
            let mut v = Vec::new();
            v.try_reserve_exact(cap)?;
            Ok(v)
        }
        Ok(match grey_type {
            GreyType::UByte => GreyValues::UByte(reserved(cap)?),
            GreyType::Short => GreyValues::Short(reserved(cap)?),
            GreyType::Int => GreyValues::Int(reserved(cap)?),
            GreyType::Float => GreyValues::Float(reserved(cap)?),
            GreyType::Double => GreyValues::Double(reserved(cap)?),
        })
    }
}

/// Borrowed run of samples, typically one interval's worth
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GreySlice<'a> {
    UByte(&'a [u8]),
    Short(&'a [i16]),
    Int(&'a [i32]),
    Float(&'a [f32]),
    Double(&'a [f64]),
}

impl GreySlice<'_> {
    /// Representation of the samples.
    pub fn grey_type(&self) -> GreyType {
        match self {
            GreySlice::UByte(_) => GreyType::UByte,
            GreySlice::Short(_) => GreyType::Short,
            GreySlice::Int(_) => GreyType::Int,
            GreySlice::Float(_) => GreyType::Float,
            GreySlice::Double(_) => GreyType::Double,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            GreySlice::UByte(s) => s.len(),
            GreySlice::Short(s) => s.len(),
            GreySlice::Int(s) => s.len(),
            GreySlice::Float(s) => s.len(),
            GreySlice::Double(s) => s.len(),
        }
    }

    /// Whether the slice holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert and copy the samples into `dst`.
    ///
    /// Copies `min(self.len(), dst.len())` samples.
    pub fn copy_to<T: FromGrey>(&self, dst: &mut [T]) {
        match *self {
            GreySlice::UByte(s) => dst.iter_mut().zip(s).for_each(|(d, &v)| *d = T::from_ubyte(v)),
            GreySlice::Short(s) => dst.iter_mut().zip(s).for_each(|(d, &v)| *d = T::from_short(v)),
            GreySlice::Int(s) => dst.iter_mut().zip(s).for_each(|(d, &v)| *d = T::from_int(v)),
            GreySlice::Float(s) => dst.iter_mut().zip(s).for_each(|(d, &v)| *d = T::from_float(v)),
            GreySlice::Double(s) => {
                dst.iter_mut().zip(s).for_each(|(d, &v)| *d = T::from_double(v))
            }
        }
    }
}
