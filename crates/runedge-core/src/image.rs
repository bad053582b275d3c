//! Image objects - domains paired with grey values
//!
//! An [`Image`] is either empty, a planar (2D) image, or a volume of
//! planar images. A [`PlanarImage`] pairs a shared [`IntervalDomain`] with
//! a [`GreyValues`] table holding one sample per present pixel in scan
//! order. Either part may be missing: an image built from a domain alone
//! carries no values, which is how intersections are reported.
//!
//! # Ownership model
//!
//! Domains are held in an `Arc` so images derived from one another (for
//! example the same pixels with different values) share a single domain.
//!
//! # Examples
//!
//! ```
//! use runedge_core::{GreyValue, GreyValues, IntervalDomain, PlanarImage};
//!
//! let domain = IntervalDomain::rectangle(0, 0, 3, 2).unwrap();
//! let img = PlanarImage::new(domain, GreyValues::Int((0..6).collect())).unwrap();
//! assert_eq!(img.value_at(1, 2), Some(GreyValue::Int(5)));
//! assert_eq!(img.value_at(2, 0), None);
//! ```

use crate::domain::{IntervalDomain, IntervalScan, ScanInterval};
use crate::error::{Error, Result};
use crate::values::{GreySlice, GreyType, GreyValue, GreyValues};
use std::sync::Arc;

/// Image object of any dimensionality
#[derive(Debug, Clone, Default)]
pub enum Image {
    /// Object with no pixels
    #[default]
    Empty,
    /// 2D image
    Planar(PlanarImage),
    /// 3D image as a stack of planes
    Volume(VolumeImage),
}

impl Image {
    /// Spatial dimensionality, `None` for [`Image::Empty`].
    pub fn dimensionality(&self) -> Option<u32> {
        match self {
            Image::Empty => None,
            Image::Planar(_) => Some(2),
            Image::Volume(_) => Some(3),
        }
    }

    /// Whether this is [`Image::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Image::Empty)
    }

    /// Borrow the planar image, if this is one.
    pub fn as_planar(&self) -> Option<&PlanarImage> {
        match self {
            Image::Planar(p) => Some(p),
            _ => None,
        }
    }
}

impl From<PlanarImage> for Image {
    fn from(p: PlanarImage) -> Self {
        Image::Planar(p)
    }
}

impl From<VolumeImage> for Image {
    fn from(v: VolumeImage) -> Self {
        Image::Volume(v)
    }
}

/// 2D image over an interval domain
#[derive(Debug, Clone, Default)]
pub struct PlanarImage {
    domain: Option<Arc<IntervalDomain>>,
    values: Option<GreyValues>,
}

impl PlanarImage {
    /// Create an image from a domain and its values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueCountMismatch`] if the number of values is not
    /// the domain area.
    pub fn new(domain: IntervalDomain, values: GreyValues) -> Result<Self> {
        Self::with_shared_domain(Arc::new(domain), values)
    }

    /// Create an image from a shared domain and its values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueCountMismatch`] if the number of values is not
    /// the domain area.
    pub fn with_shared_domain(domain: Arc<IntervalDomain>, values: GreyValues) -> Result<Self> {
        let expected = domain.area();
        if values.len() != expected {
            return Err(Error::ValueCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            domain: Some(domain),
            values: Some(values),
        })
    }

    /// Create an image with a domain and no values.
    pub fn from_domain(domain: IntervalDomain) -> Self {
        Self::from_shared_domain(Arc::new(domain))
    }

    /// Create an image with a shared domain and no values.
    pub fn from_shared_domain(domain: Arc<IntervalDomain>) -> Self {
        Self {
            domain: Some(domain),
            values: None,
        }
    }

    /// Domain, if any.
    pub fn domain(&self) -> Option<&IntervalDomain> {
        self.domain.as_deref()
    }

    /// Shared handle to the domain, if any.
    pub fn shared_domain(&self) -> Option<&Arc<IntervalDomain>> {
        self.domain.as_ref()
    }

    /// Values, if any.
    pub fn values(&self) -> Option<&GreyValues> {
        self.values.as_ref()
    }

    /// Representation of the values, if any.
    pub fn grey_type(&self) -> Option<GreyType> {
        self.values.as_ref().map(GreyValues::grey_type)
    }

    /// Value of pixel (`line`, `col`), or `None` if the pixel is absent
    /// or the image has no values.
    pub fn value_at(&self, line: i32, col: i32) -> Option<GreyValue> {
        let offset = self.domain.as_ref()?.pixel_offset(line, col)?;
        self.values.as_ref()?.get(offset)
    }

    /// Rebind this image's values onto `domain`, which must be a subset of
    /// the image's own domain.
    ///
    /// # Errors
    ///
    /// - [`Error::NullDomain`] / [`Error::NullValues`] if a part is missing
    /// - [`Error::DomainMismatch`] if `domain` is not a subset
    /// - [`Error::AllocationFailed`] on storage exhaustion
    pub fn restrict_to(&self, domain: Arc<IntervalDomain>) -> Result<PlanarImage> {
        let src_domain = self.domain.as_ref().ok_or(Error::NullDomain)?;
        let values = self.values.as_ref().ok_or(Error::NullValues)?;
        if Arc::ptr_eq(src_domain, &domain) || **src_domain == *domain {
            return Ok(PlanarImage {
                domain: Some(domain),
                values: Some(values.clone()),
            });
        }

        let mut out = GreyValues::with_capacity(values.grey_type(), domain.area())?;
        let mut src = src_domain.scan().peekable();
        for (ln, itvs) in domain.lines() {
            for t in itvs {
                while src
                    .next_if(|s| s.line < ln || (s.line == ln && s.right < t.left))
                    .is_some()
                {}
                let s = src.peek().ok_or(Error::DomainMismatch)?;
                if s.line != ln || t.left < s.left || t.right > s.right {
                    return Err(Error::DomainMismatch);
                }
                let start = s.offset + (t.left - s.left) as usize;
                out.extend_from(values.slice(start, t.len() as usize))?;
            }
        }
        Ok(PlanarImage {
            domain: Some(domain),
            values: Some(out),
        })
    }

    /// Cursor yielding each interval together with its samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullDomain`] or [`Error::NullValues`] if the image
    /// lacks a domain or values.
    pub fn grey_scan(&self) -> Result<GreyScan<'_>> {
        let domain = self.domain.as_deref().ok_or(Error::NullDomain)?;
        let values = self.values.as_ref().ok_or(Error::NullValues)?;
        Ok(GreyScan {
            scan: domain.scan(),
            values,
        })
    }
}

/// Iterator over the intervals of a planar image with their samples
#[derive(Debug, Clone)]
pub struct GreyScan<'a> {
    scan: IntervalScan<'a>,
    values: &'a GreyValues,
}

impl<'a> Iterator for GreyScan<'a> {
    type Item = (ScanInterval, GreySlice<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let itv = self.scan.next()?;
        Some((itv, self.values.slice(itv.offset, itv.len())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.scan.size_hint()
    }
}

/// 3D image as consecutive planes starting at `plane1`
#[derive(Debug, Clone, Default)]
pub struct VolumeImage {
    plane1: i32,
    planes: Vec<PlanarImage>,
}

impl VolumeImage {
    /// Create a volume from its first plane index and planes.
    pub fn new(plane1: i32, planes: Vec<PlanarImage>) -> Self {
        Self { plane1, planes }
    }

    /// Index of the first plane.
    pub fn plane1(&self) -> i32 {
        self.plane1
    }

    /// Index of the last plane (inclusive); `plane1 - 1` when empty.
    pub fn last_plane(&self) -> i32 {
        self.plane1 + self.planes.len() as i32 - 1
    }

    /// Planes in order.
    pub fn planes(&self) -> &[PlanarImage] {
        &self.planes
    }
}
