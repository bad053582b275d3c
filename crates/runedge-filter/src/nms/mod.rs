//! Non-maximal suppression of gradient images
//!
//! Given the gradient magnitude and its two partial derivatives over an
//! interval domain, keeps only the pixels whose magnitude is a strict local
//! maximum along the gradient direction. The result is an image over the
//! maximal pixels whose values are direction codes
//! ([`Octant::direction_code`]).
//!
//! # Processing
//!
//! The magnitude is scanned one line ahead of the output so that the 3x3
//! neighbourhood of every pixel of the line being suppressed is available
//! in a three-line rolling window. Lines missing from the domain, and the
//! line after the last one, read as zero.
//!
//! # Examples
//!
//! ```
//! use runedge_core::{GreyValues, Image, IntervalDomain, PlanarImage};
//! use runedge_filter::{SuppressOptions, non_maximal_suppression};
//!
//! // Vertical ridge at column 2
//! let domain = IntervalDomain::rectangle(0, 0, 5, 3).unwrap();
//! let row = [0, 4, 10, 4, 0];
//! let mag = PlanarImage::new(domain.clone(), GreyValues::Int(row.repeat(3))).unwrap();
//! let gy = PlanarImage::new(domain.clone(), GreyValues::Int(vec![0; 15])).unwrap();
//! let gx = PlanarImage::new(domain, GreyValues::Int(vec![6; 15])).unwrap();
//!
//! let edges = non_maximal_suppression(
//!     &mag.into(),
//!     None,
//!     &gy.into(),
//!     &gx.into(),
//!     &SuppressOptions::default(),
//! )
//! .unwrap();
//! let edges = edges.as_planar().unwrap();
//! assert_eq!(edges.domain().unwrap().area(), 3);
//! ```

mod interp;
mod line;
pub mod octant;
pub mod options;
pub mod sample;
mod window;

pub use octant::{MAXIMAL_FLAG, Octant};
pub use options::{BufferRepresentation, SuppressOptions};
pub use sample::GradientSample;

use crate::FilterResult;
use line::suppress_interval;
use runedge_core::{
    Error, GreyScan, GreyValues, Image, IntervalDomain, IntervalDomainBuilder, PlanarImage,
    intersect_images,
};
use std::iter::Peekable;
use std::sync::Arc;
use window::RollingWindow;

/// Suppress the non-maximal pixels of a gradient image.
///
/// The three images are first intersected; the suppression runs over the
/// pixels common to all of them.
///
/// # Arguments
///
/// * `magnitude` - Gradient magnitude
/// * `depth` - Gradient through planes; required for volumes only
/// * `vertical` - Gradient through lines
/// * `horizontal` - Gradient through columns
/// * `options` - Threshold and buffer representation
///
/// # Returns
///
/// An image over the maximal pixels holding `UByte` direction codes, or
/// [`Image::Empty`] when the inputs share no pixel or no pixel is maximal.
///
/// # Errors
///
/// - [`Error::TypeMismatch`] if the inputs mix planar images and volumes
/// - [`Error::NullInput`] if a volume is given without a depth gradient
/// - [`Error::UnsupportedDimensionality`] for volumes
/// - [`Error::NullDomain`] / [`Error::NullValues`] for incomplete images
/// - [`FilterError::InvalidParameters`](crate::FilterError::InvalidParameters)
///   if integer buffers are forced on floating input
pub fn non_maximal_suppression(
    magnitude: &Image,
    depth: Option<&Image>,
    vertical: &Image,
    horizontal: &Image,
    options: &SuppressOptions,
) -> FilterResult<Image> {
    match magnitude {
        Image::Empty => Ok(Image::Empty),
        Image::Planar(_) => {
            let Image::Planar(common) = intersect_images(&[magnitude, vertical, horizontal])? else {
                return Ok(Image::Empty);
            };
            let domain = common.shared_domain().ok_or(Error::NullDomain)?;
            let restrict = |img: &Image| -> FilterResult<PlanarImage> {
                let planar = img
                    .as_planar()
                    .ok_or_else(|| Error::TypeMismatch("expected a planar image".to_string()))?;
                Ok(planar.restrict_to(Arc::clone(domain))?)
            };
            suppress_planar(
                &restrict(magnitude)?,
                &restrict(vertical)?,
                &restrict(horizontal)?,
                options,
            )
        }
        Image::Volume(_) => {
            for img in [Some(vertical), Some(horizontal), depth].into_iter().flatten() {
                if let Image::Planar(_) = img {
                    return Err(Error::TypeMismatch(
                        "volume magnitude with planar gradient".to_string(),
                    )
                    .into());
                }
            }
            let depth = depth.ok_or(Error::NullInput("depth gradient"))?;
            if [depth, vertical, horizontal].iter().any(|img| img.is_empty()) {
                return Ok(Image::Empty);
            }
            Err(Error::UnsupportedDimensionality(3).into())
        }
    }
}

/// Suppress the non-maximal pixels of planar images sharing one domain.
///
/// # Errors
///
/// - [`Error::NullDomain`] / [`Error::NullValues`] for incomplete images
/// - [`Error::DomainMismatch`] if the domains differ
/// - [`FilterError::InvalidParameters`](crate::FilterError::InvalidParameters)
///   if integer buffers are forced on floating input
/// - [`Error::AllocationFailed`] on storage exhaustion
pub fn suppress_planar(
    magnitude: &PlanarImage,
    vertical: &PlanarImage,
    horizontal: &PlanarImage,
    options: &SuppressOptions,
) -> FilterResult<Image> {
    let domain = magnitude.shared_domain().ok_or(Error::NullDomain)?;
    for other in [vertical, horizontal] {
        let d = other.domain().ok_or(Error::NullDomain)?;
        if d != domain.as_ref() {
            return Err(Error::DomainMismatch.into());
        }
    }
    let mut floating_input = false;
    for img in [magnitude, vertical, horizontal] {
        floating_input |= img.grey_type().ok_or(Error::NullValues)?.is_floating();
    }
    let floating = options.representation.resolve(floating_input)?;
    if domain.is_empty() {
        return Ok(Image::Empty);
    }

    log::debug!(
        "non-maximal suppression over lines {}..={} cols {}..={} ({} intervals) in {} buffers",
        domain.line1(),
        domain.lastln(),
        domain.kol1(),
        domain.lastkl(),
        domain.interval_count(),
        if floating { "f64" } else { "i32" }
    );

    if floating {
        let min_gm = options.min_gradient.convert::<f64>();
        suppress_with(domain, magnitude, vertical, horizontal, min_gm)
    } else {
        let min_gm = options.min_gradient.convert::<i32>();
        suppress_with(domain, magnitude, vertical, horizontal, min_gm)
    }
}

/// Working state of one planar suppression
struct PlanarScan<'a, T> {
    window: RollingWindow<T>,
    gy: Vec<T>,
    gx: Vec<T>,
    codes: Vec<u8>,
    builder: IntervalDomainBuilder,
    vertical: Peekable<GreyScan<'a>>,
    horizontal: GreyScan<'a>,
    min_gm: T,
    maximal: usize,
}

fn zeroed<T: Clone>(len: usize, value: T) -> FilterResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(Error::from)?;
    v.resize(len, value);
    Ok(v)
}

impl<'a, T: GradientSample> PlanarScan<'a, T> {
    fn new(
        domain: &IntervalDomain,
        vertical: &'a PlanarImage,
        horizontal: &'a PlanarImage,
        min_gm: T,
    ) -> FilterResult<Self> {
        let width = domain.width();
        Ok(Self {
            window: RollingWindow::new(domain.kol1(), width)?,
            gy: zeroed(width, T::default())?,
            gx: zeroed(width, T::default())?,
            codes: zeroed(domain.area(), 0u8)?,
            builder: IntervalDomainBuilder::new(
                domain.line1(),
                domain.lastln(),
                domain.kol1(),
                domain.lastkl(),
            )?,
            vertical: vertical.grey_scan()?.peekable(),
            horizontal: horizontal.grey_scan()?,
            min_gm,
            maximal: 0,
        })
    }

    /// Suppress every interval of `line`; the window must hold the lines
    /// either side of it.
    fn suppress_line(&mut self, line: i32) -> FilterResult<()> {
        while let Some((itv, gy)) = self.vertical.next_if(|(s, _)| s.line == line) {
            let (_, gx) = self.horizontal.next().ok_or(Error::DomainMismatch)?;
            let len = itv.len();
            gy.copy_to(&mut self.gy[..len]);
            gx.copy_to(&mut self.gx[..len]);
            self.maximal += suppress_interval(
                &self.window,
                &itv,
                &self.gy[..len],
                &self.gx[..len],
                self.min_gm,
                &mut self.codes[itv.offset..itv.offset + len],
                &mut self.builder,
            )?;
        }
        Ok(())
    }
}

fn suppress_with<T: GradientSample>(
    domain: &Arc<IntervalDomain>,
    magnitude: &PlanarImage,
    vertical: &PlanarImage,
    horizontal: &PlanarImage,
    min_gm: T,
) -> FilterResult<Image> {
    let mut scan = PlanarScan::new(domain, vertical, horizontal, min_gm)?;

    // Line whose magnitude is loaded but which still waits for the next line.
    let mut pending: Option<i32> = None;
    for (itv, samples) in magnitude.grey_scan()? {
        if itv.lines_advanced > 0 {
            match pending {
                Some(p) if itv.line == p + 1 => {}
                Some(p) => {
                    log::trace!("lines {}..{} absent, flushing line {}", p + 1, itv.line, p);
                    scan.window.clear(p + 1);
                    scan.suppress_line(p)?;
                    pending = None;
                    scan.window.clear(itv.line - 1);
                }
                None => scan.window.clear(itv.line - 1),
            }
            scan.window.clear(itv.line);
        }
        scan.window.load(&itv, samples);
        if itv.last_in_line {
            if let Some(p) = pending {
                scan.suppress_line(p)?;
            }
            pending = Some(itv.line);
        }
    }
    if let Some(p) = pending {
        scan.window.clear(p + 1);
        scan.suppress_line(p)?;
    }

    let PlanarScan {
        codes,
        builder,
        maximal,
        ..
    } = scan;
    let maximal_domain = builder.normalize()?;
    log::debug!(
        "{} maximal pixels in {} intervals",
        maximal,
        maximal_domain.interval_count()
    );
    if maximal_domain.is_empty() {
        return Ok(Image::Empty);
    }
    let codes = PlanarImage::with_shared_domain(Arc::clone(domain), GreyValues::UByte(codes))?;
    Ok(codes.restrict_to(Arc::new(maximal_domain))?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runedge_core::{GreyValue, VolumeImage};

    fn int_image(domain: &IntervalDomain, f: impl Fn(i32, i32) -> i32) -> Image {
        let values = domain
            .scan()
            .flat_map(|s| (s.left..=s.right).map(move |c| (s.line, c)))
            .map(|(l, c)| f(l, c))
            .collect();
        PlanarImage::new(domain.clone(), GreyValues::Int(values))
            .unwrap()
            .into()
    }

    #[test]
    fn test_vertical_ridge() {
        let d = IntervalDomain::rectangle(0, 0, 5, 4).unwrap();
        let mag = int_image(&d, |_, c| [0, 4, 10, 4, 0][c as usize]);
        let gy = int_image(&d, |_, _| 0);
        let gx = int_image(&d, |_, _| 6);
        let out = non_maximal_suppression(&mag, None, &gy, &gx, &SuppressOptions::default())
            .unwrap();
        let out = out.as_planar().unwrap();
        let dom = out.domain().unwrap();
        // The last line is processed too.
        assert_eq!(dom.bounding_box(), (0, 3, 2, 2));
        assert_eq!(out.value_at(3, 2), Some(GreyValue::UByte(0x87)));
    }

    #[test]
    fn test_line_gap_reads_as_zero() {
        // Lines 0 and 2 present, line 1 absent.
        let mask = [[true; 5], [false; 5], [true; 5]];
        let d = IntervalDomain::from_mask(0, 0, &mask).unwrap();
        let mag = int_image(&d, |_, c| [0, 4, 10, 4, 0][c as usize]);
        let gy = int_image(&d, |_, _| 0);
        let gx = int_image(&d, |_, _| 6);
        let out = non_maximal_suppression(&mag, None, &gy, &gx, &SuppressOptions::default())
            .unwrap();
        let dom = out.as_planar().unwrap().domain().unwrap();
        assert_eq!(dom.area(), 2);
        assert!(dom.contains(0, 2) && dom.contains(2, 2));
    }

    #[test]
    fn test_no_maximum_is_empty() {
        let d = IntervalDomain::rectangle(0, 0, 4, 4).unwrap();
        let flat = int_image(&d, |_, _| 5);
        let g = int_image(&d, |_, _| 1);
        let out =
            non_maximal_suppression(&flat, None, &g, &g, &SuppressOptions::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_volume_inputs() {
        let vol: Image = VolumeImage::new(0, vec![PlanarImage::default()]).into();
        let planar: Image = PlanarImage::default().into();
        let opts = SuppressOptions::default();
        assert!(matches!(
            non_maximal_suppression(&vol, Some(&vol), &planar, &vol, &opts),
            Err(crate::FilterError::Core(Error::TypeMismatch(_)))
        ));
        assert!(matches!(
            non_maximal_suppression(&vol, None, &vol, &vol, &opts),
            Err(crate::FilterError::Core(Error::NullInput(_)))
        ));
        assert!(matches!(
            non_maximal_suppression(&vol, Some(&vol), &vol, &vol, &opts),
            Err(crate::FilterError::Core(Error::UnsupportedDimensionality(3)))
        ));
        assert!(
            non_maximal_suppression(&vol, Some(&Image::Empty), &vol, &vol, &opts)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_domain_mismatch() {
        let a = IntervalDomain::rectangle(0, 0, 3, 3).unwrap();
        let b = IntervalDomain::rectangle(0, 0, 3, 2).unwrap();
        let m = int_image(&a, |_, _| 1);
        let v = int_image(&b, |_, _| 1);
        let (Image::Planar(m), Image::Planar(v)) = (m, v) else {
            unreachable!()
        };
        assert!(matches!(
            suppress_planar(&m, &v, &m, &SuppressOptions::default()),
            Err(crate::FilterError::Core(Error::DomainMismatch))
        ));
    }
}
