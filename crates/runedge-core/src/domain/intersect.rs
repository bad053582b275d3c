//! Intersection of interval domains and of images
//!
//! Domains are intersected line by line with a merge walk over the two
//! sorted interval lists, folding over any number of inputs.

use super::{Interval, IntervalDomain, IntervalDomainBuilder};
use crate::error::{Error, Result};
use crate::image::{Image, PlanarImage};
use std::sync::Arc;

/// Point-set intersection of `domains`.
///
/// The result is normalised and may be empty.
///
/// # Errors
///
/// Returns [`Error::NullInput`] if `domains` is empty and
/// [`Error::AllocationFailed`] on storage exhaustion.
pub fn intersect_domains(domains: &[&IntervalDomain]) -> Result<IntervalDomain> {
    let (first, rest) = domains
        .split_first()
        .ok_or(Error::NullInput("no domains to intersect"))?;
    let mut acc = (*first).clone();
    for d in rest {
        acc = intersect_pair(&acc, d)?;
    }
    Ok(acc)
}

fn intersect_pair(a: &IntervalDomain, b: &IntervalDomain) -> Result<IntervalDomain> {
    let line1 = a.line1.max(b.line1);
    let lastln = a.lastln.min(b.lastln);
    let kol1 = a.kol1.max(b.kol1);
    let lastkl = a.lastkl.min(b.lastkl);
    if a.is_empty() || b.is_empty() || line1 > lastln || kol1 > lastkl {
        return empty_domain();
    }

    let mut builder = IntervalDomainBuilder::new(line1, lastln, kol1, lastkl)?;
    for ln in line1..=lastln {
        for itv in intersect_line(a.line_intervals(ln), b.line_intervals(ln)) {
            builder.append_interval(ln, itv.left, itv.len())?;
        }
    }
    builder.normalize()
}

fn empty_domain() -> Result<IntervalDomain> {
    IntervalDomainBuilder::new(0, 0, 0, 0)?.normalize()
}

/// Intersect the domains of `images`.
///
/// Any [`Image::Empty`] input, or an intersection with no pixels, yields
/// [`Image::Empty`]. Otherwise the result is a planar image carrying the
/// common domain and no values.
///
/// # Errors
///
/// - [`Error::NullInput`] if `images` is empty
/// - [`Error::TypeMismatch`] if planar and volume images are mixed
/// - [`Error::NullDomain`] if a planar image has no domain
/// - [`Error::UnsupportedDimensionality`] for volume images
pub fn intersect_images(images: &[&Image]) -> Result<Image> {
    if images.is_empty() {
        return Err(Error::NullInput("no images to intersect"));
    }
    let planar = images.iter().any(|i| matches!(i, Image::Planar(_)));
    let volume = images.iter().any(|i| matches!(i, Image::Volume(_)));
    if planar && volume {
        return Err(Error::TypeMismatch(
            "cannot intersect planar and volume images".to_string(),
        ));
    }
    if images.iter().any(|i| matches!(i, Image::Empty)) {
        return Ok(Image::Empty);
    }
    if volume {
        return Err(Error::UnsupportedDimensionality(3));
    }

    let mut domains: Vec<&IntervalDomain> = Vec::with_capacity(images.len());
    for img in images {
        if let Image::Planar(p) = img {
            domains.push(p.domain().ok_or(Error::NullDomain)?);
        }
    }
    // Identical domains need no walk.
    if domains.windows(2).all(|w| w[0] == w[1]) {
        return Ok(match images[0] {
            Image::Planar(p) if !domains[0].is_empty() => {
                Image::Planar(PlanarImage::from_shared_domain(Arc::clone(
                    p.shared_domain().ok_or(Error::NullDomain)?,
                )))
            }
            _ => Image::Empty,
        });
    }
    let common = intersect_domains(&domains)?;
    if common.is_empty() {
        Ok(Image::Empty)
    } else {
        Ok(Image::Planar(PlanarImage::from_domain(common)))
    }
}

/// Intersection of two sorted, disjoint interval lists of one line.
pub fn intersect_line(xs: &[Interval], ys: &[Interval]) -> Vec<Interval> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < xs.len() && j < ys.len() {
        let left = xs[i].left.max(ys[j].left);
        let right = xs[i].right.min(ys[j].right);
        if left <= right {
            out.push(Interval::new(left, right));
        }
        // Advance whichever interval ends first.
        if xs[i].right < ys[j].right {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::VolumeImage;
    use crate::values::GreyValues;

    #[test]
    fn test_intersect_overlapping_rectangles() {
        let a = IntervalDomain::rectangle(0, 0, 5, 5).unwrap();
        let b = IntervalDomain::rectangle(2, 3, 5, 5).unwrap();
        let c = intersect_domains(&[&a, &b]).unwrap();
        assert_eq!(c.bounding_box(), (2, 4, 3, 4));
        assert_eq!(c.area(), 6);
        assert!(c.is_subset_of(&a));
        assert!(c.is_subset_of(&b));
    }

    #[test]
    fn test_intersect_split_intervals() {
        let a = IntervalDomain::from_mask(0, 0, &[[true, true, true, true, true, true]]).unwrap();
        let b =
            IntervalDomain::from_mask(0, 0, &[[false, true, true, false, true, false]]).unwrap();
        let c = intersect_domains(&[&a, &b]).unwrap();
        assert_eq!(c.line_intervals(0), &[Interval::new(1, 2), Interval::new(4, 4)]);
    }

    #[test]
    fn test_intersect_disjoint() {
        let a = IntervalDomain::rectangle(0, 0, 3, 3).unwrap();
        let b = IntervalDomain::rectangle(10, 10, 3, 3).unwrap();
        assert!(intersect_domains(&[&a, &b]).unwrap().is_empty());
        assert!(intersect_domains(&[]).is_err());
    }

    #[test]
    fn test_intersect_line() {
        let xs = [Interval::new(0, 4), Interval::new(8, 12)];
        let ys = [Interval::new(3, 9)];
        assert_eq!(
            intersect_line(&xs, &ys),
            vec![Interval::new(3, 4), Interval::new(8, 9)]
        );
    }

    #[test]
    fn test_intersect_images() {
        let a = Image::Planar(PlanarImage::from_domain(
            IntervalDomain::rectangle(0, 0, 4, 4).unwrap(),
        ));
        let b = Image::Planar(
            PlanarImage::new(
                IntervalDomain::rectangle(1, 1, 4, 4).unwrap(),
                GreyValues::Int(vec![0; 16]),
            )
            .unwrap(),
        );
        let Image::Planar(c) = intersect_images(&[&a, &b]).unwrap() else {
            panic!("expected planar image");
        };
        assert_eq!(c.domain().unwrap().area(), 9);
        assert!(c.values().is_none());

        assert!(matches!(
            intersect_images(&[&a, &Image::Empty]).unwrap(),
            Image::Empty
        ));

        let far = Image::Planar(PlanarImage::from_domain(
            IntervalDomain::rectangle(50, 50, 2, 2).unwrap(),
        ));
        assert!(matches!(intersect_images(&[&a, &far]).unwrap(), Image::Empty));
    }

    #[test]
    fn test_intersect_images_errors() {
        let a = Image::Planar(PlanarImage::from_domain(
            IntervalDomain::rectangle(0, 0, 2, 2).unwrap(),
        ));
        let v = Image::Volume(VolumeImage::new(0, vec![]));
        assert!(matches!(
            intersect_images(&[&a, &v]),
            Err(Error::TypeMismatch(_))
        ));
        assert!(matches!(
            intersect_images(&[&v, &v]),
            Err(Error::UnsupportedDimensionality(3))
        ));
        let null = Image::Planar(PlanarImage::default());
        assert!(matches!(
            intersect_images(&[&a, &null]),
            Err(Error::NullDomain)
        ));
    }
}
