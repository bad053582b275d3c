//! Non-maximal suppression regression test
//!
//! Exercises suppression on synthetic gradient images: a diagonal ridge
//! with a known answer, border handling on ragged domains, threshold
//! monotonicity, the domain subset law and the agreement between the
//! integer and floating point buffers.

use runedge_core::{
    Error, GreyType, GreyValue, Image, IntervalDomain, PlanarImage, intersect_domains,
};
use runedge_filter::{
    BufferRepresentation, FilterError, SuppressOptions, non_maximal_suppression,
};
use runedge_test::{RegParams, planar_double, planar_from_fn, planar_int, planar_masked};

fn suppress(mag: &PlanarImage, gy: &PlanarImage, gx: &PlanarImage, opts: &SuppressOptions) -> Image {
    non_maximal_suppression(
        &mag.clone().into(),
        None,
        &gy.clone().into(),
        &gx.clone().into(),
        opts,
    )
    .expect("non_maximal_suppression")
}

/// Domain of a result, empty for `Image::Empty`.
fn result_domain(img: &Image) -> IntervalDomain {
    img.as_planar()
        .and_then(PlanarImage::domain)
        .cloned()
        .unwrap_or_else(|| IntervalDomain::from_mask::<[bool; 0]>(0, 0, &[]).expect("empty domain"))
}

/// Edge ring of radius 6 centred on (8, 8): magnitude peaks on the ring
/// and the gradient points radially with that magnitude.
fn ring(domain: &IntervalDomain) -> (PlanarImage, PlanarImage, PlanarImage) {
    let edge = |l: i32, c: i32| {
        let (y, x) = ((l - 8) as f64, (c - 8) as f64);
        let r = (x * x + y * y).sqrt();
        let m = 100.0 * (-(r - 6.0).powi(2) / 4.0).exp();
        if r > 0.0 { (m, m * y / r, m * x / r) } else { (m, 0.0, 0.0) }
    };
    let mag = planar_from_fn(domain.clone(), GreyType::Int, |l, c| edge(l, c).0)
        .expect("magnitude");
    let gy = planar_from_fn(domain.clone(), GreyType::Int, |l, c| edge(l, c).1)
        .expect("vertical gradient");
    let gx = planar_from_fn(domain.clone(), GreyType::Int, |l, c| edge(l, c).2)
        .expect("horizontal gradient");
    (mag, gy, gx)
}

#[test]
fn nms_reg() {
    let mut rp = RegParams::new("nms");

    // --- Test 1: 5x5 diagonal ridge ---
    let mag_rows: Vec<Vec<i32>> = (0..5)
        .map(|r| (0..5).map(|c| if r == c { 10 } else { 0 }).collect())
        .collect();
    let mag_rows: Vec<&[i32]> = mag_rows.iter().map(Vec::as_slice).collect();
    let mag = planar_int(0, 0, &mag_rows).expect("magnitude");
    let (gy_row, gx_row): (&[i32], &[i32]) = (&[-7; 5], &[7; 5]);
    let gy = planar_int(0, 0, &[gy_row; 5]).expect("vertical gradient");
    let gx = planar_int(0, 0, &[gx_row; 5]).expect("horizontal gradient");

    let out = suppress(&mag, &gy, &gx, &SuppressOptions::default());
    let expected = IntervalDomain::from_mask(
        1,
        1,
        &[[true, false, false], [false, true, false], [false, false, true]],
    )
    .expect("expected domain");
    rp.compare_domains(&expected, &result_domain(&out));
    let planar = out.as_planar().expect("planar result");
    for k in 1..4 {
        let code = planar.value_at(k, k).map_or(0.0, |v| v.to_double());
        rp.compare_values(0x81 as f64, code, 0.0);
    }
    rp.compare_values(0.0, if planar.value_at(0, 0).is_none() { 0.0 } else { 1.0 }, 0.0);
    rp.compare_values(0.0, if planar.value_at(4, 4).is_none() { 0.0 } else { 1.0 }, 0.0);

    // --- Test 2: threshold conversion rounds to nearest ---
    let opts = SuppressOptions::default().with_min_gradient(9.4f64);
    let kept = suppress(&mag, &gy, &gx, &opts);
    rp.compare_values(3.0, result_domain(&kept).area() as f64, 0.0);
    let opts = SuppressOptions::default().with_min_gradient(9.6f64);
    let gone = suppress(&mag, &gy, &gx, &opts);
    rp.compare_values(1.0, if gone.is_empty() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "nms regression test failed");
}

#[test]
fn nms_border_reg() {
    let mut rp = RegParams::new("nms_border");

    // Vertical ridge at column 3, with a hole splitting lines 2 and 3.
    let x = None;
    let rows: [&[Option<i32>]; 6] = [
        &[Some(0), Some(4), Some(7), Some(10), Some(7), Some(4), Some(0)],
        &[Some(0), Some(4), Some(7), Some(10), Some(7), Some(4), Some(0)],
        &[Some(0), Some(4), x, Some(10), Some(7), Some(4), Some(0)],
        &[Some(0), Some(4), Some(7), Some(10), x, Some(4), Some(0)],
        &[Some(0), Some(4), Some(7), Some(10), Some(7), Some(4), Some(0)],
        &[Some(0), Some(4), Some(7), Some(10), Some(7), Some(4), Some(0)],
    ];
    let mag = planar_masked(0, 0, &rows).expect("magnitude");
    let domain = mag.domain().expect("domain").clone();
    let gy = planar_from_fn(domain.clone(), GreyType::Int, |_, _| 0.0).expect("gy");
    let gx = planar_from_fn(domain.clone(), GreyType::Int, |_, _| 5.0).expect("gx");

    let out = suppress(&mag, &gy, &gx, &SuppressOptions::default());
    let got = result_domain(&out);

    // Every maximal pixel has domain pixels on both sides in its line.
    let interior = got
        .scan()
        .flat_map(|s| (s.left..=s.right).map(move |c| (s.line, c)))
        .all(|(l, c)| domain.contains(l, c - 1) && domain.contains(l, c + 1));
    rp.compare_values(1.0, if interior { 1.0 } else { 0.0 }, 0.0);

    // Column 3 is the first or last column of an interval on lines 2 and 3.
    let expected =
        IntervalDomain::from_mask(0, 3, &[[true], [true], [false], [false], [true], [true]])
            .expect("expected domain");
    rp.compare_domains(&expected, &got);

    assert!(rp.cleanup(), "nms_border regression test failed");
}

#[test]
fn nms_threshold_reg() {
    let mut rp = RegParams::new("nms_threshold");

    let domain = IntervalDomain::rectangle(0, 0, 17, 17).expect("domain");
    let (mag, gy, gx) = ring(&domain);

    let mut previous: Option<IntervalDomain> = None;
    for t in [0, 10, 40, 80, 99] {
        let opts = SuppressOptions::default().with_min_gradient(t);
        let got = result_domain(&suppress(&mag, &gy, &gx, &opts));
        eprintln!("  threshold {}: {} maximal pixels", t, got.area());
        if let Some(prev) = &previous {
            rp.compare_values(1.0, if got.is_subset_of(prev) { 1.0 } else { 0.0 }, 0.0);
        }
        previous = Some(got);
    }

    // The ring itself survives a zero threshold.
    let all = result_domain(&suppress(&mag, &gy, &gx, &SuppressOptions::default()));
    rp.compare_values(1.0, if all.area() >= 8 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if all.contains(8, 14) && all.contains(2, 8) { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, if all.contains(8, 8) { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "nms_threshold regression test failed");
}

#[test]
fn nms_subset_reg() {
    let mut rp = RegParams::new("nms_subset");

    let full = IntervalDomain::rectangle(0, 0, 17, 17).expect("domain");
    let (mag, _, _) = ring(&full);

    // Gradients over overlapping but different domains.
    let vmask: Vec<Vec<bool>> = (0..17)
        .map(|l| (0..17).map(|c| (l + c) % 7 != 0).collect())
        .collect();
    let vdom = IntervalDomain::from_mask(0, 0, &vmask).expect("vertical domain");
    let hdom = IntervalDomain::rectangle(2, 1, 15, 14).expect("horizontal domain");
    let (_, gy, _) = ring(&vdom);
    let (_, _, gx) = ring(&hdom);

    let common = intersect_domains(&[&full, &vdom, &hdom]).expect("intersection");
    let out = suppress(&mag, &gy, &gx, &SuppressOptions::default());
    let got = result_domain(&out);
    rp.compare_values(1.0, if got.is_subset_of(&common) { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if got.area() > 0 { 1.0 } else { 0.0 }, 0.0);

    // Every value is a flagged direction code.
    let codes_ok = match out.as_planar().and_then(PlanarImage::values) {
        Some(values) => (0..values.len()).all(|i| {
            matches!(values.get(i), Some(GreyValue::UByte(v)) if (0x80..=0x87).contains(&v))
        }),
        None => false,
    };
    rp.compare_values(1.0, if codes_ok { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "nms_subset regression test failed");
}

#[test]
fn nms_representation_reg() {
    let mut rp = RegParams::new("nms_representation");

    // --- Test 1: integer and floating buffers agree on a clean ridge ---
    let row: &[i32] = &[0, 4, 10, 4, 0, 2, 6, 2];
    let mag = planar_int(0, 0, &[row; 4]).expect("magnitude");
    let (gy_row, gx_row): (&[i32], &[i32]) = (&[0; 8], &[6; 8]);
    let gy = planar_int(0, 0, &[gy_row; 4]).expect("gy");
    let gx = planar_int(0, 0, &[gx_row; 4]).expect("gx");
    let int_out = suppress(&mag, &gy, &gx, &SuppressOptions::default());
    let opts = SuppressOptions::default().with_representation(BufferRepresentation::Floating);
    let dbl_out = suppress(&mag, &gy, &gx, &opts);
    rp.compare_domains(&result_domain(&int_out), &result_domain(&dbl_out));
    rp.compare_values(8.0, result_domain(&int_out).area() as f64, 0.0);
    let same_values = int_out.as_planar().and_then(PlanarImage::values)
        == dbl_out.as_planar().and_then(PlanarImage::values);
    rp.compare_values(1.0, if same_values { 1.0 } else { 0.0 }, 0.0);

    // --- Test 2: integer truncation can suppress a floating maximum ---
    let (zeros, ones): (&[i32], &[i32]) = (&[0; 4], &[1; 4]);
    let mag = planar_int(0, 0, &[zeros, &[0, 9, 10, 0], zeros]).expect("magnitude");
    let gy = planar_int(0, 0, &[zeros; 3]).expect("gy");
    let gx = planar_int(0, 0, &[ones; 3]).expect("gx");
    let int_out = suppress(&mag, &gy, &gx, &SuppressOptions::default());
    rp.compare_values(1.0, if int_out.is_empty() { 1.0 } else { 0.0 }, 0.0);
    let dbl_out = suppress(&mag, &gy, &gx, &opts);
    let expected = IntervalDomain::rectangle(1, 2, 1, 1).expect("expected domain");
    rp.compare_domains(&expected, &result_domain(&dbl_out));

    // --- Test 3: floating input selects floating buffers ---
    let zeros: &[f64] = &[0.0; 4];
    let mag = planar_double(0, 0, &[zeros, &[0.0, 9.0, 10.0, 0.0], zeros]).expect("magnitude");
    let auto_out = suppress(&mag, &gy, &gx, &SuppressOptions::default());
    rp.compare_domains(&expected, &result_domain(&auto_out));
    let forced = non_maximal_suppression(
        &mag.into(),
        None,
        &gy.into(),
        &gx.into(),
        &SuppressOptions::default().with_representation(BufferRepresentation::Integer),
    );
    let rejected = matches!(forced, Err(FilterError::InvalidParameters(_)));
    rp.compare_values(1.0, if rejected { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "nms_representation regression test failed");
}

#[test]
fn nms_errors_reg() {
    let mut rp = RegParams::new("nms_errors");
    let opts = SuppressOptions::default();

    let img: Image = planar_int(0, 0, &[&[1, 2, 3], &[4, 5, 6]]).expect("image").into();
    let far: Image = planar_int(10, 10, &[&[1, 2, 3]]).expect("image").into();

    // --- Empty inputs give an empty result ---
    let r = non_maximal_suppression(&Image::Empty, None, &img, &img, &opts).expect("empty");
    rp.compare_values(1.0, if r.is_empty() { 1.0 } else { 0.0 }, 0.0);
    let r = non_maximal_suppression(&img, None, &Image::Empty, &img, &opts).expect("empty");
    rp.compare_values(1.0, if r.is_empty() { 1.0 } else { 0.0 }, 0.0);

    // --- Disjoint domains ---
    let r = non_maximal_suppression(&img, None, &far, &img, &opts).expect("disjoint");
    rp.compare_values(1.0, if r.is_empty() { 1.0 } else { 0.0 }, 0.0);

    // --- Missing domain or values ---
    let no_domain: Image = PlanarImage::default().into();
    let r = non_maximal_suppression(&img, None, &no_domain, &img, &opts);
    let ok = matches!(r, Err(FilterError::Core(Error::NullDomain)));
    rp.compare_values(1.0, if ok { 1.0 } else { 0.0 }, 0.0);

    let domain = img.as_planar().and_then(PlanarImage::domain).expect("domain").clone();
    let no_values: Image = PlanarImage::from_domain(domain).into();
    let r = non_maximal_suppression(&img, None, &img, &no_values, &opts);
    let ok = matches!(r, Err(FilterError::Core(Error::NullValues)));
    rp.compare_values(1.0, if ok { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "nms_errors regression test failed");
}
