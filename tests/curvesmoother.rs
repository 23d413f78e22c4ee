use approx::assert_relative_eq;

use curvesmoother::math::curve::nonparametriccurve::nonparametriccurve::SamplePoint;
use curvesmoother::math::curve::nonparametriccurve::piecewisepolynomial::PolynomialType;
use curvesmoother::smoothing::curvesmoother::{
    smooth,
    smooth_shape_preserving,
    CurveSmoother
};
use curvesmoother::smoothing::smoothingerror::SmoothingError;
use curvesmoother::smoothing::smoothingmethod::{
    ClampBounds,
    SmoothingMethod
};
use curvesmoother::smoothing::smoothingrequest::SmoothingRequest;

fn samples(pairs: &[(f64, f64)]) -> Vec<SamplePoint> {
    pairs.iter().map(|&p| SamplePoint::from(p)).collect()
}

/// 合成的半拋物線：x = 1..=20，由 0 遞增至 3.2，頂點在 x = 20
fn half_parabola() -> Vec<SamplePoint> {
    (1..=20)
        .map(|n| {
            let n = n as f64;
            SamplePoint::new(n, 3.2 * (1.0 - ((n - 20.0) / 19.0).powi(2)))
        })
        .collect()
}

#[test]
fn output_length_matches_resolution() {
    let data = samples(&[(1.0, 2.8), (3.0, 2.1), (5.0, 1.7), (7.0, 1.5), (9.0, 1.4), (11.0, 1.3)]);
    for degree in 1..=5 {
        for resolution in [1, 2, 7, 300] {
            let curve = smooth(&data, resolution, degree, None).unwrap();
            assert_eq!(curve.len(), resolution);
        }
    }
}

#[test]
fn output_spans_sample_range_exactly() {
    let data = half_parabola();
    let curve = smooth(&data, 500, 3, None).unwrap();
    let xs = curve.xs();
    assert_eq!(xs[0], 1.0);
    assert_eq!(xs[xs.len() - 1], 20.0);
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn single_point_resolution_starts_at_first_sample() {
    let curve = smooth(&half_parabola(), 1, 3, None).unwrap();
    assert_eq!(curve.len(), 1);
    assert_eq!(curve.points()[0].x(), 1.0);
    assert!(curve.points()[0].y().abs() < 1e-12);
}

#[test]
fn passes_through_samples_on_superset_grid() {
    let data = half_parabola();
    // 步長 0.5，偶數索引恰為取樣點
    let curve = smooth(&data, 39, 3, None).unwrap();
    for (i, sample) in data.iter().enumerate() {
        let pt = curve.points()[2 * i];
        assert_eq!(pt.x(), sample.x());
        assert_relative_eq!(pt.y(), sample.y(), max_relative = 1e-9, epsilon = 1e-12);
    }
}

#[test]
fn end_to_end_delay_curve() {
    let data = samples(&[(1.0, 2.8), (3.0, 2.1), (5.0, 1.7), (7.0, 1.5), (9.0, 1.4)]);
    let curve = smooth(&data, 5, 3, None).unwrap();
    assert_eq!(curve.xs(), vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    for (y, expected) in curve.ys().iter().zip([2.8, 2.1, 1.7, 1.5, 1.4]) {
        assert_relative_eq!(*y, expected, max_relative = 1e-9);
    }
}

#[test]
fn clamp_keeps_every_value_in_bounds() {
    let data = samples(&[(1.0, 400.0), (5.0, 200.0), (10.0, 80.0), (15.0, 40.0), (20.0, 15.0)]);
    for (lo, hi) in [(0.0, 1000.0), (50.0, 300.0)] {
        let curve = smooth(&data, 300, 3, Some(ClampBounds::new(lo, hi))).unwrap();
        assert!(curve.ys().iter().all(|&y| lo <= y && y <= hi));
    }

    let clipped = smooth(&data, 300, 3, Some(ClampBounds::new(50.0, 300.0))).unwrap();
    assert_eq!(clipped.points()[0].y(), 300.0);
    assert_eq!(clipped.points()[299].y(), 50.0);
}

#[test]
fn shape_preserving_keeps_monotone_series_monotone() {
    let accuracy = samples(&[(0.0, 0.50), (10.0, 0.70), (20.0, 0.80), (30.0, 0.80), (40.0, 0.85), (50.0, 0.90)]);
    let curve = smooth_shape_preserving(&accuracy, 1000, None).unwrap();
    let ys = curve.ys();
    assert!(ys.windows(2).all(|w| w[1] >= w[0] - 1e-12));
    assert!(ys.iter().all(|&y| (0.50 - 1e-12..=0.90 + 1e-12).contains(&y)));
}

#[test]
fn plain_spline_may_overshoot_where_shape_preserving_does_not() {
    let step = samples(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 1.0), (4.0, 1.0), (5.0, 1.0)]);

    let spline = smooth(&step, 501, 3, None).unwrap();
    let spline_min = spline.ys().into_iter().fold(f64::INFINITY, f64::min);
    assert!(spline_min < 0.0);

    let monotone = smooth_shape_preserving(&step, 501, None).unwrap();
    let ys = monotone.ys();
    assert!(ys.windows(2).all(|w| w[1] >= w[0] - 1e-12));
    assert!(ys.iter().all(|&y| (-1e-12..=1.0 + 1e-12).contains(&y)));
}

#[test]
fn too_few_samples_for_degree() {
    let err = smooth(&samples(&[(1.0, 1.0), (2.0, 2.0)]), 10, 3, None).unwrap_err();
    assert!(matches!(err, SmoothingError::InsufficientSamples { required: 4, actual: 2, .. }));
}

#[test]
fn unsorted_samples_are_rejected_not_sorted() {
    let err = smooth(&samples(&[(2.0, 1.0), (1.0, 2.0)]), 10, 1, None).unwrap_err();
    assert!(matches!(err, SmoothingError::NonMonotonicInput { index: 0, .. }));
}

#[test]
fn zero_resolution_is_rejected() {
    let data = samples(&[(1.0, 1.0), (2.0, 2.0), (3.0, 1.0), (4.0, 3.0)]);
    let err = smooth(&data, 0, 1, None).unwrap_err();
    assert_eq!(err, SmoothingError::InvalidResolution(0));
}

#[test]
fn caller_chooses_between_methods() {
    let data = samples(&[(1.0, 3.2), (3.0, 2.8), (5.0, 2.6), (7.0, 2.5), (9.0, 2.6), (11.0, 2.7)]);
    let plain = SmoothingRequest::cubic(data.clone(), 200);
    let akima = SmoothingRequest::cubic(data.clone(), 200)
        .with_method(SmoothingMethod::Piecewise { polynomial: PolynomialType::ModifiedAkimaCubic });
    let pchip = SmoothingRequest::cubic(data, 200).with_method(SmoothingMethod::ShapePreserving);

    let a = CurveSmoother::smooth(&plain).unwrap();
    let b = CurveSmoother::smooth(&akima).unwrap();
    let c = CurveSmoother::smooth(&pchip).unwrap();
    assert_eq!(a.xs(), c.xs());
    assert_ne!(a.ys(), c.ys());
    assert_ne!(b.ys(), c.ys());
}

#[test]
fn evaluates_at_annotation_points() {
    let request = SmoothingRequest::cubic(half_parabola(), 500);
    let points = CurveSmoother::evaluate_at(&request, &[5.0, 10.0, 15.0, 20.0]).unwrap();
    assert_eq!(points.len(), 4);
    assert_relative_eq!(points[3].y(), 3.2, max_relative = 1e-9);
}

#[test]
fn optimal_workers_on_u_shaped_delay() {
    let delay = samples(&[
        (1.0, 3.2), (3.0, 2.8), (5.0, 2.6), (7.0, 2.5), (9.0, 2.6),
        (11.0, 2.7), (13.0, 2.8), (15.0, 2.9), (17.0, 3.0), (19.0, 3.1),
    ]);
    let request = SmoothingRequest::cubic(delay, 300).with_method(SmoothingMethod::ShapePreserving);
    let best = CurveSmoother::locate_minimum(&request, 1000).unwrap();
    assert_relative_eq!(best.x(), 7.0, epsilon = 1e-3);
    assert_relative_eq!(best.y(), 2.5, epsilon = 1e-9);
}

#[test]
fn samples_spanning_beyond_f64_max_do_not_panic() {
    let wide = samples(&[(-1e308, 1.0), (-5e307, 2.0), (0.0, 3.0), (5e307, 4.0), (1e308, 5.0)]);

    let polyline = smooth(&wide, 5, 1, None).unwrap();
    assert_eq!(polyline.xs()[0], -1e308);
    assert_eq!(polyline.xs()[4], 1e308);
    for (y, expected) in polyline.ys().iter().zip([1.0, 2.0, 3.0, 4.0, 5.0]) {
        assert_relative_eq!(*y, expected, max_relative = 1e-9);
    }

    let monotone = smooth_shape_preserving(&wide, 101, None).unwrap();
    assert_eq!(monotone.len(), 101);
    let ys = monotone.ys();
    assert!(ys.iter().all(|y| y.is_finite()));
    assert!(ys.windows(2).all(|w| w[1] >= w[0] - 1e-9));
}
