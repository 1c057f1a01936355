// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector boxes through normalization into removal masks

use exerase_api::vision::{normalize, synthesize, Detection};
use image::Rgb;
use std::collections::HashSet;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn white_bounds(mask: &image::RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in mask.enumerate_pixels() {
        if *pixel == WHITE {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

#[test]
fn test_in_bounds_boxes_round_trip_within_one_pixel() {
    let (width, height) = (640u32, 480u32);
    // (left, top, w, h) in pixels
    let boxes = [
        (10u32, 20u32, 100u32, 200u32),
        (300, 100, 37, 91),
        (0, 0, 640, 480),
        (517, 233, 123, 247),
    ];

    for (left, top, w, h) in boxes {
        let rect = normalize(
            f64::from(left) + f64::from(w) / 2.0,
            f64::from(top) + f64::from(h) / 2.0,
            f64::from(w),
            f64::from(h),
            width,
            height,
        )
        .unwrap();
        let detection = Detection::new(1, rect, 0.9);
        let mask = synthesize(width, height, &[detection], &HashSet::from([1])).unwrap();

        let (x0, y0, x1, y1) = white_bounds(&mask).unwrap();
        assert!(x0.abs_diff(left) <= 1, "left {} vs {}", x0, left);
        assert!(y0.abs_diff(top) <= 1, "top {} vs {}", y0, top);
        assert!((x1 + 1).abs_diff(left + w) <= 1, "right {} vs {}", x1 + 1, left + w);
        assert!((y1 + 1).abs_diff(top + h) <= 1, "bottom {} vs {}", y1 + 1, top + h);
    }
}

#[test]
fn test_boxes_past_the_edges_stay_inside_the_mask() {
    let rect = normalize(-10.0, 590.0, 80.0, 40.0, 600, 600).unwrap();
    assert_eq!(rect.x, 0.0);
    assert!(rect.y + rect.height <= 100.0 + 1e-9);

    let mask = synthesize(600, 600, &[Detection::new(4, rect, 0.5)], &HashSet::from([4])).unwrap();
    let (x0, _, _, y1) = white_bounds(&mask).unwrap();
    assert_eq!(x0, 0);
    assert!(y1 < 600);
}

#[test]
fn test_unselected_detections_leave_mask_black() {
    let rect = normalize(50.0, 50.0, 20.0, 20.0, 100, 100).unwrap();
    let mask = synthesize(100, 100, &[Detection::new(1, rect, 0.9)], &HashSet::from([2])).unwrap();
    assert!(white_bounds(&mask).is_none());
}
