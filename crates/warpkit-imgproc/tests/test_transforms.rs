use std::f64::consts::FRAC_PI_4;

use warpkit_geometry::{
    AffineTransform, ErrorKind, Point2d, ProjectiveTransform, SimilarityTransform, Transform,
    TransformFamily,
};
use warpkit_image::{Color, DynamicImage, ImageSize, PixelFormat};
use warpkit_imgproc::{
    border::BorderMode,
    crop::Rectangle,
    dynamic::DynamicImageOps,
    interpolation::InterpolationMode,
    warp::{RotateOptions, WarpOptions},
    ImgprocError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn points(coords: &[(f64, f64)]) -> Vec<Point2d> {
    coords.iter().map(|&p| p.into()).collect()
}

fn white_rgb() -> Result<DynamicImage, ImgprocError> {
    let mut img = DynamicImage::new(
        ImageSize {
            width: 10,
            height: 10,
        },
        PixelFormat::Rgb,
    )?;
    img.fill(Color::Rgb([255, 255, 255]))?;
    Ok(img)
}

#[test]
fn similarity_transform_projects() -> Result<(), ImgprocError> {
    init_logger();
    let t: Transform = SimilarityTransform::from_correspondences(
        &points(&[(0.0, 0.0), (10.0, 0.0)]),
        &points(&[(5.0, 5.0), (15.0, 5.0)]),
    )?
    .into();

    let p = t.project((5.0, 0.0))?;
    assert!((p - Point2d::new(10.0, 5.0)).length() < 1e-9);

    let batch = t.project_points(&points(&[(0.0, 0.0), (5.0, 5.0)]))?;
    assert_eq!(batch.len(), 2);
    assert!((batch[1] - Point2d::new(10.0, 10.0)).length() < 1e-9);
    Ok(())
}

#[test]
fn affine_transform_projects() -> Result<(), ImgprocError> {
    init_logger();
    let src = points(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
    let dst = points(&[(1.0, 1.0), (11.0, 2.0), (2.0, 11.0)]);
    let t = Transform::from(AffineTransform::from_correspondences(&src, &dst)?);

    let projected = t.project_points(&src)?;
    for (p, d) in projected.iter().zip(dst.iter()) {
        assert!((*p - *d).length() < 1e-9);
    }
    let p = t.project((5.0, 5.0))?;
    assert!((p - Point2d::new(6.5, 6.5)).length() < 1e-9);
    Ok(())
}

#[test]
fn projective_transform_projects() -> Result<(), ImgprocError> {
    init_logger();
    let src = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let dst = points(&[(1.0, 1.0), (9.0, 2.0), (8.0, 8.0), (2.0, 9.0)]);
    let t = Transform::from(ProjectiveTransform::from_correspondences(&src, &dst)?);

    for (p, d) in t.project_points(&src)?.iter().zip(dst.iter()) {
        assert!((*p - *d).length() < 1e-9);
    }
    assert_eq!(t.project_points(&points(&[(2.0, 2.0), (8.0, 8.0)]))?.len(), 2);

    // projecting back through the inverse recovers the input
    let inverse = t.inverse()?;
    let q = inverse.project(t.project((5.0, 5.0))?)?;
    assert!((q - Point2d::new(5.0, 5.0)).length() < 1e-9);
    Ok(())
}

#[test]
fn rank_deficient_correspondences() {
    init_logger();
    let cases = [
        (
            TransformFamily::Similarity,
            points(&[(0.0, 0.0), (0.0, 0.0)]),
            points(&[(1.0, 1.0), (1.0, 1.0)]),
        ),
        (
            TransformFamily::Affine,
            points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]),
            points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]),
        ),
        (
            TransformFamily::Projective,
            points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]),
            points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]),
        ),
    ];

    for (family, src, dst) in cases {
        let err = match warpkit_geometry::estimate_transform(family, &src, &dst) {
            Err(e) => e,
            Ok(t) => panic!("{family} fit should fail, got {t:?}"),
        };
        assert_eq!(err.kind(), ErrorKind::RankDeficient);
        let msg = err.to_string();
        assert!(msg.contains("rank deficient"), "{msg}");
        assert!(msg.contains(family.name()), "{msg}");
    }
}

#[test]
fn transform_with_warp() -> Result<(), ImgprocError> {
    init_logger();
    let img = DynamicImage::new(
        ImageSize {
            width: 10,
            height: 10,
        },
        PixelFormat::Gray,
    )?;
    let square = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    let sim = Transform::from(SimilarityTransform::from_correspondences(
        &points(&[(2.0, 2.0), (8.0, 2.0)]),
        &points(&[(3.0, 3.0), (7.0, 3.0)]),
    )?);
    let aff = Transform::from(AffineTransform::from_correspondences(
        &square[..3],
        &points(&[(1.0, 1.0), (9.0, 1.0), (9.0, 9.0)]),
    )?);
    let proj = Transform::from(ProjectiveTransform::from_correspondences(
        &square,
        &points(&[(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0)]),
    )?);

    for t in [sim, aff, proj] {
        let warped = img.warp(&t, &WarpOptions::default())?;
        assert_eq!(warped.size(), img.size());
    }

    let size = ImageSize {
        width: 20,
        height: 20,
    };
    let warped = img.warp(&sim, &WarpOptions::default().with_size(size))?;
    assert_eq!(warped.size(), size);

    let options = WarpOptions::default().with_interpolation(InterpolationMode::Bicubic);
    let warped = img.warp(&sim, &options)?;
    assert_eq!(warped.format(), PixelFormat::Gray);
    Ok(())
}

#[test]
fn rotate_with_border() -> Result<(), ImgprocError> {
    init_logger();
    let img = white_rgb()?;
    let black = Some(Color::Rgb([0, 0, 0]));
    let white = Some(Color::Rgb([255, 255, 255]));

    let rotated = img.rotate(FRAC_PI_4, &RotateOptions::default())?;
    assert!(rotated.rows() > 10);
    assert!(rotated.cols() > 10);
    assert_eq!(rotated.pixel(0, 0), black);

    let zero = RotateOptions::default().with_border(BorderMode::Zero);
    assert_eq!(img.rotate(FRAC_PI_4, &zero)?.pixel(0, 0), black);

    let replicate = RotateOptions::default()
        .with_interpolation(InterpolationMode::Nearest)
        .with_border(BorderMode::Replicate);
    assert_eq!(img.rotate(FRAC_PI_4, &replicate)?.pixel(0, 0), white);

    // the center of the canvas is covered by the source
    let center = (rotated.rows() / 2, rotated.cols() / 2);
    assert_eq!(rotated.pixel(center.0, center.1), white);
    Ok(())
}

#[test]
fn extract_with_border() -> Result<(), ImgprocError> {
    init_logger();
    let img = white_rgb()?;
    let rect = Rectangle::new(-5, -5, 5, 5);

    let default = img.extract(&rect, BorderMode::default())?;
    assert_eq!(default.pixel(0, 0), Some(Color::Rgb([0, 0, 0])));

    for border in [BorderMode::Mirror, BorderMode::Replicate] {
        let extracted = img.extract(&rect, border)?;
        assert_eq!(extracted.pixel(0, 0), Some(Color::Rgb([255, 255, 255])));
    }
    Ok(())
}

#[test]
fn rotate_angle_validation() -> Result<(), ImgprocError> {
    init_logger();
    let img = white_rgb()?;
    for angle in [f64::NAN, f64::INFINITY, 1e39] {
        let err = match img.rotate(angle, &RotateOptions::default()) {
            Err(e) => e,
            Ok(_) => panic!("angle {angle} should be rejected"),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("Angle must be a finite number"));
    }
    Ok(())
}
