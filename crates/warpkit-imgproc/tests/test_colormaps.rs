use warpkit_image::{Image, ImageSize};
use warpkit_imgproc::{
    colormap::{apply_colormap, Colormap, ColormapKind},
    ImgprocError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn colormap_factories() {
    init_logger();
    let cases = [
        (Colormap::jet(), ColormapKind::Jet, "jet"),
        (Colormap::heat(), ColormapKind::Heat, "heat"),
        (Colormap::turbo(), ColormapKind::Turbo, "turbo"),
        (Colormap::viridis(), ColormapKind::Viridis, "viridis"),
    ];
    for (cmap, kind, name) in cases {
        assert_eq!(cmap.kind(), kind);
        assert_eq!(cmap.kind().name(), name);
        assert_eq!(cmap.min(), None);
        assert_eq!(cmap.max(), None);
    }
}

#[test]
fn colormap_params() {
    init_logger();
    let c = Colormap::jet().with_range(0.0, 255.0);
    assert_eq!(c.kind(), ColormapKind::Jet);
    assert_eq!(c.min(), Some(0.0));
    assert_eq!(c.max(), Some(255.0));

    let c = Colormap::heat().with_min(-1.0);
    assert_eq!(c.min(), Some(-1.0));
    assert_eq!(c.max(), None);
}

#[test]
fn apply_colormap_gradient() -> Result<(), ImgprocError> {
    init_logger();
    let size = ImageSize {
        width: 256,
        height: 1,
    };
    let img = Image::<u8, 1>::from_fn(size, |_, c| [c as u8])?;

    let colored = apply_colormap(&img, &Colormap::jet().with_range(0.0, 255.0))?;
    assert_eq!(colored.cols(), 256);
    assert_eq!(colored.rows(), 1);

    let [r, g, b] = colored.pixel(0, 0).unwrap_or_default();
    assert_eq!((r, g), (0, 0));
    assert!(b.abs_diff(128) <= 1);

    let [_, g, _] = colored.pixel(0, 128).unwrap_or_default();
    assert!(g > 200);

    let [r, g, b] = colored.pixel(0, 255).unwrap_or_default();
    assert!(r.abs_diff(128) <= 1);
    assert_eq!((g, b), (0, 0));
    Ok(())
}

#[test]
fn apply_colormap_auto_range() -> Result<(), ImgprocError> {
    init_logger();
    let img = Image::<u8, 1>::new(
        ImageSize {
            width: 2,
            height: 1,
        },
        vec![10, 20],
    )?;
    let colored = apply_colormap(&img, &Colormap::jet())?;

    let [_, _, b] = colored.pixel(0, 0).unwrap_or_default();
    let [r, _, _] = colored.pixel(0, 1).unwrap_or_default();
    assert!(b > 100);
    assert!(r > 100);
    Ok(())
}

#[test]
fn named_ramps_run_from_start_to_end() -> Result<(), ImgprocError> {
    init_logger();
    let img = Image::<f32, 1>::new(
        ImageSize {
            width: 3,
            height: 1,
        },
        vec![-4.0, 0.0, 4.0],
    )?;
    for kind in [
        ColormapKind::Jet,
        ColormapKind::Heat,
        ColormapKind::Turbo,
        ColormapKind::Viridis,
    ] {
        let ramp = kind.ramp();
        let colored = apply_colormap(&img, &Colormap::new(kind))?;
        assert_eq!(colored.pixel(0, 0), Some(ramp.color_at(0.0)), "{kind}");
        assert_eq!(colored.pixel(0, 1), Some(ramp.color_at(0.5)), "{kind}");
        assert_eq!(colored.pixel(0, 2), Some(ramp.color_at(1.0)), "{kind}");
    }
    Ok(())
}
