//! Stop tables of the named ramps, colors in `0..=255` units.

use super::ColorStop;

const fn stop(position: f32, r: f32, g: f32, b: f32) -> ColorStop {
    ColorStop {
        position,
        color: [r, g, b],
    }
}

/// Dark blue, blue, cyan, yellow, red, dark red.
pub(crate) static JET: [ColorStop; 6] = [
    stop(0.0, 0.0, 0.0, 127.5),
    stop(0.125, 0.0, 0.0, 255.0),
    stop(0.375, 0.0, 255.0, 255.0),
    stop(0.625, 255.0, 255.0, 0.0),
    stop(0.875, 255.0, 0.0, 0.0),
    stop(1.0, 127.5, 0.0, 0.0),
];

/// Black body: black, red, yellow, white.
pub(crate) static HEAT: [ColorStop; 4] = [
    stop(0.0, 0.0, 0.0, 0.0),
    stop(1.0 / 3.0, 255.0, 0.0, 0.0),
    stop(2.0 / 3.0, 255.0, 255.0, 0.0),
    stop(1.0, 255.0, 255.0, 255.0),
];

// sampled every tenth of Google's Turbo
pub(crate) static TURBO: [ColorStop; 11] = [
    stop(0.0, 48.0, 18.0, 59.0),
    stop(0.1, 73.5, 88.1, 221.0),
    stop(0.2, 46.8, 157.6, 244.7),
    stop(0.3, 39.2, 215.2, 195.1),
    stop(0.4, 77.6, 248.5, 130.6),
    stop(0.5, 150.1, 250.4, 79.9),
    stop(0.6, 223.5, 219.8, 49.9),
    stop(0.7, 255.0, 162.6, 34.7),
    stop(0.8, 244.4, 92.5, 23.1),
    stop(0.9, 183.8, 31.9, 7.9),
    stop(1.0, 122.0, 4.0, 3.0),
];

// matplotlib viridis at eighths
pub(crate) static VIRIDIS: [ColorStop; 9] = [
    stop(0.0, 68.0, 1.0, 84.0),
    stop(0.125, 71.0, 45.0, 123.0),
    stop(0.25, 59.0, 82.0, 139.0),
    stop(0.375, 44.0, 114.0, 142.0),
    stop(0.5, 33.0, 144.0, 140.0),
    stop(0.625, 39.0, 173.0, 129.0),
    stop(0.75, 93.0, 200.0, 99.0),
    stop(0.875, 170.0, 220.0, 50.0),
    stop(1.0, 253.0, 231.0, 37.0),
];
