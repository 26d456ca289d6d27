//! Colour predicates over single RGB samples.
//!
//! The thresholds are calibrated against the widget's rendering. The strict
//! "very"/"pure" variants are used where a transitional or anti-aliased pixel
//! must not count (the final result check). The loose variants are used for
//! presence and zone detection.

use image::Rgb;

#[inline]
fn channels(rgb: Rgb<u8>) -> (i32, i32, i32) {
    let [r, g, b] = rgb.0;
    (r as i32, g as i32, b as i32)
}

/// Red lower border of the widget.
pub fn is_colour_red(rgb: Rgb<u8>) -> bool {
    let (r, g, b) = channels(rgb);
    r >= 145 && g <= 35 && b <= 35
}

/// Fully rendered red result.
pub fn is_very_red(rgb: Rgb<u8>) -> bool {
    let (r, g, b) = channels(rgb);
    r >= 225 && g <= 15 && b <= 15
}

/// Anything where red clearly dominates green.
pub fn is_mostly_red(rgb: Rgb<u8>) -> bool {
    let (r, g, _) = channels(rgb);
    r - g >= 15
}

/// Green result.
pub fn is_colour_green(rgb: Rgb<u8>) -> bool {
    let (r, g, b) = channels(rgb);
    r < 50 && g > 200 && b < 50
}

pub fn is_quite_green(rgb: Rgb<u8>) -> bool {
    let (r, g, _) = channels(rgb);
    g > 200 && g - r > 50
}

/// Green channel saturated. Only the target zone and the bar reach it.
pub fn has_pure_green(rgb: Rgb<u8>) -> bool {
    rgb.0[1] == 255
}

pub fn is_dark(rgb: Rgb<u8>) -> bool {
    let (r, g, b) = channels(rgb);
    r.max(g).max(b) < 50
}

pub fn is_quite_dark(rgb: Rgb<u8>) -> bool {
    let (r, g, b) = channels(rgb);
    r + g + b < 270
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> Rgb<u8> {
        Rgb([r, g, b])
    }

    #[test]
    fn test_is_colour_red_boundaries() {
        assert!(is_colour_red(rgb(145, 35, 35)));
        assert!(!is_colour_red(rgb(144, 35, 35)));
        assert!(!is_colour_red(rgb(145, 36, 35)));
        assert!(!is_colour_red(rgb(145, 35, 36)));
        assert!(is_colour_red(rgb(255, 0, 0)));
    }

    #[test]
    fn test_is_very_red_boundaries() {
        assert!(is_very_red(rgb(225, 15, 15)));
        assert!(!is_very_red(rgb(224, 15, 15)));
        assert!(!is_very_red(rgb(225, 16, 15)));
        assert!(!is_very_red(rgb(225, 15, 16)));
        // Loose red that is not very red
        assert!(is_colour_red(rgb(200, 30, 30)));
        assert!(!is_very_red(rgb(200, 30, 30)));
    }

    #[test]
    fn test_is_mostly_red_boundaries() {
        assert!(is_mostly_red(rgb(115, 100, 255)));
        assert!(!is_mostly_red(rgb(114, 100, 0)));
        // Green above red must not underflow
        assert!(!is_mostly_red(rgb(0, 255, 0)));
    }

    #[test]
    fn test_is_colour_green_boundaries() {
        assert!(is_colour_green(rgb(49, 201, 49)));
        assert!(!is_colour_green(rgb(50, 201, 49)));
        assert!(!is_colour_green(rgb(49, 200, 49)));
        assert!(!is_colour_green(rgb(49, 201, 50)));
    }

    #[test]
    fn test_is_quite_green_boundaries() {
        assert!(is_quite_green(rgb(150, 201, 255)));
        assert!(!is_quite_green(rgb(151, 201, 0)));
        assert!(!is_quite_green(rgb(0, 200, 0)));
    }

    #[test]
    fn test_has_pure_green() {
        assert!(has_pure_green(rgb(255, 255, 255)));
        assert!(has_pure_green(rgb(0, 255, 0)));
        assert!(!has_pure_green(rgb(0, 254, 0)));
    }

    #[test]
    fn test_is_dark_boundaries() {
        assert!(is_dark(rgb(49, 49, 49)));
        assert!(!is_dark(rgb(50, 0, 0)));
        assert!(!is_dark(rgb(0, 50, 0)));
        assert!(!is_dark(rgb(0, 0, 50)));
    }

    #[test]
    fn test_is_quite_dark_boundaries() {
        assert!(is_quite_dark(rgb(89, 90, 90)));
        assert!(!is_quite_dark(rgb(90, 90, 90)));
        // Sum must not wrap around in u8
        assert!(!is_quite_dark(rgb(255, 255, 255)));
    }
}
