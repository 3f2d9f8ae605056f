//! Tests for color scales and render configuration.

use renderer::config::RenderConfig;
use renderer::style::{parse_color, ColorScale, ColorStop};
use renderer::Color;

// ============================================================================
// ColorScale tests
// ============================================================================

#[test]
fn test_scale_from_unsorted_stops() {
    let stops = vec![
        ColorStop::new(100.0, "#00FF00"),
        ColorStop::new(0.0, "#FF0000"),
    ];
    let scale = ColorScale::from_stops(&stops).unwrap();

    assert_eq!(scale.low(), Color::rgb(255, 0, 0));
    assert_eq!(scale.high(), Color::rgb(0, 255, 0));
    assert_eq!(scale.color_at(0.5), Color::rgb(128, 128, 0));
}

#[test]
fn test_scale_requires_two_stops() {
    let stops = vec![ColorStop::new(0.0, "#FF0000")];
    assert!(ColorScale::from_stops(&stops).is_err());
}

#[test]
fn test_scale_rejects_zero_width() {
    let stops = vec![
        ColorStop::new(1.0, "#FF0000"),
        ColorStop::new(1.0, "#00FF00"),
    ];
    assert!(ColorScale::from_stops(&stops).is_err());
}

#[test]
fn test_scale_rejects_bad_color() {
    let stops = vec![
        ColorStop::new(0.0, "#FF0000"),
        ColorStop::new(1.0, "green"),
    ];
    assert!(ColorScale::from_stops(&stops).is_err());
}

#[test]
fn test_viridis_is_monotonic_in_green() {
    // Viridis brightens steadily; green rises across the whole scale.
    let scale = ColorScale::viridis();
    let mut last = 0u8;
    for i in 0..=10 {
        let g = scale.color_at(i as f32 / 10.0).g;
        assert!(g >= last, "green dropped at {}", i);
        last = g;
    }
}

#[test]
fn test_parse_color_trims_whitespace() {
    assert_eq!(parse_color(" #000000 ").unwrap(), Color::rgb(0, 0, 0));
}

// ============================================================================
// RenderConfig tests
// ============================================================================

#[test]
fn test_config_from_partial_json() {
    let json = r##"{"ticks": 7, "no_data_color": "#ffffff00"}"##;
    let config: RenderConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.ticks, 7);
    assert_eq!(config.target_width, 800);

    let palette = config.palette().unwrap();
    assert_eq!(palette.no_data, Color::new(255, 255, 255, 0));
}

#[test]
fn test_config_custom_stops() {
    let json = r##"{
        "color_stops": [
            {"value": 0, "color": "#000000"},
            {"value": 1, "color": "#ffffff"}
        ]
    }"##;
    let config: RenderConfig = serde_json::from_str(json).unwrap();
    let palette = config.palette().unwrap();

    assert_eq!(palette.scale.low(), Color::rgb(0, 0, 0));
    assert_eq!(palette.scale.high(), Color::rgb(255, 255, 255));
}

#[test]
fn test_config_rejects_gif_speed_out_of_range() {
    let config = RenderConfig {
        gif_speed: 0,
        ..Default::default()
    };
    assert!(config.palette().is_err());
}
