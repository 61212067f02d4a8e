use plot_core::data_types::hex_color::{parse_hex_str, to_hex_string};
use plot_core::data_types::{AxisFormat, Color, PlotConfig, TimeUnit};
use plot_core::scales::{format_tick, Graduation, LinearGraduation};
use plot_core::utils::date_formatter::{determine_date_format, format_timestamp, SmartDateFormat};

#[test]
fn test_config_defaults_fill_missing_fields() {
    let config = PlotConfig::from_json_str(r##"{ "curve": { "color": "#ff0000" } }"##).unwrap();
    assert_eq!(config.curve.color, Color::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(config.curve.line_width, 2.0);
    assert_eq!(config.min_ticks, 4);
    assert_eq!(config.x_format, AxisFormat::Numeric);
}

#[test]
fn test_config_tick_counts_are_clamped() {
    let config = PlotConfig::from_json_str(r#"{ "min_ticks": 0, "max_ticks": 0 }"#).unwrap();
    assert_eq!(config.min_ticks, 1);
    assert_eq!(config.max_ticks, 1);

    let config = PlotConfig::from_json_str(r#"{ "min_ticks": 8, "max_ticks": 3 }"#).unwrap();
    assert_eq!(config.max_ticks, 8);
}

#[test]
fn test_config_time_axis() {
    let config = PlotConfig::from_json_str(r#"{ "x_format": { "Time": "Milliseconds" } }"#).unwrap();
    assert_eq!(config.x_format, AxisFormat::Time(TimeUnit::Milliseconds));
}

#[test]
fn test_config_errors() {
    assert!(PlotConfig::from_json_str("{ not json").is_err());
    assert!(PlotConfig::from_json_str(r##"{ "curve": { "color": "#zz0000" } }"##).is_err());
    assert!(PlotConfig::load("/nonexistent/plot.json").is_err());
}

#[test]
fn test_config_serialises() {
    let json = PlotConfig::default().to_json_string().unwrap();
    assert!(json.contains("\"min_ticks\": 4"));
    assert!(json.contains("\"color\": \"#0000ff\""));
    let parsed = PlotConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed.max_ticks, 10);
}

#[test]
fn test_hex_colors() {
    assert_eq!(parse_hex_str("#00ff00").unwrap(), Color::new(0.0, 1.0, 0.0, 1.0));
    assert_eq!(parse_hex_str("ffffff00").unwrap().a, 0.0);
    assert!(parse_hex_str("#12345").is_err());
    assert!(parse_hex_str("#gg0000").is_err());

    assert_eq!(to_hex_string(Color::BLUE), "#0000ff");
    assert_eq!(to_hex_string(Color::BLACK.with_alpha(0.0)), "#00000000");
}

#[test]
fn test_linear_graduation() {
    let ticks = LinearGraduation.graduate(0.0, 100.0, 4, 10);
    let majors: Vec<f64> = (0..=10).map(|i| i as f64 * 10.0).collect();
    assert_eq!(ticks.majors, majors);
    assert_eq!(ticks.mediums.len(), 10);
    assert_eq!(ticks.mediums[0], 5.0);
    assert_eq!(ticks.minors.len(), 80);
}

#[test]
fn test_graduation_respects_min_ticks() {
    let ticks = LinearGraduation.graduate(0.0, 1.0, 5, 6);
    assert!(ticks.majors.len() >= 5, "{:?}", ticks.majors);
    assert!(ticks.majors.iter().all(|&v| v > -1e-9 && v < 1.0 + 1e-9));
}

#[test]
fn test_graduation_of_degenerate_intervals() {
    assert!(LinearGraduation.graduate(5.0, 5.0, 4, 10).is_empty());
    assert!(LinearGraduation.graduate(10.0, 0.0, 4, 10).is_empty());
    assert!(LinearGraduation.graduate(f64::NAN, 1.0, 4, 10).is_empty());
    // Finite bounds whose width overflows.
    assert!(LinearGraduation.graduate(-1e308, 1e308, 4, 10).is_empty());
}

#[test]
fn test_format_tick() {
    assert_eq!(format_tick(12.5, 100.0, &AxisFormat::Numeric), "12.50");
    assert_eq!(format_tick(2500.0, 100.0, &AxisFormat::Numeric), "2500");
    assert_eq!(format_tick(0.0005, 0.01, &AxisFormat::Numeric), "0.0005");
    assert_eq!(format_tick(0.0, 100.0, &AxisFormat::Numeric), "0.00");

    let three_years = 3.0 * 365.0 * 86_400.0;
    assert_eq!(
        format_tick(0.0, three_years, &AxisFormat::Time(TimeUnit::Seconds)),
        "1970"
    );
    assert_eq!(
        format_tick(3_600_000.0, 600_000.0, &AxisFormat::Time(TimeUnit::Milliseconds)),
        "01:00"
    );
}

#[test]
fn test_date_format_thresholds() {
    assert_eq!(determine_date_format(3.0 * 365.0 * 86_400.0), SmartDateFormat::Year);
    assert_eq!(determine_date_format(90.0 * 86_400.0), SmartDateFormat::MonthYear);
    assert_eq!(determine_date_format(3.0 * 86_400.0), SmartDateFormat::DayMonth);
    assert_eq!(determine_date_format(3600.0), SmartDateFormat::HourMin);
    assert_eq!(determine_date_format(60.0), SmartDateFormat::HourMinSec);
    assert_eq!(determine_date_format(1.0), SmartDateFormat::SecMillis);

    assert_eq!(
        format_timestamp(1.25, SmartDateFormat::SecMillis, TimeUnit::Seconds),
        "01.250"
    );
    assert_eq!(
        format_timestamp(f64::INFINITY, SmartDateFormat::Year, TimeUnit::Seconds),
        "inf"
    );
}
