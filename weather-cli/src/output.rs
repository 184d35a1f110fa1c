//! Plain-text rendering of service results.

use weather_core::{CurrentReport, DailyPoint, TimeNormalizer, WeatherPoint};

pub fn print_current(report: &CurrentReport) {
    println!("{} ({:.2}, {:.2})", report.city, report.lat, report.lon);
    println!("  {:.1} °C, {}", report.temperature, report.description);
    println!("  humidity {}%, wind {:.1} m/s", report.humidity, report.wind_speed);
    println!("  UTC offset {:+} h", f64::from(report.timezone) / 3600.0);
}

pub fn print_outlook(outlook: &[DailyPoint]) {
    for day in outlook {
        println!("{}  {:>6.1} °C  {}", day.date, day.temperature, day.description);
    }
}

pub fn print_points(normalizer: &TimeNormalizer, points: &[WeatherPoint]) {
    for point in points {
        println!(
            "{}  {:>6.1} °C  {}",
            normalizer.format(&point.timestamp),
            point.temperature,
            point.description
        );
    }
}
