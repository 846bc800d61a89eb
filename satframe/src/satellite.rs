//! Satellite variants and their timestamp/URL conventions.
//!
//! Each supported satellite publishes full-disk imagery on its own
//! cadence and under its own URL layout:
//!
//! - GOES-16 (East) and GOES-18 (West) publish every 10 minutes, keyed by
//!   `YYYYDDDHHMM` with the day of year.
//! - Elektro-L publishes every 30 minutes, keyed by `YYYYMMDD-HHMM`.
//!
//! All per-variant behavior lives here so call sites dispatch through one
//! `match` instead of repeating the branching.

use crate::cache::Timestamp;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// A supported geostationary imagery source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Satellite {
    /// GOES-16, full-disk GEOCOLOR
    GoesEast,
    /// GOES-18, full-disk GEOCOLOR
    GoesWest,
    /// Elektro-L No.2
    ElektroL,
}

impl Satellite {
    /// Human-readable variant name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Satellite::GoesEast => "GOES-East",
            Satellite::GoesWest => "GOES-West",
            Satellite::ElektroL => "Elektro-L",
        }
    }

    /// Path segment selecting the upstream resize pipeline.
    pub fn resize_segment(&self) -> &'static str {
        match self {
            Satellite::GoesEast | Satellite::GoesWest => "GOES/",
            Satellite::ElektroL => "ElektroL/",
        }
    }

    /// Base path distinguishing satellite feeds; empty for Elektro-L,
    /// whose keys sit directly under the resize segment.
    pub fn base_path(&self) -> &'static str {
        match self {
            Satellite::GoesEast => "GOES16/ABI/FD/GEOCOLOR/",
            Satellite::GoesWest => "GOES18/ABI/FD/GEOCOLOR/",
            Satellite::ElektroL => "",
        }
    }

    /// Filename suffix appended after the timestamp key.
    pub fn suffix(&self) -> &'static str {
        match self {
            Satellite::GoesEast => "_GOES16-ABI-FD-GEOCOLOR-1808x1808.jpg",
            Satellite::GoesWest => "_GOES18-ABI-FD-GEOCOLOR-1808x1808.jpg",
            Satellite::ElektroL => ".jpg",
        }
    }

    /// Native publication interval in minutes.
    pub fn interval_minutes(&self) -> u32 {
        match self {
            Satellite::GoesEast | Satellite::GoesWest => 10,
            Satellite::ElektroL => 30,
        }
    }

    /// Number of frames covering a 24 hour replay window.
    pub fn replay_count(&self) -> usize {
        match self {
            Satellite::GoesEast | Satellite::GoesWest => 72,
            Satellite::ElektroL => 48,
        }
    }

    /// Floor `t` to the variant's publication interval, dropping seconds.
    pub fn quantize(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let floored = t.minute() - t.minute() % self.interval_minutes();
        t.with_minute(floored)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(t)
    }

    /// Format the timestamp key for the frame covering `t`.
    ///
    /// Quantizes first, so any time within an interval maps to the same
    /// key.
    pub fn format_key(&self, t: DateTime<Utc>) -> Timestamp {
        let t = self.quantize(t);
        let key = match self {
            Satellite::GoesEast | Satellite::GoesWest => format!(
                "{}{:03}{:02}{:02}",
                t.year(),
                t.ordinal(),
                t.hour(),
                t.minute()
            ),
            Satellite::ElektroL => format!(
                "{:04}{:02}{:02}-{:02}{:02}",
                t.year(),
                t.month(),
                t.day(),
                t.hour(),
                t.minute()
            ),
        };
        Timestamp::new(key)
    }

    /// Build the full image URL for `key`.
    ///
    /// The transform directive resizes to the display dimensions at the
    /// given JPEG quality before the image leaves the CDN, keeping the
    /// payload small enough for the flash cache.
    pub fn image_url(
        &self,
        endpoint: &str,
        key: &Timestamp,
        width: u32,
        height: u32,
        quality: u8,
    ) -> String {
        format!(
            "{}{}tr:w-{},h-{},q-{}/{}{}{}",
            endpoint,
            self.resize_segment(),
            width,
            height,
            quality,
            self.base_path(),
            key,
            self.suffix()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 17).unwrap()
    }

    #[test]
    fn test_elektro_key_floors_to_half_hour() {
        let key = Satellite::ElektroL.format_key(at(2025, 1, 9, 6, 47));
        assert_eq!(key.as_str(), "20250109-0630");
    }

    #[test]
    fn test_elektro_key_on_the_hour() {
        let key = Satellite::ElektroL.format_key(at(2025, 1, 9, 6, 12));
        assert_eq!(key.as_str(), "20250109-0600");
    }

    #[test]
    fn test_goes_key_uses_day_of_year() {
        // January 9 is ordinal day 9.
        let key = Satellite::GoesEast.format_key(at(2025, 1, 9, 6, 37));
        assert_eq!(key.as_str(), "20250090630");
    }

    #[test]
    fn test_goes_key_late_in_year() {
        // December 31 of a non-leap year is ordinal day 365.
        let key = Satellite::GoesWest.format_key(at(2025, 12, 31, 23, 59));
        assert_eq!(key.as_str(), "20253652350");
    }

    #[test]
    fn test_quantize_preserves_aligned_times() {
        let aligned = Utc.with_ymd_and_hms(2025, 1, 9, 6, 30, 0).unwrap();
        assert_eq!(Satellite::ElektroL.quantize(aligned), aligned);
    }

    #[test]
    fn test_quantize_drops_seconds() {
        let t = Utc.with_ymd_and_hms(2025, 1, 9, 6, 30, 45).unwrap();
        let q = Satellite::GoesEast.quantize(t);
        assert_eq!(q.minute(), 30);
        assert_eq!(q.second(), 0);
    }

    #[test]
    fn test_intervals_and_replay_counts() {
        assert_eq!(Satellite::GoesEast.interval_minutes(), 10);
        assert_eq!(Satellite::GoesWest.interval_minutes(), 10);
        assert_eq!(Satellite::ElektroL.interval_minutes(), 30);

        assert_eq!(Satellite::GoesEast.replay_count(), 72);
        assert_eq!(Satellite::ElektroL.replay_count(), 48);
    }

    #[test]
    fn test_elektro_url_layout() {
        let key = Timestamp::new("20250109-0630");
        let url =
            Satellite::ElektroL.image_url("https://ik.imagekit.io/sat/", &key, 240, 240, 75);

        assert_eq!(
            url,
            "https://ik.imagekit.io/sat/ElektroL/tr:w-240,h-240,q-75/20250109-0630.jpg"
        );
    }

    #[test]
    fn test_goes_east_url_layout() {
        let key = Timestamp::new("20250090630");
        let url =
            Satellite::GoesEast.image_url("https://ik.imagekit.io/sat/", &key, 240, 240, 75);

        assert_eq!(
            url,
            "https://ik.imagekit.io/sat/GOES/tr:w-240,h-240,q-75/GOES16/ABI/FD/GEOCOLOR/20250090630_GOES16-ABI-FD-GEOCOLOR-1808x1808.jpg"
        );
    }

    #[test]
    fn test_goes_west_url_names_goes18() {
        let key = Timestamp::new("20250090630");
        let url = Satellite::GoesWest.image_url("https://e/", &key, 480, 480, 90);

        assert!(url.contains("GOES18/ABI/FD/GEOCOLOR/"));
        assert!(url.contains("tr:w-480,h-480,q-90/"));
        assert!(url.ends_with("_GOES18-ABI-FD-GEOCOLOR-1808x1808.jpg"));
    }
}
