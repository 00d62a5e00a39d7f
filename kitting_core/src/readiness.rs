//! # Curing Readiness
//!
//! A display curve for how far a pour has progressed toward stripping, and
//! the lifecycle timeline shown alongside the kitting estimate. The curve is
//! a simple quadratic ramp to 100 % on day 7; it is not a strength model.

use serde::{Deserialize, Serialize};

/// Day on which a pour counts as fully ready.
pub const CURING_TARGET_DAYS: u32 = 7;

/// Readiness percentage after `days_since_pour` days.
///
/// `day² / 7² * 100` before the target day, 100 from the target day on.
pub fn readiness_percent(days_since_pour: u32) -> f64 {
    if days_since_pour >= CURING_TARGET_DAYS {
        return 100.0;
    }
    let day = days_since_pour as f64;
    let target = CURING_TARGET_DAYS as f64;
    day * day / (target * target) * 100.0
}

/// Status of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessStatus {
    Curing,
    Ready,
}

impl ReadinessStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReadinessStatus::Curing => "CURING...",
            ReadinessStatus::Ready => "READY FOR SHIFT / ACTIVE",
        }
    }
}

/// A lifecycle event on the curing timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub day: u32,
    pub title: String,
    pub description: String,
}

impl TimelineEvent {
    pub fn new(day: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        TimelineEvent {
            day,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A timeline event with its readiness evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub event: TimelineEvent,
    pub readiness_percent: f64,
    pub status: ReadinessStatus,
    /// True for the day material can be shifted to the next level
    pub actionable: bool,
}

impl TimelineEntry {
    /// One-line rendering, e.g. `DAY 07  Material Shift Actionable  > [100.0% STR] - READY FOR SHIFT / ACTIVE`
    pub fn render(&self) -> String {
        format!(
            "DAY {:02}  {:<28} > [{:.1}% STR] - {}{}",
            self.event.day,
            self.event.title,
            self.readiness_percent,
            self.status.label(),
            if self.actionable { "  <<" } else { "" }
        )
    }
}

/// The standard pour-to-redeploy lifecycle.
pub fn standard_events() -> Vec<TimelineEvent> {
    vec![
        TimelineEvent::new(1, "Level 1 Pour Executed", "Initiating curing sequence."),
        TimelineEvent::new(3, "Initial Set Verified", "Non-structural stripping."),
        TimelineEvent::new(5, "Pre-curing Phase", "Maintaining moisture levels."),
        TimelineEvent::new(7, "Material Shift Actionable", "Target strength achieved."),
        TimelineEvent::new(8, "Deployed to Level 2", "Active in-situ."),
    ]
}

/// Evaluate readiness for each event.
pub fn build_timeline(events: &[TimelineEvent]) -> Vec<TimelineEntry> {
    events
        .iter()
        .map(|event| {
            let readiness = readiness_percent(event.day);
            TimelineEntry {
                event: event.clone(),
                readiness_percent: readiness,
                status: if readiness >= 100.0 {
                    ReadinessStatus::Ready
                } else {
                    ReadinessStatus::Curing
                },
                actionable: event.day == CURING_TARGET_DAYS,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_curve() {
        assert_eq!(readiness_percent(0), 0.0);
        assert!((readiness_percent(1) - 2.0408).abs() < 1e-3);
        assert!((readiness_percent(5) - 51.0204).abs() < 1e-3);
        assert_eq!(readiness_percent(7), 100.0);
        assert_eq!(readiness_percent(30), 100.0);
    }

    #[test]
    fn test_readiness_is_monotonic() {
        let values: Vec<f64> = (0..10).map(readiness_percent).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_standard_timeline() {
        let timeline = build_timeline(&standard_events());
        assert_eq!(timeline.len(), 5);

        let statuses: Vec<_> = timeline.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                ReadinessStatus::Curing,
                ReadinessStatus::Curing,
                ReadinessStatus::Curing,
                ReadinessStatus::Ready,
                ReadinessStatus::Ready,
            ]
        );

        let actionable: Vec<u32> = timeline
            .iter()
            .filter(|e| e.actionable)
            .map(|e| e.event.day)
            .collect();
        assert_eq!(actionable, vec![7]);
    }

    #[test]
    fn test_render() {
        let timeline = build_timeline(&standard_events());
        let line = timeline[0].render();
        assert!(line.starts_with("DAY 01"));
        assert!(line.contains("[2.0% STR] - CURING..."));
        assert!(timeline[3].render().ends_with("READY FOR SHIFT / ACTIVE  <<"));
    }
}
