use crate::error::{Result, SchedulerError};
use crate::task::Ticks;

/// Unit for task delays and periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Raw scheduler ticks, whatever the timestamp source counts.
    Ticks,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    /// Parse TimeUnit from string representation.
    /// Only accepts full lowercase enum names: "ticks", "milliseconds", "seconds", "minutes", "hours", "days"
    /// For shorthand notations like "5s", "10m", use `parse_duration` instead.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ticks" => Ok(TimeUnit::Ticks),
            "milliseconds" => Ok(TimeUnit::Milliseconds),
            "seconds" => Ok(TimeUnit::Seconds),
            "minutes" => Ok(TimeUnit::Minutes),
            "hours" => Ok(TimeUnit::Hours),
            "days" => Ok(TimeUnit::Days),
            _ => Err(format!("Invalid time unit: {}", s)),
        }
    }
}

impl TimeUnit {
    /// Milliseconds per unit, or `None` for raw ticks.
    fn millis_per_unit(&self) -> Option<u64> {
        match self {
            TimeUnit::Ticks => None,
            TimeUnit::Milliseconds => Some(1),
            TimeUnit::Seconds => Some(1000),
            TimeUnit::Minutes => Some(60_000),
            TimeUnit::Hours => Some(3_600_000),
            TimeUnit::Days => Some(86_400_000),
        }
    }

    /// Convert `value` of this unit into scheduler ticks at `tick_hz`.
    ///
    /// Partial ticks round up, so a nonzero duration never becomes `0`
    /// (which would turn a periodic task into a one-shot). Returns `None`
    /// when the result does not fit in `Ticks`.
    pub fn to_ticks(&self, value: u64, tick_hz: u32) -> Option<Ticks> {
        let ticks = match self.millis_per_unit() {
            None => value,
            Some(per_unit) => value
                .checked_mul(per_unit)?
                .checked_mul(u64::from(tick_hz))?
                .div_ceil(1000),
        };
        Ticks::try_from(ticks).ok()
    }

    /// Parse a duration string like "5s", "10m", "2h", "500ms", "20t"
    /// Returns (value, TimeUnit) if successful
    ///
    /// Strict rules:
    /// - Only lowercase suffixes are accepted: "t", "ms", "s", "m", "h", "d"
    /// - Format must be: <number><suffix> (e.g., "5s", "100ms")
    /// - No spaces allowed between number and suffix
    pub fn parse_duration(s: &str) -> Option<(u64, TimeUnit)> {
        let s = s.trim();

        let split_pos = s.find(|c: char| !c.is_ascii_digit())?;
        if split_pos == 0 {
            return None;
        }

        let (num_str, unit_str) = s.split_at(split_pos);
        let value = num_str.parse::<u64>().ok()?;

        let time_unit = match unit_str {
            "t" => TimeUnit::Ticks,
            "ms" => TimeUnit::Milliseconds,
            "s" => TimeUnit::Seconds,
            "m" => TimeUnit::Minutes,
            "h" => TimeUnit::Hours,
            "d" => TimeUnit::Days,
            _ => return None,
        };

        Some((value, time_unit))
    }

    /// Resolve a delay or period string to ticks.
    ///
    /// Accepts shorthand (`"250ms"`), a bare number in `default_unit`, or
    /// `"blocked"` which maps to `Ticks::MAX` so the task starts suspended.
    pub fn parse_ticks(s: &str, default_unit: TimeUnit, tick_hz: u32) -> Result<Ticks> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("blocked") {
            return Ok(Ticks::MAX);
        }

        let (value, unit) = match Self::parse_duration(s) {
            Some(parsed) => parsed,
            None => {
                let value = s
                    .parse::<u64>()
                    .map_err(|_| SchedulerError::InvalidDuration(s.to_string()))?;
                (value, default_unit)
            }
        };

        unit.to_ticks(value, tick_hz)
            .ok_or_else(|| SchedulerError::InvalidDuration(s.to_string()))
    }
}
