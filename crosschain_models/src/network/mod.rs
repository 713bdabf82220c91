pub mod client_rate_limit;
pub mod http;

use std::{num::NonZeroU32, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitWindow {
    PerSecond(NonZeroU32),
    PerMinute(NonZeroU32),
    Custom { period: Duration },
}

impl RateLimitWindow {
    /// - `<n>s` → PerSecond(n)
    /// - `<n>m` → PerMinute(n)
    /// - `<n>h` → Custom { period = 3600s / n }, i.e. n requests per hour
    /// - `<n>d` → Custom { period = 86400s / n }, i.e. n requests per day
    pub fn from_string(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || !s.is_ascii() {
            return None;
        }

        let (num_str, unit) = s.split_at(s.len() - 1);
        let number: u32 = match num_str.parse() {
            Ok(n) if n > 0 => n,
            _ => return None,
        };
        let nonzero = NonZeroU32::new(number)?;

        match unit {
            "s" => Some(RateLimitWindow::PerSecond(nonzero)),
            "m" => Some(RateLimitWindow::PerMinute(nonzero)),
            "h" => Some(RateLimitWindow::Custom {
                period: Duration::from_secs(3600) / number,
            }),
            "d" => Some(RateLimitWindow::Custom {
                period: Duration::from_secs(86400) / number,
            }),
            _ => None,
        }
    }
}
