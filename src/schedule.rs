//! Cron expression validation for recurring tasks.
//!
//! Accepts five fields (minute, hour, day of month, month, day of week) or six
//! with a leading seconds field, plus the `@daily`-style nicknames and the
//! `L`, `W`, `#` and `?` modifiers. Parsing is delegated to `croner`.

use croner::Cron;

/// True if `expr` is a well-formed cron schedule
pub fn is_valid_schedule(expr: &str) -> bool {
    let expr = expr.trim();
    if expr.is_empty() {
        return false;
    }

    match Cron::new(expr).with_seconds_optional().parse() {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!("Rejected cron expression '{}': {}", expr, e);
            false
        }
    }
}
