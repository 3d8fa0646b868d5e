//! Metrics collection.
//!
//! # Metrics
//! - `gift_exchange_solves_total` (counter): solves by outcome (complete, incomplete)
//! - `gift_exchange_solve_phases` (histogram): augmenting phases per solve
//! - `gift_exchange_participants` (histogram): givers per solve
//! - `gift_exchange_notifications_failed_total` (counter)

/// Record one finished solve.
pub fn record_solve(outcome: &'static str, phases: usize, participants: usize) {
    ::metrics::counter!("gift_exchange_solves_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("gift_exchange_solve_phases").record(phases as f64);
    ::metrics::histogram!("gift_exchange_participants").record(participants as f64);
}

/// Record a notification batch that could not be delivered.
pub fn record_notification_failure() {
    ::metrics::counter!("gift_exchange_notifications_failed_total").increment(1);
}
