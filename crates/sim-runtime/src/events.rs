//! Sparse market event sampling over the horizon.

use rand::Rng;
use sim_core::{EventId, MarketEvent};

/// Chance that some event fires in `month`, rising linearly from 0.1 to 0.3.
pub fn event_probability(month: u32, total_months: u32) -> f64 {
    if total_months == 0 {
        return 0.0;
    }
    0.1 + (month as f64 / total_months as f64) * 0.2
}

/// Draw the events of one strategy simulation.
///
/// Every selected id gets one impact in `±impact_amplitude / 2` for the whole
/// call, then each month runs one trial and on success emits a uniformly
/// chosen event. The result is ordered by month.
pub fn sample_events<R: Rng + ?Sized>(
    rng: &mut R,
    selected: &[EventId],
    total_months: u32,
    impact_amplitude: f64,
) -> Vec<MarketEvent> {
    if selected.is_empty() {
        return Vec::new();
    }
    let pool: Vec<(&EventId, f64)> = selected
        .iter()
        .map(|id| (id, (rng.gen::<f64>() - 0.5) * impact_amplitude))
        .collect();

    let mut events = Vec::new();
    for month in 1..=total_months {
        if rng.gen::<f64>() < event_probability(month, total_months) {
            let (id, impact) = pool[rng.gen_range(0..pool.len())];
            events.push(MarketEvent {
                id: id.clone(),
                impact,
                month,
            });
        }
    }
    events
}
