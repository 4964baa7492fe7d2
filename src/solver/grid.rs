use crate::config::SolverConfig;
use crate::types::TimeOfDay;

/// One atomic slot of the weekly grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Index into the configured week-day labels
    pub day: usize,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// The expanded weekly grid: atomic slots indexed 0..N-1 across all days.
///
/// Slots within a day are contiguous from day start until the last slot
/// whose end fits before day end.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    slots: Vec<Slot>,
    week_days: Vec<String>,
}

impl TimeGrid {
    pub fn build(config: &SolverConfig) -> Self {
        let mut slots = Vec::new();
        if config.slot_minutes > 0 {
            for (day, _) in config.week_days.iter().enumerate() {
                let mut cursor = config.day_start;
                while let Some(end) = cursor.add_minutes(config.slot_minutes) {
                    if end > config.day_end {
                        break;
                    }
                    slots.push(Slot { day, start: cursor, end });
                    cursor = end;
                }
            }
        }
        Self {
            slots,
            week_days: config.week_days.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn day_label(&self, day: usize) -> &str {
        &self.week_days[day]
    }

    /// Day label of the slot at `index`
    pub fn slot_day_label(&self, index: usize) -> &str {
        self.day_label(self.slots[index].day)
    }

    /// End time of `span` contiguous slots starting at `start`, if they stay
    /// within one day and are time-adjacent
    pub fn span_end(&self, start: usize, span: usize) -> Option<TimeOfDay> {
        let first = self.slots.get(start)?;
        let mut current_end = first.end;
        for offset in 1..span {
            let next = self.slots.get(start + offset)?;
            if next.day != first.day || next.start != current_end {
                return None;
            }
            current_end = next.end;
        }
        Some(current_end)
    }
}
