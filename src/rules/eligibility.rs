//! Roster eligibility rules.
//!
//! A formative action must represent at least 18 aggregate formation-hours
//! of value: short formations need proportionally more students. Students
//! enrolled at the last confirmed save ("originals") are protected - later
//! edits may grow the roster but never shrink it below them.

use std::collections::BTreeSet;

/// Aggregate formation-hours an action must represent.
const AGGREGATE_HOURS_FLOOR: f64 = 18.0;

/// Minimum roster size for a formation of `total_hours`.
///
/// One student suffices at or above the 18-hour floor; below it the roster
/// must multiply the duration up to the floor: `ceil(18 / total_hours)`.
pub fn minimum_students_required(total_hours: f64) -> usize {
    if total_hours >= AGGREGATE_HOURS_FLOOR {
        return 1;
    }
    if total_hours <= 0.0 {
        return usize::MAX;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let required = (AGGREGATE_HOURS_FLOOR / total_hours).ceil() as usize;
    required
}

/// Whether a roster of `selected_count` meets the minimum for the formation.
pub fn can_proceed(selected_count: usize, total_hours: f64) -> bool {
    selected_count >= minimum_students_required(total_hours)
}

/// Minimum formation-hours acceptable for a roster of `student_count`,
/// per the tiered policy used when trimming custom formations.
fn minimum_hours_for_roster(student_count: usize) -> f64 {
    match student_count {
        0..=5 => 8.0,
        6..=10 => 12.0,
        11..=15 => 16.0,
        16..=20 => 20.0,
        _ => 24.0,
    }
}

/// Advisory data for a rejected course removal.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationShortfall {
    /// Hours the formation would have after the removal
    pub remaining_hours: f64,
    /// Hours the policy requires
    pub required_hours: f64,
    /// How many students would have to be removed for the reduced duration
    /// to satisfy the tiered roster floor (advisory, never applied)
    pub students_to_remove: usize,
}

/// Checks whether removing a course from a custom formation is allowed.
///
/// `remaining_hours` is the formation's total after the removal. Dropping
/// under the 18-hour floor is rejected; the returned shortfall reports the
/// gap and how many of the `student_count` students would have to go for
/// the reduced duration to qualify under the tiered roster floor. `None`
/// means the removal is fine.
pub fn check_course_removal(
    remaining_hours: f64,
    student_count: usize,
) -> Option<DurationShortfall> {
    if remaining_hours >= AGGREGATE_HOURS_FLOOR {
        return None;
    }

    // Search downward from the current roster size for the largest roster
    // the reduced duration still satisfies.
    let mut trial = student_count;
    while trial > 1 && minimum_hours_for_roster(trial) > remaining_hours {
        trial -= 1;
    }
    let students_to_remove = student_count.saturating_sub(trial);

    Some(DurationShortfall {
        remaining_hours,
        required_hours: AGGREGATE_HOURS_FLOOR,
        students_to_remove,
    })
}

/// A roster selection with protected original members.
///
/// Originals are the students enrolled as of the action's last confirmed
/// save. Deselecting one is a silent no-op, matching the disabled checkbox
/// it backs; only ids outside the original set can be toggled off.
#[derive(Debug, Clone, Default)]
pub struct RosterSelection {
    original: BTreeSet<i64>,
    selected: BTreeSet<i64>,
}

impl RosterSelection {
    /// Creates a selection for a brand-new action (no protected members).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection seeded from an existing action's roster; every
    /// seeded id is both selected and protected.
    pub fn with_originals(original: impl IntoIterator<Item = i64>) -> Self {
        let original: BTreeSet<i64> = original.into_iter().collect();
        Self {
            selected: original.clone(),
            original,
        }
    }

    /// Toggles a student id. Protected originals are never deselected.
    pub fn toggle(&mut self, student_id: i64) {
        if self.original.contains(&student_id) {
            return;
        }
        if !self.selected.remove(&student_id) {
            self.selected.insert(student_id);
        }
    }

    /// Select-all over the currently filtered student list.
    ///
    /// If every non-original id in `filtered` is already selected, those
    /// ids are deselected; otherwise they are all selected. Originals are
    /// untouched either way.
    pub fn toggle_all(&mut self, filtered: &[i64]) {
        let toggleable: Vec<i64> = filtered
            .iter()
            .copied()
            .filter(|id| !self.original.contains(id))
            .collect();
        if toggleable.is_empty() {
            return;
        }

        let all_selected = toggleable.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in &toggleable {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(toggleable);
        }
    }

    /// Whether a student id is currently selected.
    pub fn is_selected(&self, student_id: i64) -> bool {
        self.selected.contains(&student_id)
    }

    /// Whether a student id is a protected original.
    pub fn is_original(&self, student_id: i64) -> bool {
        self.original.contains(&student_id)
    }

    /// Number of selected students.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    /// Selected ids that are not protected originals.
    pub fn added_ids(&self) -> Vec<i64> {
        self.selected
            .difference(&self.original)
            .copied()
            .collect()
    }
}
