use std::collections::HashMap;

use crate::data::{Course, CourseId, Slot};

/// A chromosome: a partial Course.id → (day, start, room) mapping plus a cached
/// fitness scalar. Exclusively owned; crossover and elitism always copy, never alias.
#[derive(Debug, Clone)]
pub struct Candidate {
    assignments: HashMap<CourseId, Slot>,
    pub fitness: f64,
}

impl Candidate {
    pub fn new() -> Self {
        Candidate {
            assignments: HashMap::new(),
            fitness: f64::NEG_INFINITY,
        }
    }

    pub fn assign(&mut self, course_id: CourseId, slot: Slot) {
        self.assignments.insert(course_id, slot);
    }

    pub fn unassign(&mut self, course_id: CourseId) {
        self.assignments.remove(&course_id);
    }

    pub fn get(&self, course_id: CourseId) -> Option<Slot> {
        self.assignments.get(&course_id).copied()
    }

    pub fn is_assigned(&self, course_id: CourseId) -> bool {
        self.assignments.contains_key(&course_id)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CourseId, Slot)> + '_ {
        self.assignments.iter().map(|(&id, &slot)| (id, slot))
    }

    pub fn to_assignments(&self, courses: &[Course]) -> Vec<crate::data::Assignment> {
        courses
            .iter()
            .filter_map(|course| {
                self.get(course.id)
                    .map(|slot| crate::data::Assignment::from_course_and_slot(course, slot))
            })
            .collect()
    }
}

impl Default for Candidate {
    fn default() -> Self {
        Self::new()
    }
}
