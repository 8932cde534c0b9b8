//! Variation operators (spec §4.4): tournament selection, vacancy-biased uniform
//! crossover, mutation, and best-effort repair.

use rand::prelude::*;
use rand::seq::IteratorRandom;

use crate::candidate::Candidate;
use crate::data::{Course, Day, RoomId, Slot, TimeSlot};
use crate::fitness::vacancy_count;
use crate::generator::{select_room_by_preference, select_time_slot_by_usage};
use crate::time;

pub const TOURNAMENT_SIZE: usize = 3;
pub const CROSSOVER_PREFERENCE_PROB: f64 = 0.7;
pub const MUTATION_RATE: f64 = 0.1;
pub const REPAIR_MAX_PASSES: usize = 10;

/// Draws [`TOURNAMENT_SIZE`] candidates (with replacement if the population is
/// smaller) and returns the index of the fittest.
pub fn tournament_select<R: Rng + ?Sized>(rng: &mut R, population: &[Candidate]) -> usize {
    let draw = TOURNAMENT_SIZE.min(population.len());
    let drawn = (0..population.len()).choose_multiple(rng, draw);
    let mut best_idx = drawn[0];
    let mut best_fitness = population[best_idx].fitness;
    for &idx in &drawn[1..] {
        if population[idx].fitness > best_fitness {
            best_fitness = population[idx].fitness;
            best_idx = idx;
        }
    }
    best_idx
}

/// Crossover biased toward the parent with fewer vacancies: for each course, take
/// that parent's assignment with probability `p`, falling back to the other
/// parent if the preferred one has none, else leaving the course unassigned.
pub fn crossover<R: Rng + ?Sized>(
    rng: &mut R,
    courses: &[Course],
    parent_a: &Candidate,
    parent_b: &Candidate,
) -> Candidate {
    let vacancies_a = vacancy_count(courses, parent_a);
    let vacancies_b = vacancy_count(courses, parent_b);

    let preferred_a_prob = if vacancies_a < vacancies_b {
        CROSSOVER_PREFERENCE_PROB
    } else if vacancies_b < vacancies_a {
        1.0 - CROSSOVER_PREFERENCE_PROB
    } else {
        0.5
    };

    let mut child = Candidate::new();
    for course in courses {
        let (primary, fallback) = if rng.gen::<f64>() < preferred_a_prob {
            (parent_a, parent_b)
        } else {
            (parent_b, parent_a)
        };

        let slot = primary.get(course.id).or_else(|| fallback.get(course.id));
        if let Some(slot) = slot {
            child.assign(course.id, slot);
        }
    }
    child
}

/// Re-randomizes each course's assignment independently with probability
/// [`MUTATION_RATE`], weighting the new start time against the candidate's own
/// current start-time histogram.
pub fn mutate<R: Rng + ?Sized>(rng: &mut R, courses: &[Course], candidate: &mut Candidate) {
    let mut usage: std::collections::HashMap<TimeSlot, u32> =
        TimeSlot::ALL.iter().map(|&s| (s, 0)).collect();
    for (_, (_, start, _)) in candidate.iter() {
        *usage.get_mut(&start).unwrap() += 1;
    }

    for course in courses {
        if rng.gen::<f64>() < MUTATION_RATE {
            let day = *Day::ALL.choose(rng).expect("ALL is non-empty");
            let slot = select_time_slot_by_usage(rng, &usage);
            *usage.get_mut(&slot).unwrap() += 1;
            let room = select_room_by_preference(rng);
            candidate.assign(course.id, (day, slot, room));
        }
    }
}

fn slots_overlap(a_start: TimeSlot, b_start: TimeSlot) -> bool {
    time::overlaps(a_start.as_str(), &a_start.end_time(), b_start.as_str(), &b_start.end_time())
}

/// True iff placing `course` at `slot` would conflict (same room or same
/// instructor, overlapping interval, same day) with anything else in `candidate`.
pub fn has_conflict(courses: &[Course], course: &Course, slot: Slot, candidate: &Candidate) -> bool {
    let (day, start, room) = slot;
    for other in courses {
        if other.id == course.id {
            continue;
        }
        let Some((o_day, o_start, o_room)) = candidate.get(other.id) else { continue };
        if day != o_day || !slots_overlap(start, o_start) {
            continue;
        }
        if room == o_room || course.instructor == other.instructor {
            return true;
        }
    }
    false
}

/// Tries every (slot, day, room) combination, slots ordered ascending by current
/// usage, and assigns the course to the first conflict-free one it finds.
pub fn assign_to_best_slot(courses: &[Course], course: &Course, candidate: &mut Candidate) -> bool {
    let mut usage: std::collections::HashMap<TimeSlot, u32> =
        TimeSlot::ALL.iter().map(|&s| (s, 0)).collect();
    for (_, (_, start, _)) in candidate.iter() {
        *usage.get_mut(&start).unwrap() += 1;
    }

    let mut ordered_slots = TimeSlot::ALL;
    ordered_slots.sort_by_key(|s| usage[s]);

    for &slot in &ordered_slots {
        for &day in &Day::ALL {
            for &room in &RoomId::ALL {
                if !has_conflict(courses, course, (day, slot, room), candidate) {
                    candidate.assign(course.id, (day, slot, room));
                    return true;
                }
            }
        }
    }
    false
}

/// Best-effort repair (spec §4.4): fills unassigned courses, then resolves
/// conflicts for up to [`REPAIR_MAX_PASSES`] passes, dropping and re-placing the
/// lower-index course of the first conflicting pair found each pass.
pub fn repair(courses: &[Course], candidate: &mut Candidate) {
    for course in courses {
        if !candidate.is_assigned(course.id) {
            assign_to_best_slot(courses, course, candidate);
        }
    }

    for _ in 0..REPAIR_MAX_PASSES {
        let mut conflict_found = false;

        'outer: for (i, c1) in courses.iter().enumerate() {
            let Some((day1, start1, room1)) = candidate.get(c1.id) else { continue };
            for c2 in &courses[i + 1..] {
                let Some((day2, start2, room2)) = candidate.get(c2.id) else { continue };
                if day1 != day2 || !slots_overlap(start1, start2) {
                    continue;
                }
                if room1 == room2 || c1.instructor == c2.instructor {
                    conflict_found = true;
                    candidate.unassign(c1.id);
                    assign_to_best_slot(courses, c1, candidate);
                    break 'outer;
                }
            }
        }

        if !conflict_found {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn course(id: u32, instructor: &str) -> Course {
        Course {
            id,
            instructor: instructor.to_string(),
            is_lab: false,
            course_code: String::new(),
            course_name: String::new(),
            department: String::new(),
            enrollment: 0,
            weeks: 0,
            credits: 0,
        }
    }

    #[test]
    fn tournament_select_returns_index_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let population: Vec<Candidate> = (0..5)
            .map(|i| {
                let mut c = Candidate::new();
                c.fitness = i as f64;
                c
            })
            .collect();
        let idx = tournament_select(&mut rng, &population);
        assert!(idx < population.len());
    }

    #[test]
    fn crossover_prefers_fewer_vacancy_parent_falls_back_when_missing() {
        let courses = vec![course(1, "A"), course(2, "B")];
        let mut parent_a = Candidate::new();
        parent_a.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        let mut parent_b = Candidate::new();
        parent_b.assign(2, (Day::Tue, TimeSlot::T1000, RoomId::Room1216));

        let mut rng = StdRng::seed_from_u64(11);
        let child = crossover(&mut rng, &courses, &parent_a, &parent_b);
        assert!(child.is_assigned(1));
        assert!(child.is_assigned(2));
    }

    #[test]
    fn repair_fills_unassigned_course_without_conflict() {
        let courses = vec![course(1, "A"), course(2, "B")];
        let mut candidate = Candidate::new();
        candidate.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        repair(&courses, &mut candidate);
        assert!(candidate.is_assigned(2));
        assert!(!has_conflict(&courses, &courses[1], candidate.get(2).unwrap(), &candidate));
    }

    #[test]
    fn repair_resolves_an_injected_conflict() {
        let courses = vec![course(1, "A"), course(2, "A")];
        let mut candidate = Candidate::new();
        candidate.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        candidate.assign(2, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        repair(&courses, &mut candidate);

        let slot1 = candidate.get(1).unwrap();
        let slot2 = candidate.get(2).unwrap();
        let conflicting = slot1.0 == slot2.0
            && (slot1.2 == slot2.2)
            && slots_overlap(slot1.1, slot2.1);
        assert!(!conflicting);
    }
}
