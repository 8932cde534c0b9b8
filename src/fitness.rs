//! The objective evaluator (spec §4.3): a scalar combining hard-constraint
//! penalties with soft preference terms. Weights are collected into one struct,
//! defaulted to the constants below, rather than scattered through the code —
//! this both documents the objective and lets it be tested for monotonic
//! reactions (e.g. a rental assignment must strictly decrease fitness).

use std::collections::HashMap;

use crate::candidate::Candidate;
use crate::data::{Course, Day, RoomId, TimeSlot};
use crate::time;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessWeights {
    pub conflict: f64,
    pub unassigned: f64,
    pub rental: f64,
    pub vacancy: f64,
    pub room_day_utilization_bonus: f64,
    pub room_day_vacancy_concentration: f64,
    pub isolated_block_bonus: f64,
    pub even_distribution_bonus: f64,
    pub diversity_bonus: f64,
    pub diversity_per_slot_bonus: f64,
    pub overuse_penalty: f64,
    pub overuse_threshold: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        FitnessWeights {
            conflict: -10_000.0,
            unassigned: -5_000.0,
            rental: -50.0,
            vacancy: -30.0,
            room_day_utilization_bonus: 15.0,
            room_day_vacancy_concentration: -50.0,
            isolated_block_bonus: 20.0,
            even_distribution_bonus: 5.0,
            diversity_bonus: 100.0,
            diversity_per_slot_bonus: 200.0,
            overuse_penalty: -30.0,
            overuse_threshold: 1.5,
        }
    }
}

/// Counts conflicting pairs: same day and (same room or same instructor) and
/// overlapping intervals. A pair conflicting on both counts is counted twice.
pub fn conflict_count(courses: &[Course], candidate: &Candidate) -> u32 {
    let mut conflicts = 0;
    for (i, c1) in courses.iter().enumerate() {
        let Some((day1, start1, room1)) = candidate.get(c1.id) else { continue };
        let end1 = start1.end_time();
        for c2 in &courses[i + 1..] {
            let Some((day2, start2, room2)) = candidate.get(c2.id) else { continue };
            if day1 != day2 {
                continue;
            }
            let end2 = start2.end_time();
            let overlapping = time::overlaps(start1.as_str(), &end1, start2.as_str(), &end2);
            if !overlapping {
                continue;
            }
            if room1 == room2 {
                conflicts += 1;
            }
            if c1.instructor == c2.instructor {
                conflicts += 1;
            }
        }
    }
    conflicts
}

pub fn unassigned_count(courses: &[Course], candidate: &Candidate) -> u32 {
    courses.iter().filter(|c| !candidate.is_assigned(c.id)).count() as u32
}

pub fn rental_count(courses: &[Course], candidate: &Candidate) -> u32 {
    courses
        .iter()
        .filter_map(|c| candidate.get(c.id))
        .filter(|(_, _, room)| room.is_rental())
        .count() as u32
}

pub fn room_usage(candidate: &Candidate) -> HashMap<RoomId, u32> {
    let mut usage: HashMap<RoomId, u32> = RoomId::ALL.iter().map(|&r| (r, 0)).collect();
    for (_, (_, _, room)) in candidate.iter() {
        *usage.get_mut(&room).unwrap() += 1;
    }
    usage
}

/// Lightweight vacancy total used by crossover's parent-preference bias (spec §4.4).
pub fn vacancy_count(courses: &[Course], candidate: &Candidate) -> u32 {
    vacancy_details(courses, candidate).0
}

/// Full vacancy accounting for the objective: total count, the vacant slots
/// grouped by (room, day), and the per-(room, day) utilization ratio.
pub fn vacancy_details(
    courses: &[Course],
    candidate: &Candidate,
) -> (u32, HashMap<(RoomId, Day), Vec<TimeSlot>>, HashMap<(RoomId, Day), f64>) {
    let mut vacancy_count = 0u32;
    let mut vacant_slots: HashMap<(RoomId, Day), Vec<TimeSlot>> = HashMap::new();
    let mut utilization: HashMap<(RoomId, Day), f64> = HashMap::new();

    for &room in &RoomId::ALL {
        for &day in &Day::ALL {
            let assigned: Vec<(TimeSlot, String)> = courses
                .iter()
                .filter_map(|c| candidate.get(c.id))
                .filter(|&(d, _, r)| d == day && r == room)
                .map(|(_, start, _)| (start, start.end_time()))
                .collect();

            let assigned_minutes = assigned.len() as f64 * time::BLOCK_DURATION_MINUTES as f64;
            utilization.insert((room, day), assigned_minutes / time::DAILY_WORKING_MINUTES as f64);

            let mut vacant_here = Vec::new();
            for &slot in &TimeSlot::ALL {
                let end = slot.end_time();
                let is_vacant = assigned
                    .iter()
                    .all(|(a_start, a_end)| !time::overlaps(slot.as_str(), &end, a_start.as_str(), a_end));
                if is_vacant {
                    vacancy_count += 1;
                    vacant_here.push(slot);
                }
            }
            vacant_slots.insert((room, day), vacant_here);
        }
    }

    (vacancy_count, vacant_slots, utilization)
}

/// Counts vacant starts that neighbor no other vacant start on either side
/// within the same (room, day) — an isolated 3-hour block.
pub fn count_isolated_blocks(vacant_slots_sorted: &[TimeSlot]) -> u32 {
    let mut count = 0;
    for (i, &start) in vacant_slots_sorted.iter().enumerate() {
        let end_minutes = time::minutes_of(&start.end_time());
        let mut isolated = true;

        if i + 1 < vacant_slots_sorted.len() {
            let next_start_minutes = time::minutes_of(vacant_slots_sorted[i + 1].as_str());
            if end_minutes == next_start_minutes {
                isolated = false;
            }
        }
        if i > 0 {
            let prev_end_minutes = time::minutes_of(&vacant_slots_sorted[i - 1].end_time());
            if prev_end_minutes == time::minutes_of(start.as_str()) {
                isolated = false;
            }
        }
        if isolated {
            count += 1;
        }
    }
    count
}

fn vacancy_bonuses_and_penalties(
    weights: &FitnessWeights,
    vacant_slots: &HashMap<(RoomId, Day), Vec<TimeSlot>>,
    utilization: &HashMap<(RoomId, Day), f64>,
) -> f64 {
    let mut score = 0.0;
    let mut total_isolated_blocks = 0u32;

    for &room in &RoomId::ALL {
        for &day in &Day::ALL {
            let key = (room, day);
            let ratio = utilization.get(&key).copied().unwrap_or(0.0);
            score += weights.room_day_utilization_bonus * ratio;

            if let Some(slots) = vacant_slots.get(&key) {
                if !slots.is_empty() {
                    score += slots.len() as f64 * weights.room_day_vacancy_concentration;
                    let mut sorted = slots.clone();
                    sorted.sort_by_key(|s| time::minutes_of(s.as_str()));
                    total_isolated_blocks += count_isolated_blocks(&sorted);
                }
            }
        }
    }

    score + weights.isolated_block_bonus * total_isolated_blocks as f64
}

fn even_distribution_bonus(weights: &FitnessWeights, usage: &HashMap<RoomId, u32>) -> f64 {
    if usage.is_empty() {
        return 0.0;
    }
    let values: Vec<f64> = usage.values().map(|&v| v as f64).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    weights.even_distribution_bonus * (1.0 / (1.0 + variance))
}

fn time_slot_usage(candidate: &Candidate) -> HashMap<TimeSlot, u32> {
    let mut usage: HashMap<TimeSlot, u32> = TimeSlot::ALL.iter().map(|&s| (s, 0)).collect();
    for (_, (_, start, _)) in candidate.iter() {
        *usage.get_mut(&start).unwrap() += 1;
    }
    usage
}

fn time_slot_diversity_score(weights: &FitnessWeights, candidate: &Candidate) -> f64 {
    let usage = time_slot_usage(candidate);
    let values: Vec<f64> = TimeSlot::ALL.iter().map(|s| usage[s] as f64).collect();
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return 0.0;
    }

    let used_slots = values.iter().filter(|&&v| v > 0.0).count() as f64;
    let mean = total / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    let mut score = weights.diversity_bonus * used_slots * (1.0 / (1.0 + variance));

    for &count in &values {
        if count > mean * weights.overuse_threshold {
            let overuse = count - mean * weights.overuse_threshold;
            score += weights.overuse_penalty * overuse;
        }
    }

    score += weights.diversity_per_slot_bonus * used_slots / values.len() as f64;
    score
}

/// Computes the candidate's fitness and caches it on the candidate.
pub fn evaluate(courses: &[Course], candidate: &mut Candidate, weights: &FitnessWeights) -> f64 {
    let mut fitness = 0.0;

    fitness += conflict_count(courses, candidate) as f64 * weights.conflict;
    fitness += unassigned_count(courses, candidate) as f64 * weights.unassigned;
    fitness += rental_count(courses, candidate) as f64 * weights.rental;

    let (vacancies, vacant_slots, utilization) = vacancy_details(courses, candidate);
    fitness += vacancies as f64 * weights.vacancy;
    fitness += vacancy_bonuses_and_penalties(weights, &vacant_slots, &utilization);

    fitness += even_distribution_bonus(weights, &room_usage(candidate));
    fitness += time_slot_diversity_score(weights, candidate);

    candidate.fitness = fitness;
    fitness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Day, RoomId, TimeSlot};

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
    fn empty_candidate_has_zero_conflicts_and_unassigned() {
        let courses = vec![course(1, "A")];
        let candidate = Candidate::new();
        assert_eq!(conflict_count(&courses, &candidate), 0);
        assert_eq!(unassigned_count(&courses, &candidate), 1);
    }

    #[test]
    fn same_room_overlap_is_one_conflict() {
        let courses = vec![course(1, "A"), course(2, "B")];
        let mut candidate = Candidate::new();
        candidate.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        candidate.assign(2, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        assert_eq!(conflict_count(&courses, &candidate), 1);
    }

    #[test]
    fn same_instructor_overlap_is_one_conflict_even_in_different_rooms() {
        let courses = vec![course(1, "A"), course(2, "A")];
        let mut candidate = Candidate::new();
        candidate.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        candidate.assign(2, (Day::Mon, TimeSlot::T0900, RoomId::Room1216));
        assert_eq!(conflict_count(&courses, &candidate), 1);
    }

    #[test]
    fn same_room_and_instructor_overlap_counts_twice() {
        let courses = vec![course(1, "A"), course(2, "A")];
        let mut candidate = Candidate::new();
        candidate.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        candidate.assign(2, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        assert_eq!(conflict_count(&courses, &candidate), 2);
    }

    #[test]
    fn non_overlapping_same_room_is_no_conflict() {
        let courses = vec![course(1, "A"), course(2, "B")];
        let mut candidate = Candidate::new();
        candidate.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        candidate.assign(2, (Day::Mon, TimeSlot::T1200, RoomId::Room1215));
        assert_eq!(conflict_count(&courses, &candidate), 0);
    }

    #[test]
    fn rental_assignment_strictly_decreases_fitness_all_else_equal() {
        let courses = vec![course(1, "A")];
        let weights = FitnessWeights::default();

        let mut owned = Candidate::new();
        owned.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        let owned_fitness = evaluate(&courses, &mut owned, &weights);

        let mut rented = Candidate::new();
        rented.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Rental));
        let rented_fitness = evaluate(&courses, &mut rented, &weights);

        assert!(rented_fitness < owned_fitness);
    }

    #[test]
    fn conflicting_candidate_scores_far_below_conflict_free_one() {
        let courses = vec![course(1, "A"), course(2, "A")];
        let weights = FitnessWeights::default();

        let mut conflicting = Candidate::new();
        conflicting.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        conflicting.assign(2, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        let conflicting_fitness = evaluate(&courses, &mut conflicting, &weights);

        let mut clean = Candidate::new();
        clean.assign(1, (Day::Mon, TimeSlot::T0900, RoomId::Room1215));
        clean.assign(2, (Day::Tue, TimeSlot::T0900, RoomId::Room1215));
        let clean_fitness = evaluate(&courses, &mut clean, &weights);

        assert!(conflicting_fitness < clean_fitness);
    }

    #[test]
    fn isolated_blocks_counts_non_adjacent_starts() {
        assert_eq!(count_isolated_blocks(&[TimeSlot::T0900]), 1);
        assert_eq!(count_isolated_blocks(&[TimeSlot::T0900, TimeSlot::T1300]), 2);
    }

    #[test]
    fn adjacent_vacant_starts_are_not_isolated() {
        assert_eq!(count_isolated_blocks(&[TimeSlot::T0900, TimeSlot::T1200]), 0);
    }
}
