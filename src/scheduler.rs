//! The evolutionary loop (spec §4.5) and the `schedule` half of the external
//! interface facade (spec §4.7).

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::candidate::Candidate;
use crate::data::{Assignment, Course};
use crate::error::ScheduleError;
use crate::fitness::{evaluate, FitnessWeights};
use crate::generator::random_candidate;
use crate::operators::{crossover, mutate, repair, tournament_select};

pub const POPULATION_SIZE: usize = 50;
pub const MAX_GENERATIONS: usize = 100;
pub const ELITE_SIZE: usize = 5;
pub const CROSSOVER_RATE: f64 = 0.8;

/// Runs the genetic search to completion and returns the best candidate's
/// assignments, in input-course order, for every course that was placed.
///
/// Deterministic in `(courses, seed)`: two calls with equal inputs produce
/// byte-identical output, since every stochastic decision in the loop draws
/// from a `StdRng` seeded here and nowhere else.
pub fn schedule(courses: &[Course], seed: u64) -> Result<Vec<Assignment>, ScheduleError> {
    validate_input(courses)?;
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let weights = FitnessWeights::default();

    let mut population: Vec<Candidate> = (0..POPULATION_SIZE)
        .map(|_| {
            let mut candidate = random_candidate(courses, &mut rng);
            evaluate(courses, &mut candidate, &weights);
            candidate
        })
        .collect();

    let mut best = best_of(&population).clone();

    for generation in 0..MAX_GENERATIONS {
        population.sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
        let mut next_population: Vec<Candidate> = population[..ELITE_SIZE.min(population.len())].to_vec();

        while next_population.len() < POPULATION_SIZE {
            let mut child = if rng.gen::<f64>() < CROSSOVER_RATE {
                let parent_a = &population[tournament_select(&mut rng, &population)];
                let parent_b = &population[tournament_select(&mut rng, &population)];
                let mut child = crossover(&mut rng, courses, parent_a, parent_b);
                mutate(&mut rng, courses, &mut child);
                child
            } else {
                let parent = population[tournament_select(&mut rng, &population)].clone();
                let mut child = parent;
                mutate(&mut rng, courses, &mut child);
                child
            };

            repair(courses, &mut child);
            evaluate(courses, &mut child, &weights);
            next_population.push(child);
        }

        population = next_population;

        let current_best = best_of(&population);
        if current_best.fitness > best.fitness {
            best = current_best.clone();
        }

        if (generation + 1) % 10 == 0 {
            debug!("generation {}/{MAX_GENERATIONS}: best fitness = {:.2}", generation + 1, best.fitness);
        }
    }

    info!("schedule({} courses, seed={seed}) converged in {:.2?}", courses.len(), start.elapsed());
    Ok(best.to_assignments(courses))
}

fn best_of(population: &[Candidate]) -> &Candidate {
    population
        .iter()
        .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap())
        .expect("population is never empty")
}

/// The only structural validation the core performs: course ids must be unique
/// within the input. Everything else (infeasibility) surfaces as omitted output.
fn validate_input(courses: &[Course]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::new();
    for course in courses {
        if !seen.insert(course.id) {
            return Err(ScheduleError::InvalidInput(course.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;

    fn course(id: u32, instructor: &str) -> Course {
        Course {
            id,
            instructor: instructor.to_string(),
            is_lab: id % 2 == 0,
            course_code: format!("C{id}"),
            course_name: format!("Course {id}"),
            department: "CS".to_string(),
            enrollment: 30,
            weeks: 15,
            credits: 3,
        }
    }

    fn assert_valid_vocabulary(assignment: &Assignment) {
        assert!(time::is_valid_start(assignment.start_time.as_str()));
        assert_eq!(
            time::minutes_of(&assignment.end_time()),
            time::minutes_of(assignment.start_time.as_str()) + 180
        );
        assert!(time::minutes_of(&assignment.end_time()) <= time::minutes_of("18:00"));
    }

    fn assert_no_conflicts(assignments: &[Assignment]) {
        for (i, a) in assignments.iter().enumerate() {
            for b in &assignments[i + 1..] {
                if a.day != b.day {
                    continue;
                }
                let overlap = time::overlaps(a.start_time.as_str(), &a.end_time(), b.start_time.as_str(), &b.end_time());
                if !overlap {
                    continue;
                }
                assert!(a.room != b.room, "room conflict between {} and {}", a.course_id, b.course_id);
                assert!(a.instructor != b.instructor, "instructor conflict between {} and {}", a.course_id, b.course_id);
            }
        }
    }

    #[test]
    fn empty_course_list_yields_empty_output() {
        let result = schedule(&[], 1).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn duplicate_course_id_is_invalid_input() {
        let courses = vec![course(1, "A"), course(1, "B")];
        assert!(matches!(schedule(&courses, 1), Err(ScheduleError::InvalidInput(1))));
    }

    #[test]
    fn scenario_a_single_course_gets_exactly_one_assignment() {
        let courses = vec![course(1, "P")];
        let result = schedule(&courses, 1).unwrap();
        assert_eq!(result.len(), 1);
        assert_valid_vocabulary(&result[0]);
    }

    #[test]
    fn scenario_b_two_courses_same_instructor_never_share_day_and_start() {
        let courses = vec![course(1, "P"), course(2, "P")];
        let result = schedule(&courses, 2).unwrap();
        assert_eq!(result.len(), 2);
        assert_no_conflicts(&result);
        let same_day_and_start = result[0].day == result[1].day && result[0].start_time == result[1].start_time;
        assert!(!same_day_and_start);
    }

    #[test]
    fn scenario_c_five_distinct_instructors_all_placed_and_deterministic() {
        let courses: Vec<Course> = (1..=5).map(|i| course(i, &format!("instructor-{i}"))).collect();
        let result_a = schedule(&courses, 42).unwrap();
        let result_b = schedule(&courses, 42).unwrap();

        assert_eq!(result_a.len(), 5);
        assert_no_conflicts(&result_a);
        for a in &result_a {
            assert_valid_vocabulary(a);
        }

        let slots_a: Vec<_> = result_a.iter().map(|a| (a.course_id, a.day, a.start_time, a.room)).collect();
        let slots_b: Vec<_> = result_b.iter().map(|a| (a.course_id, a.day, a.start_time, a.room)).collect();
        assert_eq!(slots_a, slots_b);
    }

    #[test]
    fn scenario_d_25_courses_no_instructor_double_booked() {
        let mut courses = Vec::new();
        let mut id = 1;
        for instructor_idx in 0..5 {
            for _ in 0..5 {
                courses.push(course(id, &format!("instructor-{instructor_idx}")));
                id += 1;
            }
        }
        let result = schedule(&courses, 7).unwrap();
        assert_no_conflicts(&result);
        assert_eq!(result.len(), 25, "a feasible placement exists for every course here");
    }

    #[test]
    fn each_course_id_appears_at_most_once() {
        let courses: Vec<Course> = (1..=10).map(|i| course(i, &format!("instructor-{i}"))).collect();
        let result = schedule(&courses, 5).unwrap();
        let mut seen = HashSet::new();
        for a in &result {
            assert!(seen.insert(a.course_id));
        }
    }
}
