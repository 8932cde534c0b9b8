//! Random candidate generation (spec §4.2): seeds a chromosome by picking, per
//! course, a usage-weighted start time, a uniform day, and a room biased toward
//! the four owned rooms over the single rental room.

use rand::prelude::*;
use std::collections::HashMap;

use crate::candidate::Candidate;
use crate::data::{Course, Day, RoomId, TimeSlot};
use crate::sampling::weighted_index;

/// Probability of picking an owned room over the rental room.
pub const DEFAULT_ROOM_PREFERENCE: f64 = 0.8;

/// Picks a start time with weight `1 / (usage + 1)` over the current candidate.
pub fn select_time_slot_by_usage<R: Rng + ?Sized>(rng: &mut R, usage: &HashMap<TimeSlot, u32>) -> TimeSlot {
    let weights: Vec<f64> = TimeSlot::ALL.iter().map(|slot| 1.0 / (usage[slot] as f64 + 1.0)).collect();
    TimeSlot::ALL[weighted_index(rng, &weights)]
}

/// Picks a room: owned rooms with probability [`DEFAULT_ROOM_PREFERENCE`], else rental.
pub fn select_room_by_preference<R: Rng + ?Sized>(rng: &mut R) -> RoomId {
    if rng.gen::<f64>() < DEFAULT_ROOM_PREFERENCE {
        *RoomId::OWNED.choose(rng).expect("OWNED is non-empty")
    } else {
        RoomId::Rental
    }
}

fn select_day<R: Rng + ?Sized>(rng: &mut R) -> Day {
    *Day::ALL.choose(rng).expect("ALL is non-empty")
}

/// Builds one random candidate, processing courses in input order.
pub fn random_candidate<R: Rng + ?Sized>(courses: &[Course], rng: &mut R) -> Candidate {
    let mut candidate = Candidate::new();
    let mut usage: HashMap<TimeSlot, u32> = TimeSlot::ALL.iter().map(|&s| (s, 0)).collect();

    for course in courses {
        let slot = select_time_slot_by_usage(rng, &usage);
        let day = select_day(rng);
        let room = select_room_by_preference(rng);
        candidate.assign(course.id, (day, slot, room));
        *usage.get_mut(&slot).unwrap() += 1;
    }

    candidate
}
