use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time;

pub type CourseId = u32;

/// Five working weekdays, labeled the way the surrounding service's callers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "월")]
    Mon,
    #[serde(rename = "화")]
    Tue,
    #[serde(rename = "수")]
    Wed,
    #[serde(rename = "목")]
    Thu,
    #[serde(rename = "금")]
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// The wire label, matching the source data's own weekday vocabulary.
    pub fn label(&self) -> &'static str {
        match self {
            Day::Mon => "월",
            Day::Tue => "화",
            Day::Wed => "수",
            Day::Thu => "목",
            Day::Fri => "금",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the seven valid 3-hour block starts, 09:00 through 15:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "09:00")]
    T0900,
    #[serde(rename = "10:00")]
    T1000,
    #[serde(rename = "11:00")]
    T1100,
    #[serde(rename = "12:00")]
    T1200,
    #[serde(rename = "13:00")]
    T1300,
    #[serde(rename = "14:00")]
    T1400,
    #[serde(rename = "15:00")]
    T1500,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 7] = [
        TimeSlot::T0900,
        TimeSlot::T1000,
        TimeSlot::T1100,
        TimeSlot::T1200,
        TimeSlot::T1300,
        TimeSlot::T1400,
        TimeSlot::T1500,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::T0900 => "09:00",
            TimeSlot::T1000 => "10:00",
            TimeSlot::T1100 => "11:00",
            TimeSlot::T1200 => "12:00",
            TimeSlot::T1300 => "13:00",
            TimeSlot::T1400 => "14:00",
            TimeSlot::T1500 => "15:00",
        }
    }

    pub fn end_time(&self) -> String {
        time::end_of_block(self.as_str())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five physical rooms; `Rental` is the single, penalized outside room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomId {
    #[serde(rename = "1215")]
    Room1215,
    #[serde(rename = "1216")]
    Room1216,
    #[serde(rename = "1217")]
    Room1217,
    #[serde(rename = "1418")]
    Room1418,
    #[serde(rename = "RENTAL_1")]
    Rental,
}

impl RoomId {
    pub const OWNED: [RoomId; 4] = [RoomId::Room1215, RoomId::Room1216, RoomId::Room1217, RoomId::Room1418];
    pub const ALL: [RoomId; 5] = [
        RoomId::Room1215,
        RoomId::Room1216,
        RoomId::Room1217,
        RoomId::Room1418,
        RoomId::Rental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomId::Room1215 => "1215",
            RoomId::Room1216 => "1216",
            RoomId::Room1217 => "1217",
            RoomId::Room1418 => "1418",
            RoomId::Rental => "RENTAL_1",
        }
    }

    pub fn is_rental(&self) -> bool {
        matches!(self, RoomId::Rental)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A triple identifying a (day, start, room) scheduling slot.
pub type Slot = (Day, TimeSlot, RoomId);

/// An immutable course to be placed. `instructor` and `is_lab` drive the search;
/// the remaining fields are administrative metadata carried through to the output.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub instructor: String,
    #[serde(default)]
    pub is_lab: bool,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub enrollment: u32,
    #[serde(default)]
    pub weeks: u32,
    #[serde(default)]
    pub credits: u32,
}

/// One placed course: its (day, start, room) plus the course metadata the wire
/// format requires alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub course_id: CourseId,
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    pub department: String,
    pub is_lab: bool,
    pub enrollment: u32,
    pub weeks: u32,
    pub credits: u32,
    pub day: Day,
    pub start_time: TimeSlot,
    pub room: RoomId,
}

impl Assignment {
    pub fn end_time(&self) -> String {
        self.start_time.end_time()
    }

    pub fn from_course_and_slot(course: &Course, slot: Slot) -> Self {
        let (day, start_time, room) = slot;
        Assignment {
            course_id: course.id,
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            instructor: course.instructor.clone(),
            department: course.department.clone(),
            is_lab: course.is_lab,
            enrollment: course.enrollment,
            weeks: course.weeks,
            credits: course.credits,
            day,
            start_time,
            room,
        }
    }
}
