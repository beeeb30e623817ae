//! Parse states and the transition function.
//!
//! [`transition`] is pure: given the current state, the pause flag and one
//! chunk, it returns the next state, the pause flag to use next, at most one
//! [`Effect`] on the record, and whether the same chunk must be fed again to
//! the new state. A transition that re-dispatches never carries an effect,
//! so every chunk is applied exactly once.

use chrono::NaiveDate;

use crate::config::TranscriptConfig;
use crate::error::{Error, Result};

use super::patterns::{
    effective_date, is_blank, is_course_subject, is_credit_value, is_full_course_id,
    is_term_label, parse_number, RE_HONOURS, RE_NAME, RE_OEN, RE_PROGRAM, RE_STANDING,
    RE_STATUS, RE_STUDENT_ID, RE_TERM,
};

/// Position of the parser in the transcript layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    /// Before the transcript header
    Waiting,
    /// Expecting `Name: ...`
    StudentInfo,
    /// Expecting `Student ID: ...`
    StudentId,
    /// Expecting `Ontario Education Nbr: ...`
    Oen,
    /// Between terms, looking for a term label or a closing section
    StartTerm,
    /// Collecting the program name
    Program,
    /// Expecting the level / load / form of study line
    Status,
    /// Course subject (gated on the `Grade` column header)
    CourseName,
    /// Course catalog number
    CourseCode,
    /// Course title
    CourseDesc,
    /// Credits attempted
    CreditAttempt,
    /// Credits earned
    CreditEarned,
    /// Grade, or title continuation
    CreditGrade,
    /// Term GPA (gated on the `Term GPA` label)
    TermGpa,
    /// Term credits in GPA
    TermTotalInGpa,
    /// Term credits earned
    TermTotalEarned,
    /// Cumulative GPA
    CumulativeGpa,
    /// Cumulative credits in GPA
    CumulativeTotalInGpa,
    /// Cumulative credits earned
    CumulativeTotalEarned,
    /// Academic standing, closed by an `Effective` line
    AcademicStanding,
    /// Term honours
    Honours,
    /// Milestones section (skipped)
    Milestones,
    /// Scholarships and awards section (skipped)
    Scholarships,
    /// End of transcript reached
    Done,
}

/// A single mutation of the transcript record.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing to record
    None,
    /// Student name
    StudentName(String),
    /// Student ID
    StudentId(u64),
    /// Ontario Education Number
    StudentOen(u64),
    /// Open a new term
    OpenTerm(String),
    /// Append to the program name
    AppendProgram(String),
    /// Level, load and form of study
    Status {
        /// Level, e.g. `1A`
        level: String,
        /// Load, e.g. `Full`
        load: String,
        /// Form of study as printed
        form_of_study: String,
    },
    /// Open a new course
    OpenCourse(String),
    /// Append the catalog number to the course id
    AppendCourseCode(String),
    /// Set the course title
    Description {
        /// Title text
        text: String,
        /// Title carries the not-in-average marker
        not_in_average: bool,
    },
    /// Append a wrapped line to the course title
    AppendDescription {
        /// Continuation text
        text: String,
        /// Continuation carries the not-in-average marker
        not_in_average: bool,
    },
    /// Credits attempted
    CreditWorth(f64),
    /// Credits earned
    CreditEarned(f64),
    /// Grade for the current course
    Grade {
        /// Grade as printed
        raw: String,
        /// Numeric value, 0 for sentinels
        numeric: f64,
        /// Non-numeric sentinel such as `CR` or `WD`
        sentinel: bool,
    },
    /// Term GPA as printed
    TermGpa(f64),
    /// Term credits in GPA as printed
    TermTotalCredits(f64),
    /// Term credits earned as printed
    TermEarnedCredits(f64),
    /// Cumulative GPA as printed
    CumulativeGpa(f64),
    /// Cumulative credits in GPA as printed
    CumulativeTotalCredits(f64),
    /// Cumulative credits earned as printed
    CumulativeEarnedCredits(f64),
    /// Academic standing, with its date when on the same line
    AcademicStanding {
        /// Standing text
        standing: String,
        /// Effective date, if present and valid
        effective: Option<NaiveDate>,
    },
    /// Date the standing took effect
    StandingEffective(Option<NaiveDate>),
    /// Term honours
    Honours(String),
}

/// Result of applying one chunk to one state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State to move to
    pub next: ParseState,
    /// Pause flag for the next state
    pub paused: bool,
    /// Mutation to apply to the record
    pub effect: Effect,
    /// Feed the same chunk to `next` again
    pub redispatch: bool,
}

impl Transition {
    fn to(next: ParseState) -> Self {
        Self {
            next,
            paused: false,
            effect: Effect::None,
            redispatch: false,
        }
    }

    fn stay(state: ParseState, paused: bool) -> Self {
        Self {
            paused,
            ..Self::to(state)
        }
    }

    fn redispatch(next: ParseState) -> Self {
        Self {
            redispatch: true,
            ..Self::to(next)
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        debug_assert!(!self.redispatch);
        self.effect = effect;
        self
    }

    fn paused(mut self) -> Self {
        self.paused = true;
        self
    }
}

fn mismatch(expected: &'static str, chunk: &str) -> Error {
    Error::StructuralMismatch {
        expected,
        found: chunk.to_string(),
    }
}

/// A term label or a closing section: the end of whatever term-level block
/// the parser is in.
fn is_section_boundary(chunk: &str, config: &TranscriptConfig) -> bool {
    let trimmed = chunk.trim();
    is_term_label(trimmed)
        || trimmed == config.milestones_marker
        || trimmed == config.scholarships_marker
        || trimmed == config.end_marker
}

/// Apply one chunk to one state.
///
/// # Errors
///
/// Returns [`Error::StructuralMismatch`] when the name, student ID or OEN
/// chunk is malformed. Every other irregularity is absorbed.
pub fn transition(
    state: ParseState,
    paused: bool,
    chunk: &str,
    config: &TranscriptConfig,
) -> Result<Transition> {
    use ParseState::*;

    // Blank chunks separate labels from values; only honours gives them meaning.
    if is_blank(chunk) && !matches!(state, Honours) {
        return Ok(Transition::stay(state, paused));
    }

    let trimmed = chunk.trim();

    let t = match state {
        Waiting => {
            if chunk.contains(config.header_marker.as_str()) {
                Transition::to(StudentInfo)
            } else {
                Transition::stay(Waiting, false)
            }
        },
        StudentInfo => {
            let caps = RE_NAME
                .captures(chunk)
                .ok_or_else(|| mismatch("student name", chunk))?;
            Transition::to(StudentId).with_effect(Effect::StudentName(caps[1].trim().to_string()))
        },
        StudentId => {
            let id = RE_STUDENT_ID
                .captures(chunk)
                .and_then(|caps| caps[1].parse::<u64>().ok())
                .ok_or_else(|| mismatch("Student ID", chunk))?;
            Transition::to(Oen).with_effect(Effect::StudentId(id))
        },
        Oen => {
            let oen = RE_OEN
                .captures(chunk)
                .and_then(|caps| caps[1].parse::<u64>().ok())
                .ok_or_else(|| mismatch("Ontario Education Nbr", chunk))?;
            Transition::to(StartTerm).with_effect(Effect::StudentOen(oen))
        },
        StartTerm => {
            if let Some(m) = RE_TERM.find(chunk) {
                Transition::to(Program).with_effect(Effect::OpenTerm(m.as_str().to_string()))
            } else if trimmed == config.milestones_marker {
                Transition::to(Milestones)
            } else if trimmed == config.scholarships_marker {
                Transition::to(Scholarships)
            } else if trimmed == config.end_marker {
                Transition::to(Done)
            } else {
                Transition::stay(StartTerm, false)
            }
        },
        Program => {
            if let Some(caps) = RE_PROGRAM.captures(chunk) {
                Transition::stay(Program, false)
                    .with_effect(Effect::AppendProgram(caps[1].trim().to_string()))
            } else if chunk.contains("Level:") {
                Transition::redispatch(Status)
            } else {
                Transition::stay(Program, false)
                    .with_effect(Effect::AppendProgram(trimmed.to_string()))
            }
        },
        Status => {
            let next = Transition::to(CourseName).paused();
            match RE_STATUS.captures(chunk) {
                Some(caps) => next.with_effect(Effect::Status {
                    level: caps[1].to_string(),
                    load: caps[2].to_string(),
                    form_of_study: caps[3].to_string(),
                }),
                None => {
                    log::debug!("Unrecognised status line '{}'", chunk);
                    next
                },
            }
        },
        CourseName if paused => {
            if trimmed == "Grade" {
                Transition::stay(CourseName, false)
            } else if is_section_boundary(chunk, config) {
                // Term without a course table.
                Transition::redispatch(StartTerm)
            } else {
                Transition::stay(CourseName, true)
            }
        },
        CourseName => match row_cue(chunk, config) {
            // Grade header with no course rows.
            Some(t) => t,
            None => {
                let next = if is_full_course_id(chunk) {
                    CourseDesc
                } else {
                    CourseCode
                };
                Transition::to(next).with_effect(Effect::OpenCourse(trimmed.to_string()))
            },
        },
        CourseCode => {
            if let Some(t) = row_cue(chunk, config) {
                t
            } else if is_credit_value(chunk) {
                // No catalog number or title column on this row.
                Transition::redispatch(CreditAttempt)
            } else {
                Transition::to(CourseDesc).with_effect(Effect::AppendCourseCode(trimmed.to_string()))
            }
        },
        CourseDesc => {
            if let Some(t) = row_cue(chunk, config) {
                t
            } else if parse_number(chunk).is_some() {
                Transition::redispatch(CreditAttempt)
            } else {
                Transition::to(CreditAttempt).with_effect(Effect::Description {
                    text: trimmed.to_string(),
                    not_in_average: chunk.contains(config.not_in_average_marker.as_str()),
                })
            }
        },
        CreditAttempt => match parse_number(chunk) {
            Some(n) => Transition::to(CreditEarned).with_effect(Effect::CreditWorth(n)),
            None => Transition::redispatch(CreditEarned),
        },
        CreditEarned => match parse_number(chunk) {
            Some(n) => Transition::to(CreditGrade).with_effect(Effect::CreditEarned(n)),
            None => Transition::redispatch(CreditGrade),
        },
        CreditGrade => credit_grade(chunk, config),
        TermGpa if paused => {
            if is_section_boundary(chunk, config) {
                // Term without a totals block.
                Transition::redispatch(StartTerm)
            } else {
                Transition::stay(TermGpa, trimmed != "Term GPA")
            }
        },
        TermGpa => numeric_field(chunk, config, TermGpa, TermTotalInGpa, Effect::TermGpa),
        TermTotalInGpa => numeric_field(
            chunk,
            config,
            TermTotalInGpa,
            TermTotalEarned,
            Effect::TermTotalCredits,
        ),
        TermTotalEarned => numeric_field(
            chunk,
            config,
            TermTotalEarned,
            CumulativeGpa,
            Effect::TermEarnedCredits,
        ),
        CumulativeGpa => numeric_field(
            chunk,
            config,
            CumulativeGpa,
            CumulativeTotalInGpa,
            Effect::CumulativeGpa,
        ),
        CumulativeTotalInGpa => numeric_field(
            chunk,
            config,
            CumulativeTotalInGpa,
            CumulativeTotalEarned,
            Effect::CumulativeTotalCredits,
        ),
        CumulativeTotalEarned => {
            if let Some(n) = parse_number(chunk) {
                Transition::stay(CumulativeTotalEarned, false)
                    .with_effect(Effect::CumulativeEarnedCredits(n))
            } else if chunk.contains("Academic Standing") {
                Transition::redispatch(AcademicStanding)
            } else {
                Transition::redispatch(StartTerm)
            }
        },
        AcademicStanding => academic_standing(chunk, config),
        Honours => {
            if is_blank(chunk) {
                Transition::to(StartTerm)
            } else if let Some(caps) = RE_HONOURS.captures(chunk) {
                Transition::stay(Honours, false).with_effect(Effect::Honours(caps[1].to_string()))
            } else if effective_date(chunk).is_some() {
                Transition::to(StartTerm)
            } else {
                Transition::redispatch(StartTerm)
            }
        },
        Milestones => {
            if trimmed == config.scholarships_marker {
                Transition::to(Scholarships)
            } else if trimmed == config.end_marker {
                Transition::to(Done)
            } else {
                log::trace!("Skipping milestone chunk '{}'", chunk);
                Transition::stay(Milestones, false)
            }
        },
        Scholarships => {
            if trimmed == config.end_marker {
                Transition::to(Done)
            } else {
                log::trace!("Skipping scholarship chunk '{}'", chunk);
                Transition::stay(Scholarships, false)
            }
        },
        Done => {
            log::trace!("Ignoring chunk after end of transcript: '{}'", chunk);
            Transition::stay(Done, false)
        },
    };

    Ok(t)
}

/// A numeric value advances to `next`; a section boundary ends the totals
/// block; anything else is skipped.
fn numeric_field(
    chunk: &str,
    config: &TranscriptConfig,
    state: ParseState,
    next: ParseState,
    effect: fn(f64) -> Effect,
) -> Transition {
    match parse_number(chunk) {
        Some(n) => Transition::to(next).with_effect(effect(n)),
        None if is_section_boundary(chunk, config) => {
            Transition::redispatch(ParseState::StartTerm)
        },
        None => Transition::stay(state, false),
    }
}

/// Cue that closes the current course row: the term totals block or a
/// section boundary.
fn row_cue(chunk: &str, config: &TranscriptConfig) -> Option<Transition> {
    use ParseState::*;

    let trimmed = chunk.trim();
    let t = if trimmed == "In GPA" || trimmed == "Term GPA" {
        Transition::redispatch(TermGpa).paused()
    } else if trimmed == config.milestones_marker {
        Transition::redispatch(Milestones)
    } else if trimmed == config.scholarships_marker {
        Transition::redispatch(Scholarships)
    } else if trimmed == config.end_marker {
        Transition::redispatch(Done)
    } else if is_term_label(chunk) {
        Transition::redispatch(StartTerm)
    } else {
        return None;
    };
    Some(t)
}

fn credit_grade(chunk: &str, config: &TranscriptConfig) -> Transition {
    use ParseState::*;

    let trimmed = chunk.trim();
    if let Some(n) = parse_number(chunk) {
        return Transition::stay(CreditGrade, false).with_effect(Effect::Grade {
            raw: trimmed.to_string(),
            numeric: n,
            sentinel: false,
        });
    }
    // Before the subject check: sentinels are uppercase too.
    if config.is_grade_sentinel(chunk) {
        return Transition::stay(CreditGrade, false).with_effect(Effect::Grade {
            raw: trimmed.to_string(),
            numeric: 0.0,
            sentinel: true,
        });
    }

    if let Some(t) = row_cue(chunk, config) {
        t
    } else if is_course_subject(chunk) {
        Transition::redispatch(CourseName)
    } else {
        Transition::stay(CreditGrade, false).with_effect(Effect::AppendDescription {
            text: trimmed.to_string(),
            not_in_average: chunk.contains(config.not_in_average_marker.as_str()),
        })
    }
}

fn academic_standing(chunk: &str, config: &TranscriptConfig) -> Transition {
    use ParseState::*;

    if let Some(caps) = RE_STANDING.captures(chunk) {
        let standing = caps[1].to_string();
        return match effective_date(chunk) {
            Some(effective) => Transition::to(Honours)
                .with_effect(Effect::AcademicStanding { standing, effective }),
            None => Transition::stay(AcademicStanding, false).with_effect(
                Effect::AcademicStanding {
                    standing,
                    effective: None,
                },
            ),
        };
    }
    if let Some(effective) = effective_date(chunk) {
        return Transition::to(Honours).with_effect(Effect::StandingEffective(effective));
    }

    if chunk.contains("Term Honours") || is_section_boundary(chunk, config) {
        let next = if chunk.contains("Term Honours") {
            Honours
        } else {
            StartTerm
        };
        Transition::redispatch(next)
    } else {
        Transition::stay(AcademicStanding, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParseState::*;

    fn step(state: ParseState, paused: bool, chunk: &str) -> Transition {
        transition(state, paused, chunk, &TranscriptConfig::default()).unwrap()
    }

    #[test]
    fn test_waiting_ignores_preamble() {
        let t = step(Waiting, false, "University of Waterloo");
        assert_eq!(t.next, Waiting);
        let t = step(Waiting, false, "Undergraduate Unofficial Transcript");
        assert_eq!(t.next, StudentInfo);
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn test_student_fields() {
        let t = step(StudentInfo, false, "Name: Jane Doe");
        assert_eq!(t.next, StudentId);
        assert_eq!(t.effect, Effect::StudentName("Jane Doe".to_string()));

        let t = step(StudentId, false, "Student ID: 12345678");
        assert_eq!(t.effect, Effect::StudentId(12345678));

        let t = step(Oen, false, "Ontario Education Nbr: 999999999");
        assert_eq!(t.next, StartTerm);
        assert_eq!(t.effect, Effect::StudentOen(999999999));
    }

    #[test]
    fn test_student_id_mismatch() {
        let err = transition(
            StudentId,
            false,
            "Ontario Education Nbr: 999999999",
            &TranscriptConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::StructuralMismatch {
                expected: "Student ID",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_chunks_are_skipped() {
        let t = step(TermGpa, true, "  ");
        assert_eq!(t, Transition::stay(TermGpa, true));
        let t = step(StudentId, false, "");
        assert_eq!(t.next, StudentId);
    }

    #[test]
    fn test_course_name_gate() {
        let t = step(CourseName, true, "Course");
        assert_eq!((t.next, t.paused), (CourseName, true));
        let t = step(CourseName, true, "Grade");
        assert_eq!((t.next, t.paused), (CourseName, false));
        assert_eq!(t.effect, Effect::None);
        let t = step(CourseName, false, "CS");
        assert_eq!(t.next, CourseCode);
        assert_eq!(t.effect, Effect::OpenCourse("CS".to_string()));
    }

    #[test]
    fn test_full_course_id_skips_code() {
        let t = step(CourseName, false, "CS 135");
        assert_eq!(t.next, CourseDesc);
    }

    #[test]
    fn test_numeric_dispatch_in_credit_columns() {
        let t = step(CourseDesc, false, "0.50");
        assert!(t.redispatch);
        assert_eq!(t.next, CreditAttempt);
        assert_eq!(t.effect, Effect::None);

        let t = step(CreditAttempt, false, "0.50");
        assert_eq!(t.effect, Effect::CreditWorth(0.5));
        let t = step(CreditAttempt, false, "CR");
        assert!(t.redispatch);
        assert_eq!(t.next, CreditEarned);
    }

    #[test]
    fn test_credit_grade_cues() {
        assert_eq!(step(CreditGrade, false, "MATH").next, CourseName);
        let t = step(CreditGrade, false, "In GPA");
        assert!(t.redispatch && t.paused);
        assert_eq!(t.next, TermGpa);
        assert_eq!(step(CreditGrade, false, "Milestones").next, Milestones);
        assert_eq!(
            step(CreditGrade, false, "End of Undergraduate Unofficial Transcript").next,
            Done
        );
        assert_eq!(step(CreditGrade, false, "Winter 2020").next, StartTerm);
    }

    #[test]
    fn test_credit_grade_appends_description() {
        let t = step(CreditGrade, false, " Programs (Not in Avg) ");
        assert_eq!(t.next, CreditGrade);
        assert_eq!(
            t.effect,
            Effect::AppendDescription {
                text: "Programs (Not in Avg)".to_string(),
                not_in_average: true,
            }
        );
    }

    #[test]
    fn test_grade_sentinels() {
        for grade in ["CR", "WD", "INC", "DNW"] {
            let t = step(CreditGrade, false, grade);
            assert_eq!(t.next, CreditGrade);
            assert!(!t.redispatch);
            assert_eq!(
                t.effect,
                Effect::Grade {
                    raw: grade.to_string(),
                    numeric: 0.0,
                    sentinel: true,
                }
            );
        }
        // Not a sentinel: the next course starts.
        assert_eq!(step(CreditGrade, false, "STAT").next, CourseName);
    }

    #[test]
    fn test_course_row_cut_short_by_cue() {
        let t = step(CourseCode, false, "Term GPA");
        assert!(t.redispatch && t.paused);
        assert_eq!(t.next, TermGpa);
        assert_eq!(t.effect, Effect::None);

        let t = step(CourseDesc, false, "Milestones");
        assert!(t.redispatch);
        assert_eq!(t.next, Milestones);

        assert_eq!(step(CourseCode, false, "Winter 2020").next, StartTerm);
        assert_eq!(step(CourseCode, false, "135").next, CourseDesc);
    }

    #[test]
    fn test_term_gpa_gate() {
        let t = step(TermGpa, true, "In GPA");
        assert_eq!((t.next, t.paused), (TermGpa, true));
        let t = step(TermGpa, true, "Term GPA");
        assert_eq!((t.next, t.paused), (TermGpa, false));
        let t = step(TermGpa, false, "3.50");
        assert_eq!(t.next, TermTotalInGpa);
        assert_eq!(t.effect, Effect::TermGpa(3.5));
    }

    #[test]
    fn test_totals_block_yields_to_section_boundary() {
        let t = step(TermGpa, true, "Milestones");
        assert!(t.redispatch);
        assert_eq!(t.next, StartTerm);

        let t = step(TermTotalInGpa, false, "End of Undergraduate Unofficial Transcript");
        assert!(t.redispatch);
        assert_eq!(t.next, StartTerm);

        let t = step(CumulativeGpa, false, "Winter 2020");
        assert!(t.redispatch);
        assert_eq!(t.next, StartTerm);

        let t = step(TermTotalEarned, false, "Term Totals");
        assert_eq!(t, Transition::stay(TermTotalEarned, false));
    }

    #[test]
    fn test_cumulative_earned_branches() {
        let t = step(CumulativeTotalEarned, false, "2.00");
        assert_eq!(t.next, CumulativeTotalEarned);
        assert!(!t.redispatch);

        let t = step(CumulativeTotalEarned, false, "Academic Standing: Good Standing");
        assert_eq!(t.next, AcademicStanding);
        assert!(t.redispatch);

        let t = step(CumulativeTotalEarned, false, "Winter 2020");
        assert_eq!(t.next, StartTerm);
        assert!(t.redispatch);
    }

    #[test]
    fn test_academic_standing_needs_effective() {
        let t = step(AcademicStanding, false, "Academic Standing: Good Standing");
        assert_eq!(t.next, AcademicStanding);
        let t = step(AcademicStanding, false, "");
        assert_eq!(t.next, AcademicStanding);
        let t = step(AcademicStanding, false, "Effective 05/01/2020");
        assert_eq!(t.next, Honours);
        assert_eq!(
            t.effect,
            Effect::StandingEffective(NaiveDate::from_ymd_opt(2020, 5, 1))
        );
    }

    #[test]
    fn test_standing_with_date_on_one_line() {
        let t = step(
            AcademicStanding,
            false,
            "Academic Standing: Good Standing Effective 05/01/2020",
        );
        assert_eq!(t.next, Honours);
        assert_eq!(
            t.effect,
            Effect::AcademicStanding {
                standing: "Good Standing".to_string(),
                effective: NaiveDate::from_ymd_opt(2020, 5, 1),
            }
        );
    }

    #[test]
    fn test_honours_exits() {
        assert_eq!(step(Honours, false, " ").next, StartTerm);
        let t = step(Honours, false, "Term Honours: Dean's Honours List");
        assert_eq!(t.next, Honours);
        assert_eq!(t.effect, Effect::Honours("Dean's Honours List".to_string()));
        assert_eq!(step(Honours, false, "Effective 05/01/2020").next, StartTerm);
        let t = step(Honours, false, "Winter 2020");
        assert!(t.redispatch);
        assert_eq!(t.next, StartTerm);
    }

    #[test]
    fn test_side_sections() {
        assert_eq!(step(StartTerm, false, "Milestones").next, Milestones);
        assert_eq!(step(Milestones, false, "Bachelor's Thesis").next, Milestones);
        assert_eq!(
            step(Milestones, false, "Scholarships and Awards").next,
            Scholarships
        );
        assert_eq!(
            step(Scholarships, false, "End of Undergraduate Unofficial Transcript").next,
            Done
        );
        assert_eq!(step(Done, false, "anything").next, Done);
    }
}
