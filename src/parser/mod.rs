//! Finite-state transcript parser.
//!
//! The parser consumes the chunk stream one chunk at a time. Each chunk is run
//! through [`transition`]; when a transition asks for re-dispatch the same
//! chunk is fed to the new state, up to
//! [`TranscriptConfig::max_redispatch`] times.
//!
//! ```text
//! Waiting → StudentInfo → StudentId → Oen → StartTerm → Program → Status
//!   → CourseName → CourseCode → CourseDesc → CreditAttempt → CreditEarned
//!   → CreditGrade ─┬→ CourseName (next course)
//!                  └→ TermGpa → TermTotalInGpa → TermTotalEarned
//!                       → CumulativeGpa → CumulativeTotalInGpa
//!                       → CumulativeTotalEarned ─┬→ StartTerm
//!                                                └→ AcademicStanding → Honours → StartTerm
//! StartTerm / CreditGrade → Milestones → Scholarships → Done
//! ```

pub mod patterns;
pub mod state;

pub use state::{transition, Effect, ParseState, Transition};

use crate::config::TranscriptConfig;
use crate::error::{Error, Result};
use crate::transcript::{CourseRecord, TermRecord, TranscriptRecord};

/// Stateful reader for one transcript.
///
/// Each parse owns its record; create a new parser per document. Dropping a
/// parser abandons the parse.
///
/// # Example
///
/// ```
/// use transcript_oxide::parser::TranscriptParser;
///
/// let mut parser = TranscriptParser::new();
/// parser.read("Undergraduate Unofficial Transcript")?;
/// parser.read("Name: Jane Doe")?;
/// assert!(parser.finalize().is_err());
/// # Ok::<(), transcript_oxide::error::Error>(())
/// ```
#[derive(Debug)]
pub struct TranscriptParser {
    config: TranscriptConfig,
    state: ParseState,
    paused: bool,
    record: TranscriptRecord,
    failure: Option<Failure>,
}

/// Error that poisoned a parse, replayed on every later call.
#[derive(Debug, Clone)]
enum Failure {
    Mismatch {
        expected: &'static str,
        found: String,
    },
    Redispatch {
        state: ParseState,
        chunk: String,
    },
}

impl Failure {
    fn from_error(err: &Error) -> Option<Self> {
        match err {
            Error::StructuralMismatch { expected, found } => Some(Failure::Mismatch {
                expected: *expected,
                found: found.clone(),
            }),
            Error::RedispatchLimit { state, chunk } => Some(Failure::Redispatch {
                state: *state,
                chunk: chunk.clone(),
            }),
            _ => None,
        }
    }

    fn to_error(&self) -> Error {
        match self {
            Failure::Mismatch { expected, found } => Error::StructuralMismatch {
                expected: *expected,
                found: found.clone(),
            },
            Failure::Redispatch { state, chunk } => Error::RedispatchLimit {
                state: *state,
                chunk: chunk.clone(),
            },
        }
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptParser {
    /// Create a parser with the default markers.
    pub fn new() -> Self {
        Self::with_config(TranscriptConfig::default())
    }

    /// Create a parser with custom markers and limits.
    pub fn with_config(config: TranscriptConfig) -> Self {
        Self {
            config,
            state: ParseState::Waiting,
            paused: false,
            record: TranscriptRecord::new(),
            failure: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// The record built so far.
    pub fn record(&self) -> &TranscriptRecord {
        &self.record
    }

    /// True once the end-of-document marker has been seen.
    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Consume one chunk.
    ///
    /// # Errors
    ///
    /// - [`Error::StructuralMismatch`] if a required field is malformed.
    /// - [`Error::RedispatchLimit`] if the chunk bounces between states
    ///   more than the configured limit.
    ///
    /// Either error poisons the parser: every later call fails the same way.
    pub fn read(&mut self, chunk: &str) -> Result<()> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }

        let result = self.step(chunk);
        if let Err(err) = &result {
            log::warn!("Parse failed: {}", err);
            self.failure = Failure::from_error(err);
        }
        result
    }

    fn step(&mut self, chunk: &str) -> Result<()> {
        let mut hops = 0;
        loop {
            let t = transition(self.state, self.paused, chunk, &self.config)?;

            if t.next != self.state {
                log::trace!("{:?} -> {:?} on '{}'", self.state, t.next, chunk);
            }
            self.apply(t.effect);
            self.state = t.next;
            self.paused = t.paused;

            if !t.redispatch {
                return Ok(());
            }
            hops += 1;
            if hops > self.config.max_redispatch {
                return Err(Error::RedispatchLimit {
                    state: self.state,
                    chunk: chunk.to_string(),
                });
            }
        }
    }

    /// Consume every chunk in order.
    pub fn read_all<I, S>(&mut self, chunks: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for chunk in chunks {
            self.read(chunk.as_ref())?;
        }
        Ok(())
    }

    /// Finish the parse and hand over the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteParse`] if the end-of-document marker was
    /// never reached, or the poisoning error if a read failed.
    pub fn finalize(self) -> Result<TranscriptRecord> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        if self.state != ParseState::Done {
            return Err(Error::IncompleteParse { state: self.state });
        }
        log::debug!(
            "Parsed transcript for student {}: {} terms, {} courses",
            self.record.student_id,
            self.record.terms.len(),
            self.record.course_count()
        );
        Ok(self.record)
    }

    /// Parse a whole chunk sequence with a fresh parser.
    pub fn parse<I, S>(config: TranscriptConfig, chunks: I) -> Result<TranscriptRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::with_config(config);
        parser.read_all(chunks)?;
        parser.finalize()
    }

    fn apply(&mut self, effect: Effect) {
        let record = &mut self.record;
        match effect {
            Effect::None => {},
            Effect::StudentName(name) => record.student_name = name,
            Effect::StudentId(id) => record.student_id = id,
            Effect::StudentOen(oen) => record.student_oen = oen,
            Effect::OpenTerm(label) => {
                log::debug!("Term {} opened", label);
                record.terms.push(TermRecord::new(label));
            },
            Effect::OpenCourse(id) => match record.current_term_mut() {
                Some(term) => term.courses.push(CourseRecord::new(id)),
                None => log::warn!("Course '{}' outside of any term", id),
            },
            Effect::AppendProgram(_)
            | Effect::Status { .. }
            | Effect::TermGpa(_)
            | Effect::TermTotalCredits(_)
            | Effect::TermEarnedCredits(_)
            | Effect::CumulativeGpa(_)
            | Effect::CumulativeTotalCredits(_)
            | Effect::CumulativeEarnedCredits(_)
            | Effect::AcademicStanding { .. }
            | Effect::StandingEffective(_)
            | Effect::Honours(_) => match record.current_term_mut() {
                Some(term) => apply_to_term(term, effect),
                None => log::warn!("Term field outside of any term: {:?}", effect),
            },
            _ => match record.current_course_mut() {
                Some(course) => apply_to_course(course, effect),
                None => log::warn!("Course field outside of any course: {:?}", effect),
            },
        }
    }
}

fn append_text(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

fn apply_to_term(term: &mut TermRecord, effect: Effect) {
    match effect {
        Effect::AppendProgram(text) => append_text(&mut term.program, &text),
        Effect::Status {
            level,
            load,
            form_of_study,
        } => {
            term.is_work_term = form_of_study.contains("Work");
            term.is_study_term = form_of_study.contains("Enrollment");
            term.level = level;
            term.load = load;
            term.form_of_study = form_of_study;
        },
        Effect::TermGpa(n) => term.term_gpa = n,
        Effect::TermTotalCredits(n) => term.term_total_credits = n,
        Effect::TermEarnedCredits(n) => term.term_earned_credits = n,
        Effect::CumulativeGpa(n) => term.cumulative_gpa = n,
        Effect::CumulativeTotalCredits(n) => term.cumulative_total_credits = n,
        Effect::CumulativeEarnedCredits(n) => term.cumulative_earned_credits = n,
        Effect::AcademicStanding {
            standing,
            effective,
        } => {
            term.academic_standing = standing;
            if effective.is_some() {
                term.standing_effective = effective;
            }
        },
        Effect::StandingEffective(date) => term.standing_effective = date,
        Effect::Honours(honours) => term.honours = honours,
        _ => {},
    }
}

fn apply_to_course(course: &mut CourseRecord, effect: Effect) {
    match effect {
        Effect::AppendCourseCode(code) => append_text(&mut course.id, &code),
        Effect::Description {
            text,
            not_in_average,
        } => {
            course.description = text;
            if not_in_average {
                course.in_average = false;
            }
        },
        Effect::AppendDescription {
            text,
            not_in_average,
        } => {
            append_text(&mut course.description, &text);
            if not_in_average {
                course.in_average = false;
            }
        },
        Effect::CreditWorth(n) => course.credit_worth = n,
        Effect::CreditEarned(n) => course.credit_earned = n,
        Effect::Grade {
            raw,
            numeric,
            sentinel,
        } => {
            if sentinel {
                if course.grade.trim().parse::<f64>().is_ok() {
                    log::debug!("Keeping numeric grade {} over '{}'", course.grade, raw);
                    return;
                }
                course.in_average = false;
            }
            course.grade = raw;
            course.numeric_grade = numeric;
        },
        _ => {},
    }
}
