//! Checks a learner's practice document against the current sublesson's
//! exercises.

use crate::core::course::{AnswerType, CourseConfig, PracticeItem};
use crate::core::report::ReportSink;
use crate::error::{CourseError, Result};
use std::fmt;
use std::path::Path;

pub const PRACTICE_DIR: &str = "practice";
pub const EXERCISES_FILE: &str = "exercises.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseStatus {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for ExerciseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExerciseStatus::Pass => "PASS",
            ExerciseStatus::Fail => "FAIL",
            ExerciseStatus::Skip => "SKIP",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseResult {
    pub title: String,
    pub status: ExerciseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentTitles {
    pub module: String,
    pub lesson: String,
    pub sublesson: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub course_name: String,
    /// `None` once every sublesson is marked completed.
    pub current: Option<CurrentTitles>,
    pub results: Vec<ExerciseResult>,
}

impl ProgressReport {
    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.status == ExerciseStatus::Pass)
            .count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// The report as printed, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Determining course progress...".to_string(),
            format!("Course name: '{}'", self.course_name),
        ];

        let Some(current) = &self.current else {
            lines.push("All course content is completed.".to_string());
            return lines;
        };

        lines.push(format!("Current Module: '{}'", current.module));
        lines.push(format!("Current Lesson: '{}'", current.lesson));
        lines.push(format!("Current Sublesson: '{}'", current.sublesson));
        lines.push(format!("Verifying Sublesson: {}", current.sublesson));
        lines.push("Exercise results:".to_string());
        lines.extend(
            self.results
                .iter()
                .enumerate()
                .map(|(i, result)| format!("{}. {}", i + 1, result.status)),
        );
        lines.push(format!("Completed: {}/{}", self.passed(), self.total()));
        lines
    }

    pub fn write_to(&self, sink: &mut dyn ReportSink) {
        for line in self.lines() {
            sink.info(&line);
        }
    }
}

/// Loads `<dir>/config.json` and `<dir>/practice/exercises.md` and grades
/// the current sublesson. Neither document is modified.
pub fn verify_practice_content(dir: &Path) -> Result<ProgressReport> {
    let practice_dir = dir.join(PRACTICE_DIR);
    if !practice_dir.is_dir() {
        return Err(CourseError::PracticeDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let course = CourseConfig::load(dir)?;

    let exercises_path = practice_dir.join(EXERCISES_FILE);
    if !exercises_path.is_file() {
        return Err(CourseError::FileNotFound {
            path: exercises_path,
        });
    }
    let document = std::fs::read_to_string(&exercises_path)?;

    Ok(build_report(&course, &document))
}

pub fn build_report(course: &CourseConfig, document: &str) -> ProgressReport {
    let Some(position) = course.current_position() else {
        return ProgressReport {
            course_name: course.name.clone(),
            current: None,
            results: Vec::new(),
        };
    };

    tracing::debug!(
        sublesson = %position.sublesson.title,
        exercises = position.sublesson.exercises.len(),
        "grading sublesson"
    );

    let results = position
        .sublesson
        .exercises
        .iter()
        .map(|exercise| ExerciseResult {
            title: exercise.title.clone(),
            status: classify(exercise, document),
        })
        .collect();

    ProgressReport {
        course_name: course.name.clone(),
        current: Some(CurrentTitles {
            module: position.module.title.clone(),
            lesson: position.lesson.title.clone(),
            sublesson: position.sublesson.title.clone(),
        }),
        results,
    }
}

pub fn classify(item: &PracticeItem, document: &str) -> ExerciseStatus {
    if item.skippable && !is_attempted(item, document) {
        ExerciseStatus::Skip
    } else if matches_answer(item, document) {
        ExerciseStatus::Pass
    } else {
        ExerciseStatus::Fail
    }
}

fn matches_answer(item: &PracticeItem, document: &str) -> bool {
    match item.answer_type {
        AnswerType::SubStringMatch => item
            .answers
            .iter()
            .any(|answer| document.contains(answer.as_str())),
    }
}

/// An answer like `Link(2): https://github.com` has the label `Link(2):`.
/// The exercise counts as attempted when some line starts with a label and
/// has text after it.
fn is_attempted(item: &PracticeItem, document: &str) -> bool {
    if item.did_skip == Some(true) {
        return false;
    }

    let labels: Vec<&str> = item
        .answers
        .iter()
        .filter_map(|answer| answer.find(':').map(|end| &answer[..=end]))
        .collect();

    if labels.is_empty() {
        return matches_answer(item, document);
    }

    document.lines().map(str::trim_start).any(|line| {
        labels.iter().any(|label| {
            line.strip_prefix(label)
                .is_some_and(|rest| !rest.trim().is_empty())
        })
    })
}
