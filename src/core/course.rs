//! Course definition document (`config.json` next to the course content).

use crate::error::{CourseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const COURSE_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseConfig {
    pub name: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub title: String,
    pub number: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub title: String,
    pub number: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub sublessons: Vec<Sublesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sublesson {
    pub title: String,
    pub number: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub exercises: Vec<PracticeItem>,
    #[serde(default)]
    pub quiz: Vec<PracticeItem>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AnswerType {
    #[default]
    SubStringMatch,
}

/// An exercise or quiz question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeItem {
    pub title: String,
    pub number: u32,
    #[serde(default)]
    pub skippable: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub did_skip: Option<bool>,
    #[serde(default)]
    pub answer_type: AnswerType,
    #[serde(default)]
    pub answers: Vec<String>,
}

/// The first incomplete module, lesson and sublesson.
#[derive(Debug, Clone, Copy)]
pub struct CurrentPosition<'a> {
    pub module: &'a Module,
    pub lesson: &'a Lesson,
    pub sublesson: &'a Sublesson,
}

impl CourseConfig {
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(COURSE_CONFIG_FILE);
        if !path.is_file() {
            return Err(CourseError::FileNotFound { path });
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Linear scan, first match wins at every level.
    pub fn current_position(&self) -> Option<CurrentPosition<'_>> {
        self.modules
            .iter()
            .filter(|module| !module.completed)
            .find_map(|module| {
                module
                    .lessons
                    .iter()
                    .filter(|lesson| !lesson.completed)
                    .find_map(|lesson| {
                        lesson
                            .sublessons
                            .iter()
                            .find(|sublesson| !sublesson.completed)
                            .map(|sublesson| CurrentPosition {
                                module,
                                lesson,
                                sublesson,
                            })
                    })
            })
    }
}
