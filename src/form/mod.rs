//! Form input: raw field values, validation, and the `/predict` payload.
//!
//! The form has one free-text identifier and five numeric fields. Values
//! arrive as the strings the user typed; [`validate`] converts them and
//! produces a [`PredictionRequest`] only when every field is usable.

pub mod numeric;

use serde::{Deserialize, Serialize};

use numeric::{IntPrefixError, parse_float_prefix, parse_int_prefix};

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The six inputs of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StudentId,
    Attendance,
    InternalTest1,
    InternalTest2,
    Assignment,
    StudyHours,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::StudentId,
        Field::Attendance,
        Field::InternalTest1,
        Field::InternalTest2,
        Field::Assignment,
        Field::StudyHours,
    ];

    /// Key used in the `/predict` JSON body.
    pub fn wire_key(self) -> &'static str {
        match self {
            Self::StudentId => "student_id",
            Self::Attendance => "Attendance",
            Self::InternalTest1 => "Internal Test 1",
            Self::InternalTest2 => "Internal Test 2",
            Self::Assignment => "Assignment",
            Self::StudyHours => "Study Hours",
        }
    }

    /// `name` attribute of the matching `<input>` on the form page.
    pub fn form_name(self) -> &'static str {
        match self {
            Self::StudentId => "studentId",
            Self::Attendance => "attendance",
            Self::InternalTest1 => "test1",
            Self::InternalTest2 => "test2",
            Self::Assignment => "assignment",
            Self::StudyHours => "studyHours",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::StudentId => "Student ID",
            Self::Attendance => "Attendance (%)",
            Self::InternalTest1 => "Internal Test 1",
            Self::InternalTest2 => "Internal Test 2",
            Self::Assignment => "Assignment",
            Self::StudyHours => "Study Hours",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw values
// ---------------------------------------------------------------------------

/// Field values exactly as entered, before any conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub student_id: String,
    pub attendance: String,
    pub test1: String,
    pub test2: String,
    pub assignment: String,
    pub study_hours: String,
}

impl FormValues {
    /// Build from `(name, value)` pairs keyed by [`Field::form_name`].
    ///
    /// Unknown names are ignored; a missing field stays empty. When a name
    /// repeats, the last value wins.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = Self::default();
        for (name, value) in pairs {
            let Some(field) = Field::ALL.iter().find(|f| f.form_name() == name.as_ref()) else {
                continue;
            };
            *values.slot_mut(*field) = value.into();
        }
        values
    }

    /// Raw value of one field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StudentId => &self.student_id,
            Field::Attendance => &self.attendance,
            Field::InternalTest1 => &self.test1,
            Field::InternalTest2 => &self.test2,
            Field::Assignment => &self.assignment,
            Field::StudyHours => &self.study_hours,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::StudentId => &mut self.student_id,
            Field::Attendance => &mut self.attendance,
            Field::InternalTest1 => &mut self.test1,
            Field::InternalTest2 => &mut self.test2,
            Field::Assignment => &mut self.assignment,
            Field::StudyHours => &mut self.study_hours,
        }
    }
}

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// JSON body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub student_id: String,
    #[serde(rename = "Attendance")]
    pub attendance: f64,
    #[serde(rename = "Internal Test 1")]
    pub internal_test_1: i64,
    #[serde(rename = "Internal Test 2")]
    pub internal_test_2: i64,
    #[serde(rename = "Assignment")]
    pub assignment: i64,
    #[serde(rename = "Study Hours")]
    pub study_hours: f64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single field that blocks submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{} is required", Field::StudentId.label())]
    MissingStudentId,
    #[error("{} is not a number: '{raw}'", .field.label())]
    NotANumber { field: Field, raw: String },
    #[error("{} is too large: '{raw}'", .field.label())]
    OutOfRange { field: Field, raw: String },
}

impl FieldError {
    /// The field this error refers to.
    pub fn field(&self) -> Field {
        match self {
            Self::MissingStudentId => Field::StudentId,
            Self::NotANumber { field, .. } | Self::OutOfRange { field, .. } => *field,
        }
    }
}

/// Convert and check every field.
///
/// The identifier only has to be non-empty. Numeric fields only have to
/// start with a number; no range checks are applied, though an integer
/// that does not fit an `i64` is rejected as out of range. All problems are
/// reported, in form order.
pub fn validate(values: &FormValues) -> Result<PredictionRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    if values.student_id.is_empty() {
        errors.push(FieldError::MissingStudentId);
    }

    let attendance = float_field(values, Field::Attendance, &mut errors);
    let test1 = int_field(values, Field::InternalTest1, &mut errors);
    let test2 = int_field(values, Field::InternalTest2, &mut errors);
    let assignment = int_field(values, Field::Assignment, &mut errors);
    let study_hours = float_field(values, Field::StudyHours, &mut errors);

    match (attendance, test1, test2, assignment, study_hours) {
        (Some(attendance), Some(test1), Some(test2), Some(assignment), Some(study_hours))
            if errors.is_empty() =>
        {
            Ok(PredictionRequest {
                student_id: values.student_id.clone(),
                attendance,
                internal_test_1: test1,
                internal_test_2: test2,
                assignment,
                study_hours,
            })
        }
        _ => Err(errors),
    }
}

fn float_field(values: &FormValues, field: Field, errors: &mut Vec<FieldError>) -> Option<f64> {
    let raw = values.get(field);
    let parsed = parse_float_prefix(raw);
    if parsed.is_none() {
        errors.push(FieldError::NotANumber {
            field,
            raw: raw.to_string(),
        });
    }
    parsed
}

fn int_field(values: &FormValues, field: Field, errors: &mut Vec<FieldError>) -> Option<i64> {
    let raw = values.get(field);
    match parse_int_prefix(raw) {
        Ok(value) => Some(value),
        Err(IntPrefixError::NoDigits) => {
            errors.push(FieldError::NotANumber {
                field,
                raw: raw.to_string(),
            });
            None
        }
        Err(IntPrefixError::Overflow) => {
            errors.push(FieldError::OutOfRange {
                field,
                raw: raw.to_string(),
            });
            None
        }
    }
}
