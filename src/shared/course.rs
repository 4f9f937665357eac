//! Course catalog and storage encoding.
//!
//! Users pick any subset of the known courses on the profile edit form. The
//! domain model carries the selection as a `Vec<Course>`; the database row
//! stores it as a single semicolon-delimited string with a reserved sentinel
//! for "nothing selected". The string form exists only at the storage
//! boundary.
//!
//! This is a denormalized multi-valued-attribute-as-string design: there is
//! no referential integrity against a course catalog table, and renaming a
//! label orphans previously stored rows. Unknown labels are dropped on
//! decode.

/// Reserved value stored when no course is selected, distinct from an empty
/// string.
pub const NOT_INFORMED: &str = "Not Informed";

/// Delimiter between course labels in the stored string.
const DELIMITER: char = ';';

/// A course offering a user can flag on their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Course {
    Excel,
    Vba,
    PowerBi,
    Python,
    Sql,
}

impl Course {
    /// Every known course, in form/display order.
    pub const ALL: [Course; 5] = [
        Course::Excel,
        Course::Vba,
        Course::PowerBi,
        Course::Python,
        Course::Sql,
    ];

    /// Human-readable label, also the token stored in the database.
    pub fn label(self) -> &'static str {
        match self {
            Course::Excel => "Excel",
            Course::Vba => "VBA",
            Course::PowerBi => "Power BI",
            Course::Python => "Python",
            Course::Sql => "SQL",
        }
    }

    /// Name of the boolean form field that toggles this course.
    pub fn field_name(self) -> &'static str {
        match self {
            Course::Excel => "curso_excel",
            Course::Vba => "curso_vba",
            Course::PowerBi => "curso_powerbi",
            Course::Python => "curso_python",
            Course::Sql => "curso_sql",
        }
    }

    /// Look up a course by its stored label.
    pub fn from_label(label: &str) -> Option<Course> {
        Course::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Look up a course by its form field name.
    pub fn from_field_name(name: &str) -> Option<Course> {
        Course::ALL.into_iter().find(|c| c.field_name() == name)
    }
}

/// Encode a course selection for storage.
///
/// Labels are joined with `;`; an empty selection encodes to the
/// [`NOT_INFORMED`] sentinel.
pub fn encode(courses: &[Course]) -> String {
    if courses.is_empty() {
        return NOT_INFORMED.to_string();
    }
    courses
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Decode a stored course string back into the selection.
///
/// The sentinel decodes to the empty selection. Tokens that no longer match
/// a known label are dropped.
pub fn decode(stored: &str) -> Vec<Course> {
    if stored.split(DELIMITER).any(|token| token == NOT_INFORMED) {
        return Vec::new();
    }
    stored
        .split(DELIMITER)
        .filter_map(Course::from_label)
        .collect()
}
