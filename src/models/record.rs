//! Roster record types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An ordered field map, as consumed by the export encoders.
///
/// Built on `serde_json::Map` with the `preserve_order` feature, so column
/// order is the insertion order of the source record. Keeping rows as maps
/// (rather than structs) lets the encoders detect column-heterogeneous
/// input and report it as [`crate::Error::Format`].
pub type Row = serde_json::Map<String, Value>;

/// Role of a roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A student (the default for imported rows without a role).
    #[default]
    Student,
    /// A teacher.
    Teacher,
    /// An administrator.
    Admin,
}

impl Role {
    /// Returns all roles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Student, Self::Teacher, Self::Admin]
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    /// Parses a role string.
    ///
    /// Accepts the canonical English forms plus the Spanish forms used by
    /// legacy roster files. Returns `None` if the string is not recognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" | "estudiante" | "alumno" => Some(Self::Student),
            "teacher" | "profesor" | "profesora" => Some(Self::Teacher),
            "admin" | "administrador" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One roster entry: a user of the institute.
///
/// Records are created by the external persistence layer or by the CSV
/// importer; this crate never mutates or destroys a caller's collection.
/// Uniqueness is not enforced here, duplicates pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Display name.
    #[serde(alias = "nombre")]
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role within the institute.
    #[serde(default)]
    pub role: Role,
    /// Creation timestamp (RFC 3339 string, as stored by the backend).
    #[serde(default, alias = "createdAt")]
    pub created_at: String,
}

impl Record {
    /// Column names of a record, in declaration order.
    pub const FIELDS: [&'static str; 4] = ["name", "email", "role", "created_at"];

    /// Creates a record with the creation timestamp set to now.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            created_at: crate::current_timestamp(),
        }
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Converts the record into an ordered [`Row`] for export.
    ///
    /// Fields appear in [`Record::FIELDS`] order.
    #[must_use]
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("name".to_string(), Value::String(self.name.clone()));
        row.insert("email".to_string(), Value::String(self.email.clone()));
        row.insert(
            "role".to_string(),
            Value::String(self.role.as_str().to_string()),
        );
        row.insert(
            "created_at".to_string(),
            Value::String(self.created_at.clone()),
        );
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("student", Some(Role::Student); "english student")]
    #[test_case("estudiante", Some(Role::Student); "spanish student")]
    #[test_case("Profesor", Some(Role::Teacher); "spanish teacher capitalized")]
    #[test_case("TEACHER", Some(Role::Teacher); "uppercase teacher")]
    #[test_case("admin", Some(Role::Admin); "admin")]
    #[test_case("director", None; "unknown role")]
    fn test_role_parse(input: &str, expected: Option<Role>) {
        assert_eq!(Role::parse(input), expected);
    }

    #[test]
    fn test_role_default_is_student() {
        assert_eq!(Role::default(), Role::Student);
    }

    #[test]
    fn test_record_to_row_preserves_field_order() {
        let record = Record::new("Ana", "ana@inst.example", Role::Teacher);
        let row = record.to_row();

        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, Record::FIELDS);
        assert_eq!(row["role"], Value::String("teacher".to_string()));
    }

    #[test]
    fn test_record_deserializes_legacy_headers() {
        let json = r#"{"nombre": "Luis", "email": "luis@inst.example", "createdAt": "2024-01-01T00:00:00Z"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Luis");
        assert_eq!(record.role, Role::Student);
        assert_eq!(record.created_at, "2024-01-01T00:00:00Z");
    }
}
