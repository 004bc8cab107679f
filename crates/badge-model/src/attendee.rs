use serde::{Deserialize, Serialize};

/// A single attendee after splitting packed rows.
///
/// Fields default to empty text. `additional` is `None` whenever there is no
/// annotation to print, whether the column was missing from the input or the
/// cell was blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub first_name: String,
    pub last_name: String,
    pub organisation: String,
    pub additional: Option<String>,
}

impl AttendeeRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        organisation: impl Into<String>,
        additional: impl Into<String>,
    ) -> Self {
        let additional = additional.into();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            organisation: organisation.into(),
            additional: if additional.is_empty() {
                None
            } else {
                Some(additional)
            },
        }
    }

    /// Name as printed on the badge: `first last`, trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Annotation text, if there is any to print.
    pub fn annotation(&self) -> Option<&str> {
        self.additional.as_deref().filter(|value| !value.is_empty())
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.organisation.is_empty()
            && self.annotation().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_annotation_is_none() {
        let record = AttendeeRecord::new("Ada", "Lovelace", "Analytical Engines", "");
        assert_eq!(record.additional, None);
        assert_eq!(record.annotation(), None);
    }

    #[test]
    fn annotation_is_kept() {
        let record = AttendeeRecord::new("Ada", "Lovelace", "Analytical Engines", "Plenary");
        assert_eq!(record.annotation(), Some("Plenary"));
    }

    #[test]
    fn display_name_joins_and_trims() {
        assert_eq!(
            AttendeeRecord::new("Ada", "Lovelace", "", "").display_name(),
            "Ada Lovelace"
        );
        assert_eq!(AttendeeRecord::new("Ada", "", "", "").display_name(), "Ada");
        assert_eq!(AttendeeRecord::new("", "", "", "").display_name(), "");
    }

    #[test]
    fn blank_record() {
        assert!(AttendeeRecord::default().is_blank());
        assert!(!AttendeeRecord::new("", "", "", "Committee").is_blank());
    }

    #[test]
    fn serializes_field_names() {
        let record = AttendeeRecord::new("Ada", "Lovelace", "AE Ltd", "");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["organisation"], "AE Ltd");
        assert!(json["additional"].is_null());
    }
}
