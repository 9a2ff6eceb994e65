use serde::{Deserialize, Serialize};

/// One student's stored data.
///
/// The roll number is the unique key of the record set. It is opaque text,
/// not guaranteed numeric. The three score fields are kept exactly as
/// entered; parsing them is the averaging worker's job, not the store's, so
/// a record with garbage in a score field is stored and listed like any
/// other.
///
/// Serde names follow the on-disk CSV header and the JSON wire shape
/// (`Rollno,name,english,maths,science`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Rollno")]
    pub roll_no: String,
    pub name: String,
    pub english: String,
    pub maths: String,
    pub science: String,
}

impl Record {
    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        english: impl Into<String>,
        maths: impl Into<String>,
        science: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            english: english.into(),
            maths: maths.into(),
            science: science.into(),
        }
    }
}

/// Partial form of a [`Record`] used for updates.
///
/// Fields present in the payload replace the stored value; absent fields
/// are kept as-is. The roll number is addressed separately (it is the key,
/// not updatable content).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub english: Option<String>,
    pub maths: Option<String>,
    pub science: Option<String>,
}

impl RecordUpdate {
    /// Merges the provided fields into `record`.
    pub fn apply(self, record: &mut Record) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(english) = self.english {
            record.english = english;
        }
        if let Some(maths) = self.maths {
            record.maths = maths;
        }
        if let Some(science) = self.science {
            record.science = science;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_replaces_only_provided_fields() {
        let mut record = Record::new("R1", "Ada", "60", "70", "80");
        let update = RecordUpdate {
            science: Some("95".to_owned()),
            ..RecordUpdate::default()
        };

        update.apply(&mut record);

        assert_eq!(record, Record::new("R1", "Ada", "60", "70", "95"));
    }

    #[test]
    fn record_serializes_with_the_wire_field_names() {
        let record = Record::new("R1", "Ada", "60", "70", "80");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["Rollno"], "R1");
        assert_eq!(value["name"], "Ada");
        assert!(value.get("roll_no").is_none());
    }
}
