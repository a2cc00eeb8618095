use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single extracted row: field name → numeric value, in field order.
///
/// Renderers read points positionally (`x` before `y`), so this is a small
/// ordered map rather than a hash map. Values from unparseable cells are the
/// NaN sentinel, which serializes as JSON `null`; renderers treat those
/// points as gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, f64)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`. An existing field keeps its position and gets
    /// the new value.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            if value.is_finite() {
                map.serialize_entry(name, value)?;
            } else {
                map.serialize_entry(name, &Option::<f64>::None)?;
            }
        }
        map.end()
    }
}

/// The ordered sequence of records handed to a chart renderer, one per data
/// row.
pub type Dataset = Vec<Record>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_insertion_order() {
        let mut record = Record::new();
        record.set("y", 2.0);
        record.set("x", 1.0);
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["y", "x"]);
    }

    #[test]
    fn set_existing_field_keeps_position() {
        let mut record = Record::new();
        record.set("x", 1.0);
        record.set("y", 2.0);
        record.set("x", 9.0);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("x"), Some(9.0));
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn get_missing_field_is_none() {
        let record = Record::new();
        assert_eq!(record.get("x"), None);
    }

    #[test]
    fn serializes_in_field_order() {
        let mut record = Record::new();
        record.set("x", 0.0);
        record.set("y", 1.5);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"x":0.0,"y":1.5}"#);
    }

    #[test]
    fn nan_serializes_as_null() {
        let mut record = Record::new();
        record.set("x", 1.0);
        record.set("y", f64::NAN);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":null}"#);
    }
}
