//! Wire records for the people directory endpoint.

use serde::Deserialize;

/// One person record as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

impl PersonRecord {
    /// Default display projection: `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One page of the paginated `/users` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonPage {
    pub users: Vec<PersonRecord>,
    /// Total number of records on the remote side.
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_projection() {
        let record = PersonRecord {
            id: 7,
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
        };
        assert_eq!(record.full_name(), "Alice Smith");
    }

    #[test]
    fn test_deserializes_camel_case() {
        let record: PersonRecord = serde_json::from_str(
            r#"{"id": 1, "firstName": "Bob", "lastName": "Jones"}"#,
        )
        .expect("valid record");
        assert_eq!(record.full_name(), "Bob Jones");
    }
}
