use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record as read from an NDJSON file.
pub type Record = Map<String, Value>;

/// Operations the platform applies to an attribute during a partial update,
/// e.g. `{"count": {"_operation": "Increment", "value": 1}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltInOperation {
    Increment,
    Decrement,
    Add,
    Remove,
    AddUnique,
    IncrementFrom,
    IncrementSet,
}

impl BuiltInOperation {
    pub const ALL: [BuiltInOperation; 7] = [
        BuiltInOperation::Increment,
        BuiltInOperation::Decrement,
        BuiltInOperation::Add,
        BuiltInOperation::Remove,
        BuiltInOperation::AddUnique,
        BuiltInOperation::IncrementFrom,
        BuiltInOperation::IncrementSet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltInOperation::Increment => "Increment",
            BuiltInOperation::Decrement => "Decrement",
            BuiltInOperation::Add => "Add",
            BuiltInOperation::Remove => "Remove",
            BuiltInOperation::AddUnique => "AddUnique",
            BuiltInOperation::IncrementFrom => "IncrementFrom",
            BuiltInOperation::IncrementSet => "IncrementSet",
        }
    }

    pub fn is_allowed(op: &str) -> bool {
        Self::ALL.iter().any(|o| o.as_str() == op)
    }

    /// Comma-separated list for error messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchAction {
    AddObject,
    UpdateObject,
    PartialUpdateObject,
    PartialUpdateObjectNoCreate,
    DeleteObject,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    pub action: BatchAction,
    pub body: Record,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchWriteParams {
    pub requests: Vec<BatchRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_allowed() {
        assert!(BuiltInOperation::is_allowed("Increment"));
        assert!(BuiltInOperation::is_allowed("AddUnique"));
        assert!(!BuiltInOperation::is_allowed("increment"));
        assert!(!BuiltInOperation::is_allowed("Multiply"));
    }

    #[test]
    fn test_batch_action_wire_name() {
        let req = BatchRequest {
            action: BatchAction::PartialUpdateObjectNoCreate,
            body: Record::new(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"action":"partialUpdateObjectNoCreate","body":{}}"#
        );
    }
}
