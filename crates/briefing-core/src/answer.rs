use serde::Serialize;
use std::collections::BTreeMap;

/// One extracted answer. Serializes untagged so the JSON shapes stay
/// `null` / string / array, matching what form consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Null,
    Text(String),
    Choice(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AnswerValue::Null)
    }
}

/// Field name to extracted value, rebuilt fresh on every extraction.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// Final payload handed to the submission callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormAnswers {
    pub request_answers: AnswerMap,
    pub user_answers: AnswerMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_serialization_shapes() {
        assert_eq!(serde_json::to_value(AnswerValue::Null).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(AnswerValue::Text("oi".into())).unwrap(),
            json!("oi")
        );
        assert_eq!(
            serde_json::to_value(AnswerValue::Choice("Homem".into())).unwrap(),
            json!("Homem")
        );
        assert_eq!(
            serde_json::to_value(AnswerValue::Choices(vec!["1".into(), "2".into()])).unwrap(),
            json!(["1", "2"])
        );
    }

    #[test]
    fn test_form_answers_uses_camel_case_keys() {
        let mut request_answers = AnswerMap::new();
        request_answers.insert("city".into(), AnswerValue::Text("Recife".into()));

        let answers = FormAnswers {
            request_answers,
            user_answers: AnswerMap::new(),
        };
        let value = serde_json::to_value(&answers).unwrap();
        assert_eq!(value["requestAnswers"]["city"], json!("Recife"));
        assert!(value["userAnswers"].as_object().unwrap().is_empty());
    }
}
