use serde_json::Value;

use crate::{
    domain::{Homework, HomeworkBatch, HomeworkStatus},
    error::ResponseError,
};

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";
const STATUS_KEY: &str = "status";

/// Checks the top-level shape of an API payload before any field is read.
///
/// Entries are passed through untouched; only the one that gets formatted is
/// inspected. With `require_current_date` the cursor field becomes mandatory.
pub fn validate(raw: Value, require_current_date: bool) -> Result<HomeworkBatch, ResponseError> {
    tracing::debug!(target: "practicum", "validating API response");
    let mut body = match raw {
        Value::Object(body) => body,
        other => return Err(shape_error("API response", "object", &other)),
    };

    let mut missing = Vec::new();
    if !body.contains_key(HOMEWORKS_KEY) {
        missing.push(HOMEWORKS_KEY.to_string());
    }
    if require_current_date && !body.contains_key(CURRENT_DATE_KEY) {
        missing.push(CURRENT_DATE_KEY.to_string());
    }
    if !missing.is_empty() {
        return Err(ResponseError::MissingField {
            context: "API response",
            keys: missing,
        });
    }

    let current_date = match body.get(CURRENT_DATE_KEY) {
        None => None,
        Some(value) => Some(
            value
                .as_i64()
                .ok_or_else(|| shape_error("current_date", "integer", value))?,
        ),
    };

    let homeworks = match body.remove(HOMEWORKS_KEY) {
        Some(Value::Array(items)) => items,
        Some(other) => return Err(shape_error("homeworks", "array", &other)),
        None => Vec::new(),
    };

    tracing::debug!(target: "practicum", count = homeworks.len(), ?current_date, "response is valid");
    Ok(HomeworkBatch {
        homeworks,
        current_date,
    })
}

/// Builds the notification text for one homework entry.
pub fn format_status(entry: &Value, name_key: &str) -> Result<String, ResponseError> {
    let homework: &Homework = entry
        .as_object()
        .ok_or_else(|| shape_error("homework entry", "object", entry))?;

    let missing: Vec<String> = [name_key, STATUS_KEY]
        .into_iter()
        .filter(|key| !homework.contains_key(*key))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ResponseError::MissingField {
            context: "homework entry",
            keys: missing,
        });
    }

    let name = &homework[name_key];
    let name = name
        .as_str()
        .ok_or_else(|| shape_error("homework name", "string", name))?;

    let status: HomeworkStatus = match &homework[STATUS_KEY] {
        Value::String(raw) => raw.parse()?,
        other => return Err(ResponseError::UnknownStatus(other.to_string())),
    };
    tracing::debug!(target: "practicum", homework = name, %status, "homework status parsed");

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

fn shape_error(context: &'static str, expected: &'static str, actual: &Value) -> ResponseError {
    ResponseError::Shape {
        context,
        expected,
        actual: json_type(actual),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_non_object_payload() {
        let err = validate(json!([1, 2, 3]), false).unwrap_err();
        assert_eq!(
            err,
            ResponseError::Shape {
                context: "API response",
                expected: "object",
                actual: "array",
            }
        );
    }

    #[test]
    fn missing_homeworks_is_missing_field() {
        let err = validate(json!({"current_date": 1}), false).unwrap_err();
        assert_eq!(
            err,
            ResponseError::MissingField {
                context: "API response",
                keys: vec!["homeworks".into()],
            }
        );
    }

    #[test]
    fn homeworks_must_be_a_list() {
        let err = validate(json!({"homeworks": {"homework_name": "x"}}), false).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Shape {
                context: "homeworks",
                actual: "object",
                ..
            }
        ));
    }

    #[test]
    fn strict_mode_requires_current_date() {
        let err = validate(json!({"homeworks": []}), true).unwrap_err();
        assert_eq!(
            err,
            ResponseError::MissingField {
                context: "API response",
                keys: vec!["current_date".into()],
            }
        );

        let err = validate(json!({}), true).unwrap_err();
        assert_eq!(
            err,
            ResponseError::MissingField {
                context: "API response",
                keys: vec!["homeworks".into(), "current_date".into()],
            }
        );
    }

    #[test]
    fn non_integer_current_date_is_rejected() {
        let err = validate(json!({"homeworks": [], "current_date": "soon"}), false).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Shape {
                context: "current_date",
                ..
            }
        ));
    }

    #[test]
    fn valid_payload_keeps_entries_untouched() {
        let batch = validate(
            json!({
                "homeworks": [{"homework_name": "proj1", "status": "approved", "extra": 1}],
                "current_date": 1700000100
            }),
            false,
        )
        .unwrap();

        assert_eq!(batch.current_date, Some(1_700_000_100));
        assert_eq!(batch.homeworks.len(), 1);
        assert_eq!(batch.homeworks[0]["extra"], json!(1));

        let batch = validate(json!({"homeworks": []}), false).unwrap();
        assert_eq!(batch, HomeworkBatch::default());
    }

    #[test]
    fn later_malformed_entries_do_not_fail_validation() {
        let batch = validate(
            json!({
                "homeworks": [{"homework_name": "proj1", "status": "approved"}, 5, "junk"],
                "current_date": 500
            }),
            false,
        )
        .unwrap();

        assert_eq!(batch.homeworks.len(), 3);
        assert_eq!(batch.homeworks[1], json!(5));
        assert_eq!(batch.current_date, Some(500));
    }

    #[test]
    fn non_object_entry_is_rejected_when_formatted() {
        assert_eq!(
            format_status(&json!(5), "homework_name").unwrap_err(),
            ResponseError::Shape {
                context: "homework entry",
                expected: "object",
                actual: "number",
            }
        );
    }

    #[test]
    fn each_status_maps_to_its_verdict() {
        let cases = [
            ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ];
        for (status, verdict) in cases {
            let homework = json!({"homework_name": "proj1", "status": status});
            let message = format_status(&homework, "homework_name").unwrap();
            assert_eq!(
                message,
                format!("Изменился статус проверки работы \"proj1\". {verdict}")
            );
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let homework = json!({"homework_name": "proj1", "status": "lost"});
        assert_eq!(
            format_status(&homework, "homework_name").unwrap_err(),
            ResponseError::UnknownStatus("lost".into())
        );

        let homework = json!({"homework_name": "proj1", "status": 3});
        assert_eq!(
            format_status(&homework, "homework_name").unwrap_err(),
            ResponseError::UnknownStatus("3".into())
        );
    }

    #[test]
    fn missing_keys_are_all_listed() {
        let homework = json!({"lesson_name": "proj1"});
        assert_eq!(
            format_status(&homework, "homework_name").unwrap_err(),
            ResponseError::MissingField {
                context: "homework entry",
                keys: vec!["homework_name".into(), "status".into()],
            }
        );
    }

    #[test]
    fn name_key_is_configurable() {
        let homework = json!({"lesson_name": "Спринт 7", "status": "reviewing"});
        assert_eq!(
            format_status(&homework, "lesson_name").unwrap(),
            "Изменился статус проверки работы \"Спринт 7\". Работа взята на проверку ревьюером."
        );
    }
}
