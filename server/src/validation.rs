//! Request payload checks for create and update.
//!
//! Bodies are inspected as raw JSON so that every violation is reported in a
//! single response instead of stopping at the first serde error. Unknown
//! properties are listed first, then field errors in declaration order.
//! An explicit `null` counts as "not provided".

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::model::{NewTodo, Priority, TodoPatch};

const FIELDS: [&str; 6] = ["title", "description", "completed", "starred", "priority", "tags"];

/// Validate a create payload. `title` is required.
pub fn new_todo(body: &Value) -> Result<NewTodo, ValidationError> {
    let TodoPatch {
        title,
        description,
        completed,
        starred,
        priority,
        tags,
    } = check(body, true)?;
    let Some(title) = title else {
        return Err(ValidationError::single("title must be a string"));
    };
    Ok(NewTodo {
        title,
        description,
        completed,
        starred,
        priority,
        tags,
    })
}

/// Validate an update payload. Every field is optional.
pub fn patch(body: &Value) -> Result<TodoPatch, ValidationError> {
    check(body, false)
}

fn check(body: &Value, title_required: bool) -> Result<TodoPatch, ValidationError> {
    let Some(fields) = body.as_object() else {
        return Err(ValidationError::single("request body must be a JSON object"));
    };

    let mut errors: Vec<String> = fields
        .keys()
        .filter(|key| !FIELDS.contains(&key.as_str()))
        .map(|key| format!("property {key} should not exist"))
        .collect();

    let title = match fields.get("title") {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) if !title_required => None,
        _ => {
            errors.push("title must be a string".to_string());
            None
        }
    };
    let patch = TodoPatch {
        title,
        description: string(fields, "description", &mut errors),
        completed: boolean(fields, "completed", &mut errors),
        starred: boolean(fields, "starred", &mut errors),
        priority: priority(fields, &mut errors),
        tags: tags(fields, &mut errors),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationError::new(errors))
    }
}

fn present<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|v| !v.is_null())
}

fn string(fields: &Map<String, Value>, name: &str, errors: &mut Vec<String>) -> Option<String> {
    match present(fields, name)? {
        Value::String(s) => Some(s.clone()),
        _ => {
            errors.push(format!("{name} must be a string"));
            None
        }
    }
}

fn boolean(fields: &Map<String, Value>, name: &str, errors: &mut Vec<String>) -> Option<bool> {
    match present(fields, name)? {
        Value::Bool(b) => Some(*b),
        _ => {
            errors.push(format!("{name} must be a boolean value"));
            None
        }
    }
}

fn priority(fields: &Map<String, Value>, errors: &mut Vec<String>) -> Option<Priority> {
    let parsed = present(fields, "priority")?.as_str().and_then(Priority::parse);
    if parsed.is_none() {
        let allowed: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
        errors.push(format!(
            "priority must be one of the following values: {}",
            allowed.join(", ")
        ));
    }
    parsed
}

fn tags(fields: &Map<String, Value>, errors: &mut Vec<String>) -> Option<Vec<String>> {
    let Value::Array(items) = present(fields, "tags")? else {
        errors.push("tags must be an array".to_string());
        return None;
    };
    let tags: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();
    if tags.is_none() {
        errors.push("each value in tags must be a string".to_string());
    }
    tags
}
