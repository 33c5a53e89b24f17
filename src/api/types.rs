use crate::control::{CommandResult, ReplyValue};

/// Reply to a generic method call, shaped like a Flutter method-channel result.
///
/// `implemented == false` is the "not implemented" signal; otherwise at most
/// one of `bool_value` / `number_value` is set and both unset means a void
/// success.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MethodReply {
    pub method: String,
    pub implemented: bool,
    pub bool_value: Option<bool>,
    pub number_value: Option<f64>,
}

impl MethodReply {
    pub fn from_result(method: impl Into<String>, result: &CommandResult) -> Self {
        let method = method.into();
        match result {
            CommandResult::NotImplemented { .. } => Self {
                method,
                implemented: false,
                bool_value: None,
                number_value: None,
            },
            CommandResult::Success { value } => {
                let (bool_value, number_value) = match value {
                    ReplyValue::Empty => (None, None),
                    ReplyValue::Bool(b) => (Some(*b), None),
                    ReplyValue::Number(n) => (None, Some(*n)),
                };
                Self {
                    method,
                    implemented: true,
                    bool_value,
                    number_value,
                }
            }
        }
    }
}
