//! Command and reply types shared by every bridge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Loosely typed argument value as decoded by a platform bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    /// Numeric view of the value. Non-numeric and non-finite values are `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Int(value) => Some(*value as f64),
            ArgValue::Float(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => ArgValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ArgValue::Int(i),
                // u64 above i64::MAX lands here too
                None => n.as_f64().map_or(ArgValue::Null, ArgValue::Float),
            },
            Value::String(s) => ArgValue::Text(s),
            Value::Array(items) => ArgValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ArgValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

/// A named command with its optional arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Command {
    pub name: String,
    pub arguments: BTreeMap<String, ArgValue>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn argument(&self, key: &str) -> Option<&ArgValue> {
        self.arguments.get(key)
    }

    /// Build a command from a decoded argument payload.
    ///
    /// Only a JSON object carries arguments; anything else yields an empty
    /// mapping so the parameter defaults apply.
    pub fn from_value(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        let arguments = match arguments {
            serde_json::Value::Object(map) => {
                map.into_iter().map(|(k, v)| (k, v.into())).collect()
            }
            _ => BTreeMap::new(),
        };
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Like [`from_value`](Self::from_value) but from raw JSON text.
    /// Malformed JSON is treated as no arguments.
    pub fn from_json(name: impl Into<String>, arguments_json: &str) -> Self {
        let name = name.into();
        if arguments_json.trim().is_empty() {
            return Self::new(name);
        }
        match serde_json::from_str::<serde_json::Value>(arguments_json) {
            Ok(value) => Self::from_value(name, value),
            Err(err) => {
                log::warn!(
                    "[Command] Ignoring malformed arguments for {}: {}",
                    name,
                    err
                );
                Self::new(name)
            }
        }
    }
}

/// The fixed command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    InitializeAudio,
    StartAudio,
    StopAudio,
    ReleaseAudio,
    SetVolume,
    SetFrequency,
    IsAudioPlaying,
    GetCurrentVolume,
    GetCurrentFrequency,
}

impl CommandKind {
    pub const ALL: [CommandKind; 9] = [
        CommandKind::InitializeAudio,
        CommandKind::StartAudio,
        CommandKind::StopAudio,
        CommandKind::ReleaseAudio,
        CommandKind::SetVolume,
        CommandKind::SetFrequency,
        CommandKind::IsAudioPlaying,
        CommandKind::GetCurrentVolume,
        CommandKind::GetCurrentFrequency,
    ];

    /// Look up a method name. Matching is exact and case-sensitive.
    pub fn from_method(method: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.method_name() == method)
    }

    pub fn method_name(self) -> &'static str {
        match self {
            CommandKind::InitializeAudio => "initializeAudio",
            CommandKind::StartAudio => "startAudio",
            CommandKind::StopAudio => "stopAudio",
            CommandKind::ReleaseAudio => "releaseAudio",
            CommandKind::SetVolume => "setVolume",
            CommandKind::SetFrequency => "setFrequency",
            CommandKind::IsAudioPlaying => "isAudioPlaying",
            CommandKind::GetCurrentVolume => "getCurrentVolume",
            CommandKind::GetCurrentFrequency => "getCurrentFrequency",
        }
    }
}

/// Success payload of a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyValue {
    Empty,
    Bool(bool),
    Number(f64),
}

/// Outcome of dispatching a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    Success { value: ReplyValue },
    NotImplemented { method: String },
}

impl CommandResult {
    pub fn empty() -> Self {
        CommandResult::Success {
            value: ReplyValue::Empty,
        }
    }

    pub fn boolean(value: bool) -> Self {
        CommandResult::Success {
            value: ReplyValue::Bool(value),
        }
    }

    /// Engine floats are widened to f64 at the boundary.
    pub fn number(value: f32) -> Self {
        CommandResult::Success {
            value: ReplyValue::Number(f64::from(value)),
        }
    }

    pub fn not_implemented(method: impl Into<String>) -> Self {
        CommandResult::NotImplemented {
            method: method.into(),
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, CommandResult::NotImplemented { .. })
    }

    pub fn value(&self) -> Option<ReplyValue> {
        match self {
            CommandResult::Success { value } => Some(*value),
            CommandResult::NotImplemented { .. } => None,
        }
    }
}
