use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named parameter fields an action may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
  Message,
  Text,
  ImageUrl,
  Key,
  Value,
  Color,
}

impl ParamField {
  /// Wire name of the field inside the `config` object.
  pub fn as_str(&self) -> &'static str {
    match self {
      ParamField::Message => "message",
      ParamField::Text => "text",
      ParamField::ImageUrl => "imageUrl",
      ParamField::Key => "key",
      ParamField::Value => "value",
      ParamField::Color => "color",
    }
  }
}

impl fmt::Display for ParamField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ParamField {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "message" => Ok(ParamField::Message),
      "text" => Ok(ParamField::Text),
      "imageUrl" => Ok(ParamField::ImageUrl),
      "key" => Ok(ParamField::Key),
      "value" => Ok(ParamField::Value),
      "color" => Ok(ParamField::Color),
      other => Err(ConfigError::UnknownParamField(other.to_string())),
    }
  }
}

/// Flat bag of optional string parameters.
///
/// Which entries are meaningful depends on the action kind. Entries that do
/// not apply to the current kind are kept as-is and ignored at dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParams {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub key: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
}

impl ActionParams {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style setter for a single field.
  pub fn with(mut self, field: ParamField, value: impl Into<String>) -> Self {
    self.set(field, Some(value.into()));
    self
  }

  pub fn get(&self, field: ParamField) -> Option<&str> {
    match field {
      ParamField::Message => self.message.as_deref(),
      ParamField::Text => self.text.as_deref(),
      ParamField::ImageUrl => self.image_url.as_deref(),
      ParamField::Key => self.key.as_deref(),
      ParamField::Value => self.value.as_deref(),
      ParamField::Color => self.color.as_deref(),
    }
  }

  pub fn set(&mut self, field: ParamField, value: Option<String>) {
    let slot = match field {
      ParamField::Message => &mut self.message,
      ParamField::Text => &mut self.text,
      ParamField::ImageUrl => &mut self.image_url,
      ParamField::Key => &mut self.key,
      ParamField::Value => &mut self.value,
      ParamField::Color => &mut self.color,
    };
    *slot = value;
  }

  /// True when no field carries a value.
  pub fn is_empty(&self) -> bool {
    self.message.is_none()
      && self.text.is_none()
      && self.image_url.is_none()
      && self.key.is_none()
      && self.value.is_none()
      && self.color.is_none()
  }
}
