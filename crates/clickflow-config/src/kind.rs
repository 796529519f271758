use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::ParamField;

/// The closed set of things an action can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
  Alert,
  ShowText,
  ShowImage,
  RefreshPage,
  SetLocalStorage,
  GetLocalStorage,
  IncreaseButtonSize,
  CloseWindow,
  PromptAndShow,
  ChangeButtonColor,
  DisableButton,
}

/// A parameter field relevant to an action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub field: ParamField,
  /// Without a value the action is skipped at dispatch.
  pub required: bool,
}

impl FieldSpec {
  const fn optional(field: ParamField) -> Self {
    Self {
      field,
      required: false,
    }
  }

  const fn required(field: ParamField) -> Self {
    Self {
      field,
      required: true,
    }
  }
}

const MESSAGE: &[FieldSpec] = &[FieldSpec::optional(ParamField::Message)];
const IMAGE: &[FieldSpec] = &[FieldSpec::optional(ParamField::ImageUrl)];
const SET_STORAGE: &[FieldSpec] = &[
  FieldSpec::required(ParamField::Key),
  FieldSpec::optional(ParamField::Value),
];
const GET_STORAGE: &[FieldSpec] = &[FieldSpec::required(ParamField::Key)];
const COLOR: &[FieldSpec] = &[FieldSpec::optional(ParamField::Color)];

impl ActionKind {
  /// Every kind, in the order the editing surface lists them.
  pub const ALL: [ActionKind; 11] = [
    ActionKind::Alert,
    ActionKind::ShowText,
    ActionKind::ShowImage,
    ActionKind::RefreshPage,
    ActionKind::SetLocalStorage,
    ActionKind::GetLocalStorage,
    ActionKind::IncreaseButtonSize,
    ActionKind::CloseWindow,
    ActionKind::PromptAndShow,
    ActionKind::ChangeButtonColor,
    ActionKind::DisableButton,
  ];

  /// Wire name, as stored in the `type` field of the record.
  pub fn as_str(&self) -> &'static str {
    match self {
      ActionKind::Alert => "alert",
      ActionKind::ShowText => "showText",
      ActionKind::ShowImage => "showImage",
      ActionKind::RefreshPage => "refreshPage",
      ActionKind::SetLocalStorage => "setLocalStorage",
      ActionKind::GetLocalStorage => "getLocalStorage",
      ActionKind::IncreaseButtonSize => "increaseButtonSize",
      ActionKind::CloseWindow => "closeWindow",
      ActionKind::PromptAndShow => "promptAndShow",
      ActionKind::ChangeButtonColor => "changeButtonColor",
      ActionKind::DisableButton => "disableButton",
    }
  }

  /// Human-readable label for pickers.
  pub fn label(&self) -> &'static str {
    match self {
      ActionKind::Alert => "Alert",
      ActionKind::ShowText => "Show Text",
      ActionKind::ShowImage => "Show Image",
      ActionKind::RefreshPage => "Refresh Page",
      ActionKind::SetLocalStorage => "Set LocalStorage",
      ActionKind::GetLocalStorage => "Get LocalStorage",
      ActionKind::IncreaseButtonSize => "Increase Button Size",
      ActionKind::CloseWindow => "Close Window",
      ActionKind::PromptAndShow => "Prompt and Show",
      ActionKind::ChangeButtonColor => "Change Button Color",
      ActionKind::DisableButton => "Disable Button",
    }
  }

  /// Parameter fields that are meaningful for this kind.
  pub fn fields(&self) -> &'static [FieldSpec] {
    match self {
      ActionKind::Alert | ActionKind::ShowText | ActionKind::PromptAndShow => MESSAGE,
      ActionKind::ShowImage => IMAGE,
      ActionKind::SetLocalStorage => SET_STORAGE,
      ActionKind::GetLocalStorage => GET_STORAGE,
      ActionKind::ChangeButtonColor => COLOR,
      ActionKind::RefreshPage
      | ActionKind::IncreaseButtonSize
      | ActionKind::CloseWindow
      | ActionKind::DisableButton => &[],
    }
  }

  pub fn uses(&self, field: ParamField) -> bool {
    self.fields().iter().any(|spec| spec.field == field)
  }

  pub fn requires(&self, field: ParamField) -> bool {
    self
      .fields()
      .iter()
      .any(|spec| spec.field == field && spec.required)
  }
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ActionKind {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ActionKind::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| ConfigError::UnknownActionKind(s.to_string()))
  }
}
