use clickflow_config::{ActionDef, ActionKind, ActionParams};

/// A single step of a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
  /// Identity used for update and remove. Never derived from position.
  pub id: String,
  pub kind: ActionKind,
  /// Raw parameter bag. Fields that do not apply to `kind` are left alone.
  pub params: ActionParams,
}

/// Partial update for an action.
///
/// `params`, when present, replaces the whole bag rather than merging into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionPatch {
  pub kind: Option<ActionKind>,
  pub params: Option<ActionParams>,
}

impl ActionPatch {
  pub fn kind(kind: ActionKind) -> Self {
    Self {
      kind: Some(kind),
      params: None,
    }
  }

  pub fn params(params: ActionParams) -> Self {
    Self {
      kind: None,
      params: Some(params),
    }
  }
}

/// Typed view of an action's parameters, carrying only what its kind reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Params<'a> {
  Alert { message: Option<&'a str> },
  ShowText { message: Option<&'a str> },
  ShowImage { image_url: Option<&'a str> },
  RefreshPage,
  SetLocalStorage {
    key: Option<&'a str>,
    value: Option<&'a str>,
  },
  GetLocalStorage { key: Option<&'a str> },
  IncreaseButtonSize,
  CloseWindow,
  PromptAndShow { message: Option<&'a str> },
  ChangeButtonColor { color: Option<&'a str> },
  DisableButton,
}

impl Action {
  pub fn new(id: impl Into<String>, kind: ActionKind) -> Self {
    Self {
      id: id.into(),
      kind,
      params: ActionParams::default(),
    }
  }

  pub fn with_params(mut self, params: ActionParams) -> Self {
    self.params = params;
    self
  }

  /// Project the parameter bag onto the fields `kind` actually uses.
  pub fn params(&self) -> Params<'_> {
    let p = &self.params;
    match self.kind {
      ActionKind::Alert => Params::Alert {
        message: p.message.as_deref(),
      },
      ActionKind::ShowText => Params::ShowText {
        message: p.message.as_deref(),
      },
      ActionKind::ShowImage => Params::ShowImage {
        image_url: p.image_url.as_deref(),
      },
      ActionKind::RefreshPage => Params::RefreshPage,
      ActionKind::SetLocalStorage => Params::SetLocalStorage {
        key: p.key.as_deref(),
        value: p.value.as_deref(),
      },
      ActionKind::GetLocalStorage => Params::GetLocalStorage {
        key: p.key.as_deref(),
      },
      ActionKind::IncreaseButtonSize => Params::IncreaseButtonSize,
      ActionKind::CloseWindow => Params::CloseWindow,
      ActionKind::PromptAndShow => Params::PromptAndShow {
        message: p.message.as_deref(),
      },
      ActionKind::ChangeButtonColor => Params::ChangeButtonColor {
        color: p.color.as_deref(),
      },
      ActionKind::DisableButton => Params::DisableButton,
    }
  }

  pub(crate) fn apply(&mut self, patch: ActionPatch) {
    if let Some(kind) = patch.kind {
      self.kind = kind;
    }
    if let Some(params) = patch.params {
      self.params = params;
    }
  }
}

impl From<ActionDef> for Action {
  fn from(def: ActionDef) -> Self {
    Self {
      id: def.id,
      kind: def.kind,
      params: def.config.unwrap_or_default(),
    }
  }
}

impl From<Action> for ActionDef {
  fn from(action: Action) -> Self {
    let config = (!action.params.is_empty()).then_some(action.params);
    Self {
      id: action.id,
      kind: action.kind,
      config,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clickflow_config::ParamField;

  #[test]
  fn test_typed_view_follows_kind() {
    let action = Action::new("a", ActionKind::SetLocalStorage).with_params(
      ActionParams::new()
        .with(ParamField::Key, "k")
        .with(ParamField::Message, "stale"),
    );

    assert_eq!(
      action.params(),
      Params::SetLocalStorage {
        key: Some("k"),
        value: None,
      }
    );
  }

  #[test]
  fn test_kind_change_keeps_leftover_fields() {
    let mut action = Action::new("a", ActionKind::ShowImage)
      .with_params(ActionParams::new().with(ParamField::ImageUrl, "https://x/y.png"));

    action.apply(ActionPatch::kind(ActionKind::Alert));

    assert_eq!(action.params(), Params::Alert { message: None });
    assert_eq!(action.params.image_url.as_deref(), Some("https://x/y.png"));
  }

  #[test]
  fn test_params_patch_replaces_bag() {
    let mut action = Action::new("a", ActionKind::SetLocalStorage).with_params(
      ActionParams::new()
        .with(ParamField::Key, "k")
        .with(ParamField::Value, "v"),
    );

    action.apply(ActionPatch::params(
      ActionParams::new().with(ParamField::Value, "w"),
    ));

    assert_eq!(action.params.key, None);
    assert_eq!(action.params.value.as_deref(), Some("w"));
  }

  #[test]
  fn test_empty_params_omitted_from_record() {
    let def: ActionDef = Action::new("a", ActionKind::RefreshPage).into();
    assert_eq!(def.config, None);
  }
}
