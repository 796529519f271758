//! Document-level laws for workflow editing.

use std::collections::HashSet;

use clickflow_workflow::{ActionKind, ActionParams, ActionPatch, ParamField, Workflow};

fn ids(workflow: &Workflow) -> Vec<String> {
  workflow.actions().iter().map(|a| a.id.clone()).collect()
}

fn assert_distinct_ids(workflow: &Workflow) {
  let unique: HashSet<&str> = workflow.actions().iter().map(|a| a.id.as_str()).collect();
  assert_eq!(unique.len(), workflow.len(), "ids must be pairwise distinct");
}

#[test]
fn test_ids_stay_distinct_through_edits() {
  let mut workflow = Workflow::new();

  for (step, kind) in ActionKind::ALL.into_iter().cycle().take(40).enumerate() {
    workflow = workflow.append(kind);
    assert_distinct_ids(&workflow);

    if step % 3 == 0 {
      let first = workflow.actions()[0].id.clone();
      workflow = workflow.remove(&first);
      assert_distinct_ids(&workflow);
    }

    if step % 4 == 0 {
      let last = workflow.actions()[workflow.len() - 1].id.clone();
      workflow = workflow.update(
        &last,
        ActionPatch::params(ActionParams::new().with(ParamField::Message, format!("{step}"))),
      );
      assert_distinct_ids(&workflow);
    }
  }
}

#[test]
fn test_ids_survive_reorder() {
  let workflow = Workflow::new()
    .append(ActionKind::Alert)
    .append(ActionKind::ShowImage)
    .append(ActionKind::CloseWindow)
    .append(ActionKind::DisableButton);

  let before: HashSet<String> = ids(&workflow).into_iter().collect();
  let moved = workflow.reorder(3, Some(1));
  let after: HashSet<String> = ids(&moved).into_iter().collect();

  assert_eq!(before, after);
}

#[test]
fn test_reorder_inverse_law() {
  let workflow = Workflow::new()
    .append(ActionKind::Alert)
    .append(ActionKind::ShowText)
    .append(ActionKind::ShowImage)
    .append(ActionKind::RefreshPage)
    .append(ActionKind::DisableButton);
  let original = ids(&workflow);

  for i in 0..workflow.len() {
    for j in 0..workflow.len() {
      if i == j {
        continue;
      }
      let restored = workflow.clone().reorder(i, Some(j)).reorder(j, Some(i));
      assert_eq!(ids(&restored), original, "reorder({i}, {j}) then ({j}, {i})");
    }
  }
}

#[test]
fn test_serde_round_trip() {
  let workflow = Workflow::new()
    .set_trigger_label("Run it")
    .append(ActionKind::SetLocalStorage)
    .append(ActionKind::GetLocalStorage)
    .append(ActionKind::RefreshPage);

  let set_id = workflow.actions()[0].id.clone();
  let get_id = workflow.actions()[1].id.clone();
  let workflow = workflow
    .update(
      &set_id,
      ActionPatch::params(
        ActionParams::new()
          .with(ParamField::Key, "k")
          .with(ParamField::Value, "v"),
      ),
    )
    .update(
      &get_id,
      ActionPatch::params(
        ActionParams::new()
          .with(ParamField::Key, "k")
          .with(ParamField::Color, "leftover"),
      ),
    );

  let json = serde_json::to_string(&workflow).unwrap();
  let loaded: Workflow = serde_json::from_str(&json).unwrap();

  assert_eq!(loaded, workflow);
}

#[test]
fn test_record_layout() {
  let workflow = Workflow::new().set_trigger_label("Go").append(ActionKind::Alert);
  let id = workflow.actions()[0].id.clone();
  let workflow = workflow.update(
    &id,
    ActionPatch::params(ActionParams::new().with(ParamField::Message, "hi")),
  );

  let json = serde_json::to_value(&workflow).unwrap();
  assert_eq!(
    json,
    serde_json::json!({
      "buttonLabel": "Go",
      "actions": [{ "id": id, "type": "alert", "config": { "message": "hi" } }]
    })
  );
}
