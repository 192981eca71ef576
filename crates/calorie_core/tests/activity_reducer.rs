use calorie_core::{
    reduce, Activity, ActivityAction, ActivityState, ActivityStore, DispatchOutcome, StoreError,
};
use std::collections::HashSet;
use uuid::Uuid;

fn activity(n: u128, category: u32, name: &str, calories: i64) -> Activity {
    Activity::new(Uuid::from_u128(n), category, name, calories)
}

fn two_item_state() -> ActivityState {
    ActivityState {
        activities: vec![activity(1, 1, "Salad", 250), activity(2, 2, "Run", 300)],
        active_id: None,
    }
}

#[test]
fn save_without_selection_appends_and_keeps_selection_empty() {
    let state = two_item_state();
    let new_activity = activity(3, 1, "Juice", 120);

    let next = reduce(
        &state,
        &ActivityAction::SaveActivity {
            new_activity: new_activity.clone(),
        },
    );

    let mut expected = state.activities.clone();
    expected.push(new_activity);
    assert_eq!(next.activities, expected);
    assert_eq!(next.active_id, None);
}

#[test]
fn save_with_selection_replaces_in_place_and_clears_selection() {
    let mut state = two_item_state();
    state.active_id = Some(Uuid::from_u128(1));
    let edited = activity(1, 1, "Caesar salad", 320);

    let next = reduce(
        &state,
        &ActivityAction::SaveActivity {
            new_activity: edited.clone(),
        },
    );

    assert_eq!(next.activities.len(), 2);
    assert_eq!(next.activities[0], edited);
    assert_eq!(next.activities[1], state.activities[1]);
    assert_eq!(next.active_id, None);
}

#[test]
fn save_matches_by_selection_not_by_payload_id() {
    let mut state = two_item_state();
    state.active_id = Some(Uuid::from_u128(2));
    let mismatched = activity(9, 2, "Swim", 500);

    let next = reduce(
        &state,
        &ActivityAction::SaveActivity {
            new_activity: mismatched.clone(),
        },
    );

    assert_eq!(next.activities[1], mismatched);
    assert_eq!(next.activities.len(), 2);
}

#[test]
fn set_active_id_only_touches_selection() {
    let state = two_item_state();

    let selected = reduce(
        &state,
        &ActivityAction::SetActiveId {
            id: Some(Uuid::from_u128(2)),
        },
    );
    assert_eq!(selected.activities, state.activities);
    assert_eq!(selected.active_id, Some(Uuid::from_u128(2)));

    // The pure reducer performs no existence check.
    let dangling = reduce(
        &state,
        &ActivityAction::SetActiveId {
            id: Some(Uuid::from_u128(77)),
        },
    );
    assert_eq!(dangling.activities, state.activities);
    assert_eq!(dangling.active_id, Some(Uuid::from_u128(77)));
}

#[test]
fn delete_removes_matching_activity_and_preserves_order() {
    let mut state = two_item_state();
    state.activities.push(activity(3, 1, "Juice", 120));
    state.active_id = Some(Uuid::from_u128(1));

    let next = reduce(
        &state,
        &ActivityAction::DeleteActivity {
            id: Uuid::from_u128(2),
        },
    );

    let ids: Vec<_> = next.activities.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
    assert_eq!(next.active_id, Some(Uuid::from_u128(1)));
}

#[test]
fn delete_of_missing_id_is_a_no_op() {
    let state = two_item_state();
    let next = reduce(
        &state,
        &ActivityAction::DeleteActivity {
            id: Uuid::from_u128(42),
        },
    );
    assert_eq!(next, state);
}

#[test]
fn delete_scenario_keeps_only_the_other_activity() {
    let mut store = ActivityStore::with_state(two_item_state()).expect("seed ids are unique");

    store.dispatch(ActivityAction::DeleteActivity {
        id: Uuid::from_u128(1),
    });

    assert_eq!(store.activities(), &[activity(2, 2, "Run", 300)]);
}

#[test]
fn unknown_envelope_is_identity() {
    let mut store = ActivityStore::with_state(two_item_state()).expect("seed ids are unique");
    let before = store.state().clone();

    let outcome = store
        .dispatch_envelope(r#"{"type":"restart-app","payload":null}"#)
        .expect("unknown action is not a decode error");

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(store.state(), &before);
}

#[test]
fn known_envelope_is_reduced() {
    let mut store = ActivityStore::new();
    let outcome = store
        .dispatch_envelope(
            r#"{"type":"save-activity","payload":{"newActivity":{
                "id":"00000000-0000-0000-0000-000000000005",
                "category":1,"name":"Salad","calories":250}}}"#,
        )
        .expect("save envelope decodes");

    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(store.activities(), &[activity(5, 1, "Salad", 250)]);
}

#[test]
fn store_ignores_selection_of_missing_activity() {
    let mut store = ActivityStore::with_state(two_item_state()).expect("seed ids are unique");

    let outcome = store.dispatch(ActivityAction::SetActiveId {
        id: Some(Uuid::from_u128(99)),
    });

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(store.active_id(), None);
}

#[test]
fn store_clears_selection_when_selected_activity_is_deleted() {
    let mut store = ActivityStore::with_state(two_item_state()).expect("seed ids are unique");
    store.dispatch(ActivityAction::SetActiveId {
        id: Some(Uuid::from_u128(1)),
    });
    assert_eq!(store.active_id(), Some(Uuid::from_u128(1)));

    store.dispatch(ActivityAction::DeleteActivity {
        id: Uuid::from_u128(1),
    });

    assert_eq!(store.active_id(), None);
    assert_eq!(store.activities().len(), 1);

    // A following create must append instead of replacing nothing.
    store.dispatch(ActivityAction::SaveActivity {
        new_activity: activity(3, 1, "Juice", 120),
    });
    assert_eq!(store.activities().len(), 2);
}

fn assert_unique_ids(store: &ActivityStore) {
    let ids: HashSet<_> = store.activities().iter().map(|a| a.id).collect();
    assert_eq!(ids.len(), store.activities().len(), "duplicate id committed");
}

#[test]
fn store_save_of_committed_id_without_selection_replaces_in_place() {
    let mut store = ActivityStore::with_state(two_item_state()).expect("seed ids are unique");

    let outcome = store.dispatch(ActivityAction::SaveActivity {
        new_activity: activity(1, 1, "Salad bowl", 310),
    });

    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_unique_ids(&store);
    assert_eq!(store.activities()[0], activity(1, 1, "Salad bowl", 310));
    assert_eq!(store.activities()[1], activity(2, 2, "Run", 300));
    assert_eq!(store.active_id(), None);
}

#[test]
fn store_ignores_save_that_would_duplicate_another_activity() {
    let mut store = ActivityStore::with_state(two_item_state()).expect("seed ids are unique");
    store.dispatch(ActivityAction::SetActiveId {
        id: Some(Uuid::from_u128(2)),
    });
    let before = store.state().clone();

    let outcome = store.dispatch(ActivityAction::SaveActivity {
        new_activity: activity(1, 1, "Salad", 999),
    });

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(store.state(), &before);
}

#[test]
fn with_state_rejects_duplicate_ids_and_dangling_selection() {
    let mut duplicated = two_item_state();
    duplicated.activities.push(activity(1, 1, "Salad again", 100));
    let err = ActivityStore::with_state(duplicated).expect_err("duplicate ids rejected");
    assert_eq!(err, StoreError::DuplicateId(Uuid::from_u128(1)));

    let mut dangling = two_item_state();
    dangling.active_id = Some(Uuid::from_u128(404));
    let err = ActivityStore::with_state(dangling).expect_err("dangling selection rejected");
    assert_eq!(err, StoreError::UnknownActiveId(Uuid::from_u128(404)));
}

#[test]
fn state_serializes_with_external_field_names() {
    let mut state = two_item_state();
    state.active_id = Some(Uuid::from_u128(2));

    let json = serde_json::to_value(&state).expect("state serializes");
    assert_eq!(json["activeId"], Uuid::from_u128(2).to_string());
    assert_eq!(json["activities"][0]["name"], "Salad");
    assert_eq!(json["activities"][1]["category"], 2);

    let decoded: ActivityState = serde_json::from_value(json).expect("state decodes");
    assert_eq!(decoded, state);
}
