use super::*;
use crate::partition::Partitioner;

fn user(id: i64, birth_date: &str) -> UserRecord {
    UserRecord::new(UserId(id), format!("user {id}"), birth_date)
}

fn loaded(records: Vec<UserRecord>) -> RosterController {
    let mut controller = RosterController::new(Partitioner::default());
    controller.replace_records(records);
    controller
}

fn ids(records: &[UserRecord]) -> Vec<i64> {
    records.iter().map(|record| record.id.0).collect()
}

#[test]
fn example_edit_moves_user_to_after_list() {
    let mut controller = loaded(vec![user(1, "1995-05-01"), user(2, "2003-02-02")]);
    assert_eq!(ids(&controller.views().before), vec![1]);
    assert_eq!(ids(&controller.views().after), vec![2]);

    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("2010-01-01").expect("update");
    let outcome = controller.apply().expect("apply");

    assert_eq!(
        outcome,
        ApplyOutcome::Committed {
            id: UserId(1),
            side: ViewSide::After
        }
    );
    assert!(controller.views().before.is_empty());
    assert_eq!(ids(&controller.views().after), vec![2, 1]);
    assert_eq!(controller.views().after[1].birth_date, "2010-01-01");
    assert_eq!(controller.state(), EditState::Idle);
}

#[test]
fn apply_writes_pending_value_exactly() {
    let mut controller = loaded(vec![user(1, "1998-03-03"), user(2, "1990-01-01")]);

    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("2005-01-01").expect("update");
    controller.apply().expect("apply");

    let record = controller.record(UserId(1)).expect("record");
    assert_eq!(record.birth_date, "2005-01-01");
    assert_eq!(record.display_name, "user 1");
    assert_eq!(ids(&controller.views().before), vec![2]);
    assert_eq!(ids(&controller.views().after), vec![1]);
}

#[test]
fn opening_another_record_discards_pending_edit() {
    let mut controller = loaded(vec![user(1, "1995-05-01"), user(2, "2003-02-02")]);

    controller.open_edit(UserId(1)).expect("open first");
    controller.update_pending("2020-01-01").expect("update");
    controller.open_edit(UserId(2)).expect("open second");

    assert_eq!(controller.state(), EditState::Editing(UserId(2)));
    assert!(!controller.is_editing(UserId(1)));
    assert_eq!(controller.pending_value(UserId(1)), None);
    assert_eq!(controller.pending_value(UserId(2)), Some("2003-02-02"));

    controller.apply().expect("apply second");
    assert_eq!(
        controller.record(UserId(1)).expect("first").birth_date,
        "1995-05-01"
    );
}

#[test]
fn reopening_same_record_resets_pending_value() {
    let mut controller = loaded(vec![user(1, "1995-05-01")]);

    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("2001-01-01").expect("update");
    controller.open_edit(UserId(1)).expect("reopen");

    assert_eq!(controller.pending_value(UserId(1)), Some("1995-05-01"));
}

#[test]
fn cancel_leaves_records_and_views_untouched() {
    let mut controller = loaded(vec![user(1, "1995-05-01"), user(2, "2003-02-02")]);
    let before_edit = controller.views().clone();

    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("anything at all").expect("update");
    assert_eq!(controller.cancel(), Ok(UserId(1)));

    assert_eq!(controller.views(), &before_edit);
    assert_eq!(
        controller.record(UserId(1)).expect("record").birth_date,
        "1995-05-01"
    );
    assert_eq!(controller.state(), EditState::Idle);
}

#[test]
fn pending_updates_do_not_touch_views() {
    let mut controller = loaded(vec![user(1, "1995-05-01")]);
    let snapshot = controller.views().clone();

    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("2011-11-11").expect("update");

    assert_eq!(controller.views(), &snapshot);
    assert_eq!(controller.pending_value(UserId(1)), Some("2011-11-11"));
}

#[test]
fn idle_operations_are_rejected_without_side_effects() {
    let mut controller = loaded(vec![user(1, "1995-05-01")]);
    let snapshot = controller.views().clone();

    assert_eq!(controller.apply(), Err(EditError::NoActiveSession));
    assert_eq!(controller.cancel(), Err(EditError::NoActiveSession));
    assert_eq!(
        controller.update_pending("2000-01-01"),
        Err(EditError::NoActiveSession)
    );
    assert_eq!(controller.views(), &snapshot);
    assert_eq!(controller.records(), &[user(1, "1995-05-01")]);
}

#[test]
fn opening_unknown_record_keeps_current_session() {
    let mut controller = loaded(vec![user(1, "1995-05-01")]);
    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("2002-02-02").expect("update");

    assert_eq!(
        controller.open_edit(UserId(42)),
        Err(EditError::UnknownRecord(UserId(42)))
    );
    assert_eq!(controller.pending_value(UserId(1)), Some("2002-02-02"));
}

#[test]
fn apply_for_record_removed_by_reload_is_a_no_op() {
    let mut controller = loaded(vec![user(1, "1995-05-01"), user(2, "2003-02-02")]);
    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("2010-01-01").expect("update");

    controller.replace_records(vec![user(2, "2003-02-02")]);
    assert!(controller.is_editing(UserId(1)));

    assert_eq!(controller.apply(), Ok(ApplyOutcome::TargetMissing(UserId(1))));
    assert_eq!(controller.state(), EditState::Idle);
    assert_eq!(controller.records(), &[user(2, "2003-02-02")]);
    assert_eq!(ids(&controller.views().after), vec![2]);
}

#[test]
fn duplicate_ids_keep_first_occurrence() {
    let controller = loaded(vec![
        user(1, "1995-05-01"),
        user(1, "2004-04-04"),
        user(2, "2003-02-02"),
    ]);

    assert_eq!(controller.records().len(), 2);
    assert_eq!(
        controller.record(UserId(1)).expect("record").birth_date,
        "1995-05-01"
    );
    assert_eq!(controller.views().len(), 2);
}

#[test]
fn failed_load_keeps_last_good_state() {
    let mut controller = loaded(vec![user(1, "1995-05-01")]);
    let snapshot = controller.views().clone();

    controller.apply_load(LoadOutcome::Failed("connection refused".into()));

    assert_eq!(controller.views(), &snapshot);
    assert_eq!(controller.records().len(), 1);

    controller.apply_load(LoadOutcome::Loaded(vec![user(5, "2001-01-01")]));
    assert_eq!(ids(&controller.views().after), vec![5]);
}

#[test]
fn at_most_one_record_reports_editing() {
    let records: Vec<UserRecord> = (1..=5).map(|id| user(id, "1990-01-01")).collect();
    let mut controller = loaded(records.clone());

    for target in [3, 1, 5, 5, 2] {
        controller.open_edit(UserId(target)).expect("open");
        let editing = records
            .iter()
            .filter(|record| controller.is_editing(record.id))
            .count();
        assert_eq!(editing, 1);
    }
    controller.cancel().expect("cancel");
    assert!(records.iter().all(|record| !controller.is_editing(record.id)));
}

#[test]
fn unparseable_edit_lands_on_after_side() {
    let mut controller = loaded(vec![user(1, "1995-05-01"), user(2, "2003-02-02")]);
    controller.open_edit(UserId(1)).expect("open");
    controller.update_pending("someday").expect("update");

    assert_eq!(
        controller.apply(),
        Ok(ApplyOutcome::Committed {
            id: UserId(1),
            side: ViewSide::After
        })
    );
    assert_eq!(ids(&controller.views().after), vec![2, 1]);
}

#[test]
fn edit_errors_map_to_api_codes() {
    let err: ApiError = EditError::UnknownRecord(UserId(9)).into();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(err.message.contains('9'));
    assert_eq!(EditError::NoActiveSession.code(), ErrorCode::InvalidState);
}
