mod helpers;

use chrono::Duration;
use helpers::*;
use lastdone_core::models::{ReminderInterval, Task};
use lastdone_core::reminder::{derive_on_date_or_name_change, derive_on_interval_change};
use proptest::prelude::*;

fn any_interval() -> impl Strategy<Value = ReminderInterval> {
    prop::sample::select(ReminderInterval::ALL.to_vec())
}

fn fixed_interval() -> impl Strategy<Value = ReminderInterval> {
    prop::sample::select(vec![
        ReminderInterval::Week,
        ReminderInterval::FourWeeks,
        ReminderInterval::Quarter,
    ])
}

#[derive(Debug, Clone)]
enum Edit {
    Interval(ReminderInterval),
    /// Minutes relative to the harness clock
    Date(i64),
    Name(String),
}

fn any_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        any_interval().prop_map(Edit::Interval),
        (-200_000i64..200_000).prop_map(Edit::Date),
        "[a-zA-Z ]{1,24}".prop_map(Edit::Name),
    ]
}

proptest! {
    #[test]
    fn prop_fixed_interval_tracks_date(
        interval in fixed_interval(),
        minutes in -500_000i64..500_000,
        name in "[a-zA-Z ]{1,24}",
    ) {
        let mut task = Task::new("Chore", test_now());
        task.apply_reminder_fields(derive_on_interval_change(&task, interval, test_now()));

        task.date = test_now() + Duration::minutes(minutes);
        task.apply_reminder_fields(derive_on_date_or_name_change(&task));
        task.name = name;
        task.apply_reminder_fields(derive_on_date_or_name_change(&task));

        let days = interval.days().unwrap();
        prop_assert_eq!(task.notification_date, Some(task.date + Duration::days(days)));
    }

    #[test]
    fn prop_commit_keeps_interval_and_date_in_step(edits in prop::collection::vec(any_edit(), 1..12)) {
        let mut harness = setup();
        let task = create_task(&mut harness, "Chore", 1);

        harness.editor.begin_edit(task.id).unwrap();
        for edit in edits {
            match edit {
                Edit::Interval(interval) => {
                    harness.editor.set_interval(interval).unwrap();
                }
                Edit::Date(minutes) => {
                    harness.editor.set_date(test_now() + Duration::minutes(minutes)).unwrap();
                }
                Edit::Name(name) => {
                    harness.editor.set_name(name).unwrap();
                }
            }

            let draft = harness.editor.session().unwrap().draft().clone();
            if let Some(days) = draft.reminder_interval.days() {
                prop_assert_eq!(draft.notification_date, Some(draft.date + Duration::days(days)));
            }
        }
        let committed = harness.editor.commit().unwrap();

        prop_assert_eq!(
            committed.reminder_interval.is_enabled(),
            committed.notification_date.is_some()
        );
        prop_assert!(harness.notifier.pending().len() <= 1);
    }

    #[test]
    fn prop_past_dates_never_reach_the_service(
        interval in any_interval(),
        minutes_ago in 0i64..1_000_000,
    ) {
        let harness = setup();
        let mut task = Task::new("Chore", test_now());
        task.reminder_interval = interval;
        task.notification_date = Some(test_now() - Duration::minutes(minutes_ago));

        harness.editor.scheduler().schedule_or_cancel(&task);

        prop_assert!(harness.notifier.adds().is_empty());
        prop_assert_eq!(harness.notifier.cancels_for(task.id), 1);
    }
}
