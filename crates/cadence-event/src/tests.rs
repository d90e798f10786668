//! Unit tests for cadence-event.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cadence_core::{EventId, SchedRng, SimTime};

use crate::{Action, ActionExt, EventQueue, NoAction, SchedulerEvent, weak};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move || handle.set(handle.get() + 1))
}

fn labelled(time: f64, label: &str) -> SchedulerEvent {
    SchedulerEvent::at(time).named(label)
}

fn drain_names(queue: &mut EventQueue) -> Vec<String> {
    let mut names = Vec::new();
    while let Some(event) = queue.pop_min() {
        names.push(event.name().to_owned());
    }
    names
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod action {
    use super::*;

    #[derive(Default)]
    struct Scene {
        spawned: u32,
    }

    impl Scene {
        fn spawn(&mut self) {
            self.spawned += 1;
        }
    }

    #[test]
    fn closure_is_an_action() {
        let (count, mut bump) = counter();
        bump.perform();
        bump.perform();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn weak_action_calls_live_receiver() {
        let scene = Rc::new(RefCell::new(Scene::default()));
        let mut action = weak(&scene, Scene::spawn);
        assert!(action.is_bound());
        action.perform();
        assert_eq!(scene.borrow().spawned, 1);
    }

    #[test]
    fn weak_action_is_noop_after_receiver_dropped() {
        let scene = Rc::new(RefCell::new(Scene::default()));
        let mut action = weak(&scene, Scene::spawn);
        drop(scene);
        assert!(!action.is_bound());
        action.perform(); // must not panic
    }

    #[test]
    fn weak_action_skips_reentrant_borrow() {
        let scene = Rc::new(RefCell::new(Scene::default()));
        let mut action = weak(&scene, Scene::spawn);
        {
            let _held = scene.borrow_mut();
            action.perform();
        }
        assert_eq!(scene.borrow().spawned, 0);
    }

    #[test]
    fn weak_action_does_not_keep_receiver_alive() {
        let scene = Rc::new(RefCell::new(Scene::default()));
        let _action = weak(&scene, Scene::spawn);
        assert_eq!(Rc::strong_count(&scene), 1);
    }

    #[test]
    fn chained_runs_both_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        let mut both = (move || a.borrow_mut().push("first"))
            .then(move || b.borrow_mut().push("second"));
        both.perform();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn no_action_does_nothing() {
        NoAction.perform();
    }
}

// ── SchedulerEvent ────────────────────────────────────────────────────────────

#[cfg(test)]
mod event {
    use super::*;

    #[test]
    fn at_is_one_shot() {
        let event = SchedulerEvent::at(2.0);
        assert_eq!(event.trigger(), SimTime(2.0));
        assert_eq!(event.initial_trigger(), 2.0);
        assert!(!event.is_recurring());
        assert!(!event.should_requeue());
        assert_eq!(event.id(), EventId::UNASSIGNED);
    }

    #[test]
    fn every_first_trigger_is_one_period() {
        let event = SchedulerEvent::every(0.5);
        assert_eq!(event.trigger(), SimTime(0.5));
        assert!(event.is_recurring());
        assert!(event.should_requeue());
    }

    #[test]
    fn jittered_trigger_within_range() {
        let mut rng = SchedRng::new(7);
        for _ in 0..1_000 {
            let event = SchedulerEvent::at_jittered(1.0, 0.25, &mut rng);
            let t = event.trigger().secs();
            assert!((1.0..1.25).contains(&t), "got {t}");
            assert_eq!(event.initial_trigger(), 1.0);

            let event = SchedulerEvent::every_jittered(2.0, 0.5, &mut rng);
            let t = event.trigger().secs();
            assert!((2.0..2.5).contains(&t), "got {t}");
        }
    }

    #[test]
    fn delay_adds_to_trigger() {
        let event = SchedulerEvent::at(1.0).delay(0.5);
        assert_eq!(event.trigger(), SimTime(1.5));
        assert_eq!(event.initial_trigger(), 1.0);
    }

    #[test]
    fn negative_zero_trigger_is_normalised() {
        let event = SchedulerEvent::at(-0.0);
        assert!(event.trigger().secs().is_sign_positive());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn repeat_clears_recurring() {
        let event = SchedulerEvent::every(1.0).repeat(3);
        assert!(!event.is_recurring());
        assert_eq!(event.repeat_count(), 3);
        assert!(event.should_requeue());
    }

    #[test]
    fn repeat_n_requeues_n_minus_one_times() {
        let mut rng = SchedRng::new(0);
        let mut event = SchedulerEvent::every(1.0).repeat(3);
        let mut fires = 1;
        while event.should_requeue() {
            event.advance_for_requeue(&mut rng);
            fires += 1;
        }
        assert_eq!(fires, 3);
        assert_eq!(event.trigger(), SimTime(3.0));
    }

    #[test]
    fn advance_uses_period_and_jitter() {
        let mut rng = SchedRng::new(11);
        let mut event = SchedulerEvent::every_jittered(1.0, 0.5, &mut rng);
        let before = event.trigger();
        event.advance_for_requeue(&mut rng);
        let step = event.trigger().since(before);
        assert!((1.0..1.5).contains(&step), "got {step}");
    }

    #[test]
    fn fire_without_action_is_noop() {
        let mut rng = SchedRng::new(0);
        let mut event = SchedulerEvent::at(0.0);
        assert!(!event.fire(&mut rng));
    }

    #[test]
    fn fire_respects_probability_extremes() {
        let mut rng = SchedRng::new(5);
        let (never_count, never) = counter();
        let (always_count, always) = counter();
        let mut never = SchedulerEvent::at(0.0).with_chance(0.0).bind(never);
        let mut always = SchedulerEvent::at(0.0).with_chance(1.0).bind(always);
        for _ in 0..10_000 {
            assert!(!never.fire(&mut rng));
            assert!(always.fire(&mut rng));
        }
        assert_eq!(never_count.get(), 0);
        assert_eq!(always_count.get(), 10_000);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(SchedulerEvent::at(-1.0).validate().is_err());
        assert!(SchedulerEvent::at(1.0).with_chance(1.01).validate().is_err());
        assert!(SchedulerEvent::every(0.0).validate().is_err());
        assert!(SchedulerEvent::at(f64::NAN).validate().is_err());
        assert!(SchedulerEvent::at(0.0).validate().is_ok());
        assert!(SchedulerEvent::every(0.0).repeat(2).validate().is_ok());
    }

    #[test]
    fn debug_hides_action() {
        let event = SchedulerEvent::at(1.0).bind(|| {}).named("tick");
        let text = format!("{event:?}");
        assert!(text.contains("\"bound\""), "{text}");
        assert!(text.contains("tick"));
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    #[test]
    fn empty_queue_queries() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.peek_min().is_none());
        assert!(queue.pop_min().is_none());
        assert!(queue.next_trigger().is_none());
    }

    #[test]
    fn pops_in_trigger_order() {
        let mut queue = EventQueue::new();
        queue.add(labelled(3.0, "c"));
        queue.add(labelled(1.0, "a"));
        queue.add(labelled(2.0, "b"));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek_min().map(|e| e.name()), Some("a"));
        assert_eq!(drain_names(&mut queue), vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_triggers_keep_insertion_order() {
        let mut queue = EventQueue::new();
        queue.add(labelled(1.0, "first"));
        queue.add(labelled(0.5, "early"));
        queue.add(labelled(1.0, "second"));
        queue.add(labelled(1.0, "third"));
        assert_eq!(drain_names(&mut queue), vec!["early", "first", "second", "third"]);
    }

    #[test]
    fn signed_zero_triggers_tie_in_insertion_order() {
        let mut queue = EventQueue::new();
        queue.add(labelled(0.0, "zero"));
        queue.add(labelled(-0.0, "negative zero"));
        queue.add(SchedulerEvent::at(1.0).delay(-1.0).named("delayed to zero"));
        assert_eq!(drain_names(&mut queue), vec!["zero", "negative zero", "delayed to zero"]);
    }

    #[test]
    fn readded_event_goes_behind_equal_triggers() {
        let mut queue = EventQueue::new();
        queue.add(labelled(1.0, "a"));
        queue.add(labelled(1.0, "b"));
        let a = queue.pop_min().expect("queued");
        queue.add(a);
        assert_eq!(drain_names(&mut queue), vec!["b", "a"]);
    }

    #[test]
    fn pop_due_stops_at_future_events() {
        let mut queue = EventQueue::new();
        queue.add(labelled(1.0, "due"));
        queue.add(labelled(2.0, "later"));
        assert_eq!(queue.pop_due(SimTime(1.0)).map(|e| e.name().to_owned()), Some("due".to_owned()));
        assert!(queue.pop_due(SimTime(1.5)).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn drain_empties_in_order() {
        let mut queue = EventQueue::new();
        queue.add(labelled(2.0, "b"));
        queue.add(labelled(1.0, "a"));
        let names: Vec<String> = queue.drain().map(|e| e.name().to_owned()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn iter_is_in_firing_order() {
        let mut queue = EventQueue::new();
        queue.add(labelled(5.0, "z"));
        queue.add(labelled(0.0, "y"));
        let triggers: Vec<f64> = queue.iter().map(|e| e.trigger().secs()).collect();
        assert_eq!(triggers, vec![0.0, 5.0]);
    }
}

// ── Ordering properties ───────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// `pop_min` always yields the minimum trigger; equal triggers pop in
        /// the order they were added.
        #[test]
        fn pop_order_is_stable_sort(triggers in prop::collection::vec(0u8..8, 0..64)) {
            let mut queue = EventQueue::new();
            for (i, t) in triggers.iter().enumerate() {
                queue.add(SchedulerEvent::at(f64::from(*t)).named(i.to_string()));
            }

            let mut expected: Vec<(u8, usize)> =
                triggers.iter().copied().zip(0..).collect();
            expected.sort_by_key(|&(t, _)| t); // stable

            let mut popped = Vec::new();
            while let Some(event) = queue.pop_min() {
                let index: usize = event.name().parse().unwrap();
                popped.push((triggers[index], index));
            }
            prop_assert_eq!(popped, expected);
        }

        #[test]
        fn peek_matches_pop(triggers in prop::collection::vec(0.0f64..100.0, 1..32)) {
            let mut queue = EventQueue::new();
            for t in &triggers {
                queue.add(SchedulerEvent::at(*t));
            }
            while !queue.is_empty() {
                let peeked = queue.peek_min().map(|e| e.trigger());
                let min = queue.iter().map(|e| e.trigger()).min();
                prop_assert_eq!(peeked, min);
                prop_assert_eq!(queue.pop_min().map(|e| e.trigger()), peeked);
            }
        }
    }
}
