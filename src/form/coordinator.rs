//! Focus Coordinator
//!
//! Serializes focus-triggered work across fields: while one field holds the
//! coordinator (a selection is being committed and its follow-up work is in
//! flight), focus operations from other fields wait and run on release, in
//! arrival order.

use std::collections::VecDeque;

pub type Deferred = Box<dyn FnOnce()>;

/// Another field is mid-selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Busy {
    pub holder: String,
}

struct Hold {
    field: String,
    /// Outstanding acquires; the hold ends when this reaches zero
    depth: usize,
}

#[derive(Default)]
pub struct FocusCoordinator {
    holder: Option<Hold>,
    waiting: VecDeque<(String, Deferred)>,
}

impl FocusCoordinator {
    pub fn holder(&self) -> Option<&str> {
        self.holder.as_ref().map(|hold| hold.field.as_str())
    }

    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Claim the coordinator for `field`. The holder may acquire again;
    /// each acquire needs its own release.
    pub fn acquire(&mut self, field: &str) -> Result<(), Busy> {
        match &mut self.holder {
            Some(hold) if hold.field != field => Err(Busy {
                holder: hold.field.clone(),
            }),
            Some(hold) => {
                hold.depth += 1;
                Ok(())
            }
            None => {
                self.holder = Some(Hold {
                    field: field.to_string(),
                    depth: 1,
                });
                Ok(())
            }
        }
    }

    /// Drop one hold of `field`. Once the last one is gone, returns the
    /// queued operations for the caller to run outside any borrow.
    pub fn release(&mut self, field: &str) -> Vec<Deferred> {
        let Some(hold) = self.holder.as_mut().filter(|hold| hold.field == field) else {
            return Vec::new();
        };
        if hold.depth > 1 {
            hold.depth -= 1;
            return Vec::new();
        }
        self.release_all(field)
    }

    /// Drop every hold of `field`, e.g. when the field goes away.
    pub fn release_all(&mut self, field: &str) -> Vec<Deferred> {
        if self.holder() != Some(field) {
            return Vec::new();
        }
        self.holder = None;
        self.waiting.drain(..).map(|(_, op)| op).collect()
    }

    /// Queue `op` while another field holds the coordinator. When idle (or
    /// held by `field` itself) the op is handed back to run immediately.
    pub fn run_or_defer(&mut self, field: &str, op: Deferred) -> Option<Deferred> {
        match self.holder() {
            Some(holder) if holder != field => {
                // a newer focus on the same field supersedes the queued one
                self.waiting.retain(|(id, _)| id != field);
                self.waiting.push_back((field.to_string(), op));
                None
            }
            _ => Some(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Deferred) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = log.clone();
            move |name: &'static str| -> Deferred {
                let log = log.clone();
                Box::new(move || log.borrow_mut().push(name))
            }
        };
        (log, make)
    }

    #[test]
    fn test_idle_runs_immediately() {
        let (log, op) = recorder();
        let mut coordinator = FocusCoordinator::default();
        let ready = coordinator.run_or_defer("region", op("region"));
        ready.expect("idle coordinator hands the op back")();
        assert_eq!(*log.borrow(), vec!["region"]);
    }

    #[test]
    fn test_focus_waits_for_pending_selection() {
        let (log, op) = recorder();
        let mut coordinator = FocusCoordinator::default();
        coordinator.acquire("country").unwrap();

        assert!(coordinator.run_or_defer("region", op("region")).is_none());
        assert!(coordinator.run_or_defer("city", op("city")).is_none());
        assert!(log.borrow().is_empty());

        for ready in coordinator.release("country") {
            ready();
        }
        assert_eq!(*log.borrow(), vec!["region", "city"]);
        assert_eq!(coordinator.holder(), None);
    }

    #[test]
    fn test_holder_focus_is_not_deferred() {
        let (_, op) = recorder();
        let mut coordinator = FocusCoordinator::default();
        coordinator.acquire("country").unwrap();
        assert!(coordinator.run_or_defer("country", op("country")).is_some());
    }

    #[test]
    fn test_second_acquire_is_busy() {
        let mut coordinator = FocusCoordinator::default();
        coordinator.acquire("country").unwrap();
        assert!(coordinator.acquire("country").is_ok());
        assert_eq!(
            coordinator.acquire("region"),
            Err(Busy {
                holder: "country".into()
            })
        );
    }

    #[test]
    fn test_release_by_non_holder_is_ignored() {
        let (_, op) = recorder();
        let mut coordinator = FocusCoordinator::default();
        coordinator.acquire("country").unwrap();
        coordinator.run_or_defer("city", op("city"));

        assert!(coordinator.release("region").is_empty());
        assert_eq!(coordinator.holder(), Some("country"));
        assert_eq!(coordinator.waiting(), 1);
    }

    #[test]
    fn test_repeated_focus_keeps_latest_only() {
        let (log, op) = recorder();
        let mut coordinator = FocusCoordinator::default();
        coordinator.acquire("country").unwrap();
        coordinator.run_or_defer("city", op("first"));
        coordinator.run_or_defer("city", op("second"));
        assert_eq!(coordinator.waiting(), 1);

        for ready in coordinator.release("country") {
            ready();
        }
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_nested_acquire_needs_matching_releases() {
        let (log, op) = recorder();
        let mut coordinator = FocusCoordinator::default();
        coordinator.acquire("country").unwrap();
        coordinator.acquire("country").unwrap();
        coordinator.run_or_defer("region", op("region"));

        assert!(coordinator.release("country").is_empty());
        assert_eq!(coordinator.holder(), Some("country"));
        assert_eq!(coordinator.waiting(), 1);

        for ready in coordinator.release("country") {
            ready();
        }
        assert_eq!(coordinator.holder(), None);
        assert_eq!(*log.borrow(), vec!["region"]);
    }

    #[test]
    fn test_release_all_ends_nested_holds() {
        let mut coordinator = FocusCoordinator::default();
        coordinator.acquire("country").unwrap();
        coordinator.acquire("country").unwrap();
        coordinator.release_all("country");
        assert_eq!(coordinator.holder(), None);
    }
}
