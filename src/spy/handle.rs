// Allow must_use_candidate since handle methods are often called for their
// side effects in test setup
#![allow(clippy::must_use_candidate)]

//! The spy handle: inspection and lifecycle of an installed recorder.

use std::fmt::Debug;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::target::{Callable, SpyTarget};
use crate::value::Value;

/// Invocation state shared between a handle and its installed replacement.
#[derive(Default)]
struct Recording {
    invoked: AtomicBool,
    last_args: Mutex<Vec<Value>>,
}

/// A handle to an installed spy.
///
/// Returned by [`spy_on`](crate::spy::spy_on) and
/// [`spy_detached`](crate::spy::spy_detached). The handle and the
/// replacement installed on the target share recording state, so cloning a
/// handle yields another view of the same spy, not an independent one.
///
/// # Example
///
/// ```rust
/// use spies::prelude::*;
/// use spies::values;
///
/// let target = TargetMap::shared();
/// let spy = spy_on(&target, "notify", None);
///
/// target.invoke("notify", &values!["ping", 2_i32]).unwrap();
///
/// assert!(spy.was_invoked());
/// assert!(spy.captured_argument(1).unwrap().equals(&"ping"));
/// assert!(spy.captured_argument(2).unwrap().equals(&2_i32));
/// assert!(spy.captured_argument(3).is_none());
/// ```
#[derive(Clone)]
pub struct SpyHandle {
    recording: Arc<Recording>,
    target: Arc<dyn SpyTarget + Send + Sync>,
    member: String,
    original: Option<Callable>,
    return_value: Option<Value>,
    replacement: Callable,
}

impl SpyHandle {
    /// Remember the current member, install the recorder, return the handle.
    pub(crate) fn install(
        target: Arc<dyn SpyTarget + Send + Sync>,
        member: &str,
        return_value: Option<Value>,
    ) -> Self {
        let recording = Arc::new(Recording::default());

        let replacement: Callable = {
            let recording = Arc::clone(&recording);
            let configured = return_value.clone();
            Arc::new(move |args: &[Value]| {
                *recording.last_args.lock() = args.to_vec();
                recording.invoked.store(true, Ordering::SeqCst);
                configured.clone()
            })
        };

        let original = target.member(member);
        target.set_member(member, Arc::clone(&replacement));

        Self {
            recording,
            target,
            member: member.to_string(),
            original,
            return_value,
            replacement,
        }
    }

    /// Check whether the replacement has been invoked since creation or the
    /// last [`reset`](Self::reset).
    pub fn was_invoked(&self) -> bool {
        self.recording.invoked.load(Ordering::SeqCst)
    }

    /// The argument list of the most recent invocation.
    ///
    /// Empty if the spy was never invoked or was reset since. Only the
    /// latest call is retained; earlier calls are overwritten, not
    /// accumulated.
    pub fn captured_arguments(&self) -> Vec<Value> {
        self.recording.last_args.lock().clone()
    }

    /// A single argument from the most recent invocation, by 1-based
    /// position.
    ///
    /// `captured_argument(1)` is the first argument. Out-of-range positions
    /// (including 0) return `None`.
    pub fn captured_argument(&self, index: usize) -> Option<Value> {
        if index == 0 {
            return None;
        }
        self.recording.last_args.lock().get(index - 1).cloned()
    }

    /// The fixed value every invocation returns, if one was configured.
    pub fn configured_return_value(&self) -> Option<Value> {
        self.return_value.clone()
    }

    /// Invoke the replacement directly, without going through any
    /// container.
    ///
    /// Records the call exactly as a container invocation would.
    pub fn call(&self, args: &[Value]) -> Option<Value> {
        (self.replacement)(args)
    }

    /// The installed replacement itself, as a free-standing [`Callable`].
    pub fn replacement_fn(&self) -> Callable {
        Arc::clone(&self.replacement)
    }

    /// Forget previous interactions: clear the invoked flag and the
    /// captured arguments.
    ///
    /// Leaves the configured return value and the installation untouched.
    /// Idempotent.
    pub fn reset(&self) {
        self.recording.last_args.lock().clear();
        self.recording.invoked.store(false, Ordering::SeqCst);
    }

    /// Reassign the target's member back to the remembered original.
    ///
    /// If the member did not exist before spying, it is removed again.
    /// Calling this more than once re-assigns the same remembered original
    /// each time; it is never an error. If a third party reassigned the
    /// member after installation, that reassignment is silently
    /// overwritten - no interference detection is attempted.
    ///
    /// The handle stays valid and inspectable afterwards; it just no
    /// longer affects the target.
    pub fn stop_spying(&self) {
        match &self.original {
            Some(function) => self.target.set_member(&self.member, Arc::clone(function)),
            None => {
                self.target.remove_member(&self.member);
            }
        }
    }

    /// The container being spied on.
    ///
    /// For detached spies this is the internally synthesized container.
    pub fn target(&self) -> &Arc<dyn SpyTarget + Send + Sync> {
        &self.target
    }

    /// Check by identity whether this spy is installed on `target`.
    pub fn spies_on<T>(&self, target: &Arc<T>) -> bool
    where
        T: SpyTarget + Send + Sync + 'static,
    {
        std::ptr::eq(
            Arc::as_ptr(&self.target).cast::<()>(),
            Arc::as_ptr(target).cast::<()>(),
        )
    }

    /// The key the replacement was installed under.
    pub fn member_name(&self) -> &str {
        &self.member
    }
}

impl Debug for SpyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpyHandle")
            .field("member", &self.member)
            .field("was_invoked", &self.was_invoked())
            .field("captured_arguments", &*self.recording.last_args.lock())
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

/// A handle to an installed stub.
///
/// Behaviorally identical to the [`SpyHandle`] it wraps (and derefs to);
/// the only addition is [`remove_stub`](Self::remove_stub), the stubbing
/// name for [`SpyHandle::stop_spying`].
#[derive(Clone)]
pub struct StubHandle {
    spy: SpyHandle,
}

impl StubHandle {
    pub(crate) fn from_spy(spy: SpyHandle) -> Self {
        Self { spy }
    }

    /// Remove the stub, restoring the original member.
    ///
    /// Alias for [`SpyHandle::stop_spying`].
    pub fn remove_stub(&self) {
        self.spy.stop_spying();
    }

    /// Unwrap into the underlying [`SpyHandle`].
    #[must_use]
    pub fn into_spy(self) -> SpyHandle {
        self.spy
    }
}

impl Deref for StubHandle {
    type Target = SpyHandle;

    fn deref(&self) -> &Self::Target {
        &self.spy
    }
}

impl Debug for StubHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubHandle").field("spy", &self.spy).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::spy::{spy_detached, spy_on, stub};
    use crate::target::{callable, Callable, SpyTarget, TargetMap};
    use crate::value::Value;
    use crate::values;

    /// A one-member container that ignores names, to exercise spying on a
    /// caller-supplied `SpyTarget` implementation.
    #[derive(Default)]
    struct SingleSlot {
        slot: Mutex<Option<Callable>>,
    }

    impl SpyTarget for SingleSlot {
        fn member(&self, _name: &str) -> Option<Callable> {
            self.slot.lock().clone()
        }

        fn set_member(&self, _name: &str, function: Callable) {
            *self.slot.lock() = Some(function);
        }

        fn remove_member(&self, _name: &str) -> Option<Callable> {
            self.slot.lock().take()
        }
    }

    #[test]
    fn fresh_spy_has_no_interactions() {
        let spy = spy_detached("f", None);

        assert!(!spy.was_invoked());
        assert!(spy.captured_arguments().is_empty());
        assert!(spy.configured_return_value().is_none());
    }

    #[test]
    fn spy_on_accepts_any_spy_target_implementation() {
        let target = Arc::new(SingleSlot::default());
        let spy = spy_on(&target, "only", Some(Value::new("slotted")));

        let installed = target.member("only").unwrap();
        let result = installed(&values!["x"]);

        assert!(result.unwrap().equals(&"slotted"));
        assert!(spy.was_invoked());
        assert!(spy.spies_on(&target));

        spy.stop_spying();
        assert!(target.member("only").is_none());
    }

    #[test]
    fn invocation_flips_the_flag() {
        let target = TargetMap::shared();
        target.set_member("f", callable(|_| None));
        let spy = spy_on(&target, "f", None);

        target.invoke("f", &[]).unwrap();

        assert!(spy.was_invoked());
    }

    #[test]
    fn only_the_latest_call_is_retained() {
        let spy = spy_detached("f", None);

        spy.call(&values!["a"]);
        spy.call(&values!["x", "y"]);

        let args = spy.captured_arguments();
        assert_eq!(args.len(), 2);
        assert!(args[0].equals(&"x"));
        assert!(args[1].equals(&"y"));
    }

    #[test]
    fn captured_argument_is_one_based() {
        let spy = spy_detached("f", None);

        spy.call(&values!["first", "second"]);

        assert!(spy.captured_argument(1).unwrap().equals(&"first"));
        assert!(spy.captured_argument(2).unwrap().equals(&"second"));
        assert!(spy.captured_argument(0).is_none());
        assert!(spy.captured_argument(3).is_none());
    }

    #[test]
    fn configured_value_is_returned_from_every_call() {
        let spy = spy_detached("f", Some(Value::new("R")));

        assert!(spy.call(&[]).unwrap().equals(&"R"));
        assert!(spy.call(&values![1_i32, 2_i32]).unwrap().equals(&"R"));
    }

    #[test]
    fn unconfigured_spy_returns_nothing() {
        let spy = spy_detached("f", None);

        assert!(spy.call(&values!["anything"]).is_none());
    }

    #[test]
    fn reset_forgets_interactions_but_keeps_the_rest() {
        let target = TargetMap::shared();
        let spy = spy_on(&target, "f", Some(Value::new(9_i32)));

        target.invoke("f", &values!["1", "2", "3"]).unwrap();
        spy.reset();

        assert!(!spy.was_invoked());
        assert!(spy.captured_arguments().is_empty());

        // Still installed, still returns the configured value.
        let result = target.invoke("f", &[]).unwrap();
        assert!(result.unwrap().equals(&9_i32));
        assert!(spy.was_invoked());
    }

    #[test]
    fn reset_is_idempotent() {
        let spy = spy_detached("f", None);
        spy.call(&values![1_i32]);

        spy.reset();
        spy.reset();

        assert!(!spy.was_invoked());
    }

    #[test]
    fn stop_spying_restores_the_original() {
        let target = TargetMap::shared();
        target.set_member("f", callable(|_| Some(Value::new("original"))));

        let spy = spy_on(&target, "f", Some(Value::new("spied")));
        spy.stop_spying();

        let result = target.invoke("f", &[]).unwrap();
        assert!(result.unwrap().equals(&"original"));
        assert!(!spy.was_invoked());
    }

    #[test]
    fn restoring_an_absent_original_removes_the_member() {
        let target = TargetMap::shared();
        let spy = spy_on(&target, "f", None);

        assert!(target.contains("f"));
        spy.stop_spying();
        assert!(!target.contains("f"));
    }

    #[test]
    fn stop_spying_twice_is_harmless() {
        let target = TargetMap::shared();
        target.set_member("f", callable(|_| Some(Value::new(1_i32))));
        let spy = spy_on(&target, "f", None);

        spy.stop_spying();
        spy.stop_spying();

        let result = target.invoke("f", &[]).unwrap();
        assert!(result.unwrap().equals(&1_i32));
    }

    #[test]
    fn stop_spying_overwrites_third_party_reassignment() {
        let target = TargetMap::shared();
        target.set_member("f", callable(|_| Some(Value::new("original"))));
        let spy = spy_on(&target, "f", None);

        // Someone else reassigns the member behind the spy's back.
        target.set_member("f", callable(|_| Some(Value::new("interloper"))));
        spy.stop_spying();

        let result = target.invoke("f", &[]).unwrap();
        assert!(result.unwrap().equals(&"original"));
    }

    #[test]
    fn handle_stays_inspectable_after_restore() {
        let target = TargetMap::shared();
        let spy = spy_on(&target, "f", None);

        target.invoke("f", &values!["kept"]).unwrap();
        spy.stop_spying();

        assert!(spy.was_invoked());
        assert!(spy.captured_argument(1).unwrap().equals(&"kept"));
    }

    #[test]
    fn replacement_fn_records_like_a_container_call() {
        let spy = spy_detached("f", Some(Value::new("V")));

        let f = spy.replacement_fn();
        let result = f(&values!["direct"]);

        assert!(result.unwrap().equals(&"V"));
        assert!(spy.was_invoked());
        assert!(spy.captured_argument(1).unwrap().equals(&"direct"));
    }

    #[test]
    fn detached_spy_installs_onto_a_synthesized_target() {
        let spy = spy_detached("f", None);

        let via_target = spy.target().member("f");
        assert!(via_target.is_some());

        via_target.unwrap()(&values!["through the map"]);
        assert!(spy.was_invoked());
    }

    #[test]
    fn spies_on_checks_target_identity() {
        let target = TargetMap::shared();
        let other = TargetMap::shared();
        let spy = spy_on(&target, "f", None);

        assert!(spy.spies_on(&target));
        assert!(!spy.spies_on(&other));
    }

    #[test]
    fn member_name_is_the_installed_key() {
        let spy = spy_detached("frobnicate", None);
        assert_eq!(spy.member_name(), "frobnicate");
    }

    #[test]
    fn cloned_handles_share_recording_state() {
        let spy = spy_detached("f", None);
        let view = spy.clone();

        spy.call(&values![1_i32]);

        assert!(view.was_invoked());
        view.reset();
        assert!(!spy.was_invoked());
    }

    #[test]
    fn stub_handle_derefs_to_the_spy() {
        let target = TargetMap::shared();
        let stubbed = stub(&target, "f", Some(Value::new("S")));

        target.invoke("f", &values!["arg"]).unwrap();

        assert!(stubbed.was_invoked());
        assert!(stubbed.captured_argument(1).unwrap().equals(&"arg"));
        assert_eq!(stubbed.member_name(), "f");
    }

    #[test]
    fn debug_shows_member_and_state() {
        let spy = spy_detached("f", None);
        spy.call(&values![1_i32]);

        let debug = format!("{spy:?}");
        assert!(debug.contains("SpyHandle"));
        assert!(debug.contains("was_invoked"));
    }
}
