use std::collections::HashMap;

/// Setup-time fault in a transition graph definition.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FsmError {
    #[error("state(s) do not exist: \"{from}\" or \"{to}\", add them before wiring actions")]
    UnknownState { from: String, to: String },
}

/// One node of the graph: outgoing edges keyed by action label.
struct State {
    edges: HashMap<String, String>,
}

impl State {
    fn new() -> Self {
        Self { edges: HashMap::new() }
    }
}

/// Labeled-transition state machine over named states.
///
/// The graph is wired once during setup with [`add_state`] and
/// [`create_action`]; afterwards the owner only calls [`dispatch_action`]
/// and [`get_state`]. Dispatching a label with no edge out of the current
/// state leaves the machine where it is.
///
/// Like a frame-driven FSM it also remembers the previous state and how long
/// it has been in the current one, so animation code can react to entries.
///
/// # Usage
/// ```ignore
/// let mut fsm = StateMachine::new("idle");
/// fsm.add_state("left");
/// fsm.create_action("idle", "left", "move-left")?;
/// assert_eq!(fsm.dispatch_action("move-left"), "left");
/// ```
///
/// [`add_state`]: StateMachine::add_state
/// [`create_action`]: StateMachine::create_action
/// [`dispatch_action`]: StateMachine::dispatch_action
/// [`get_state`]: StateMachine::get_state
pub struct StateMachine {
    states: HashMap<String, State>,
    current: String,
    previous: String,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    elapsed: f32,
    entered_this_frame: bool,
}

impl StateMachine {
    /// Create a machine whose only registered state is `initial`.
    /// `just_entered()` returns `true` until the first tick.
    pub fn new(initial: &str) -> Self {
        let mut states = HashMap::new();
        states.insert(initial.to_owned(), State::new());
        Self {
            states,
            current: initial.to_owned(),
            previous: initial.to_owned(),
            elapsed: 0.0,
            entered_this_frame: true,
        }
    }

    /// Register `name` with no outgoing transitions. Re-adding an existing
    /// name clears its edges.
    pub fn add_state(&mut self, name: &str) {
        self.states.insert(name.to_owned(), State::new());
    }

    #[allow(dead_code)]
    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Wire `from --action--> to`. Both states must already be registered.
    pub fn create_action(&mut self, from: &str, to: &str, action: &str) -> Result<(), FsmError> {
        if !self.states.contains_key(to) {
            return Err(FsmError::UnknownState {
                from: from.to_owned(),
                to: to.to_owned(),
            });
        }
        let Some(node) = self.states.get_mut(from) else {
            return Err(FsmError::UnknownState {
                from: from.to_owned(),
                to: to.to_owned(),
            });
        };
        node.edges.insert(action.to_owned(), to.to_owned());
        Ok(())
    }

    /// Follow the edge labeled `action` out of the current state, if any.
    /// Returns the resulting state name.
    pub fn dispatch_action(&mut self, action: &str) -> &str {
        let next = self
            .states
            .get(&self.current)
            .and_then(|node| node.edges.get(action))
            .cloned();

        if let Some(next) = next {
            if next != self.current {
                tracing::debug!(from = %self.current, to = %next, action, "state transition");
                self.previous = std::mem::replace(&mut self.current, next);
                self.elapsed = 0.0;
                self.entered_this_frame = true;
            }
        }
        &self.current
    }

    pub fn get_state(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the elapsed-in-state timer by `dt` seconds and clear the
    /// `just_entered` flag. Call once per frame **after** dispatching input.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
        self.entered_this_frame = false;
    }

    /// Returns `true` only until the first tick after entering this state.
    pub fn just_entered(&self) -> bool {
        self.entered_this_frame
    }
}
