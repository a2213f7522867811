use std::rc::Rc;

use crate::document::Document;
use crate::node::NodeId;

/// Interaction events a listener can be attached for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    Click,
    /// Fired before a text selection starts on an element.
    SelectStart,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// An event dispatched at a target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub button: Option<MouseButton>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self { kind, button: None }
    }

    pub fn mouse(kind: EventKind, button: MouseButton) -> Self {
        Self {
            kind,
            button: Some(button),
        }
    }

    /// True for pointer events raised by the primary button.
    pub fn is_primary(&self) -> bool {
        matches!(self.button, None | Some(MouseButton::Left))
    }
}

/// State handed to each listener while an event bubbles.
#[derive(Debug)]
pub struct EventContext {
    pub event: Event,
    /// Node the event was dispatched at.
    pub target: NodeId,
    /// Node whose listener is currently running.
    pub current_target: NodeId,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl EventContext {
    pub(crate) fn new(event: Event, target: NodeId) -> Self {
        Self {
            event,
            target,
            current_target: target,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Stop the event from reaching ancestors of the current node.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Number of listeners that ran.
    pub handled: usize,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

pub type Listener = Rc<dyn Fn(&mut Document, &mut EventContext)>;

// Conversion from crossterm types
impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

impl Document {
    /// Attach `handler` to `node` for events of `kind`.
    ///
    /// Listeners on a removed node are dropped together with it.
    pub fn add_listener<F>(&mut self, node: NodeId, kind: EventKind, handler: F)
    where
        F: Fn(&mut Document, &mut EventContext) + 'static,
    {
        if !self.exists(node) {
            log::debug!("[event] ignoring listener on missing node {}", node);
            return;
        }
        self.listeners
            .entry(node)
            .or_default()
            .push((kind, Rc::new(handler)));
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.listeners
            .get(&node)
            .map(|list| list.iter().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    /// Dispatch `event` at `target`, bubbling towards the document root.
    pub fn dispatch(&mut self, target: NodeId, event: Event) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        if !self.exists(target) {
            return outcome;
        }

        // The bubbling path is fixed before any listener runs; listeners may
        // move nodes around.
        let mut path = vec![target];
        let mut cursor = target;
        while let Some(parent) = self.parent(cursor) {
            path.push(parent);
            cursor = parent;
        }

        let mut cx = EventContext::new(event, target);
        for node in path {
            let handlers: Vec<Listener> = match self.listeners.get(&node) {
                Some(list) => list
                    .iter()
                    .filter(|(k, _)| *k == event.kind)
                    .map(|(_, h)| Rc::clone(h))
                    .collect(),
                None => continue,
            };

            cx.current_target = node;
            for handler in handlers {
                handler(self, &mut cx);
                outcome.handled += 1;
            }

            if cx.propagation_stopped {
                break;
            }
        }

        log::trace!(
            "[event] {:?} at {} ran {} listener(s)",
            event.kind,
            target,
            outcome.handled
        );

        outcome.propagation_stopped = cx.propagation_stopped;
        outcome.default_prevented = cx.default_prevented;
        outcome
    }

    /// Simulate a press of `button` on `target`: fires `SelectStart` for the
    /// primary button, then `MouseDown`.
    pub fn mouse_down(&mut self, target: NodeId, button: MouseButton) -> DispatchOutcome {
        if button == MouseButton::Left {
            self.dispatch(target, Event::new(EventKind::SelectStart));
        }
        self.dispatch(target, Event::mouse(EventKind::MouseDown, button))
    }

    /// Simulate a full primary-button click: press, release, click.
    pub fn click(&mut self, target: NodeId) -> DispatchOutcome {
        let down = self.mouse_down(target, MouseButton::Left);
        let up = self.dispatch(target, Event::mouse(EventKind::MouseUp, MouseButton::Left));
        let click = self.dispatch(target, Event::mouse(EventKind::Click, MouseButton::Left));
        DispatchOutcome {
            handled: down.handled + up.handled + click.handled,
            propagation_stopped: down.propagation_stopped || click.propagation_stopped,
            default_prevented: down.default_prevented || click.default_prevented,
        }
    }
}
