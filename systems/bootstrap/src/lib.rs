#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that sequences the Simple Arcade application states.

use std::time::Duration;

use simple_arcade_world::{query, World};

/// Time the splash screen stays up unless configured otherwise.
pub const DEFAULT_SPLASH: Duration = Duration::from_secs(2);

/// Top-level application state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Logo shown while the application starts.
    Splash,
    /// Menu offering to start a game.
    MainMenu,
    /// A game in progress.
    Gameplay,
}

/// Whether a state became active or stopped being active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// The state is now the active one.
    Entered,
    /// The state is no longer the active one.
    Exited,
}

/// Record produced by the enter and exit hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateTransition {
    /// State the hook ran for.
    pub state: AppState,
    /// Hook that ran.
    pub phase: TransitionPhase,
}

fn enter(state: AppState, out: &mut Vec<StateTransition>) {
    out.push(StateTransition {
        state,
        phase: TransitionPhase::Entered,
    });
}

fn exit(state: AppState, out: &mut Vec<StateTransition>) {
    out.push(StateTransition {
        state,
        phase: TransitionPhase::Exited,
    });
}

/// Stack of application states; only the top one is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateStack {
    states: Vec<AppState>,
}

impl StateStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// State currently receiving input, if any.
    #[must_use]
    pub fn active(&self) -> Option<AppState> {
        self.states.last().copied()
    }

    /// Number of stacked states.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    /// Covers the active state with `state`.
    pub fn push(&mut self, state: AppState, out: &mut Vec<StateTransition>) {
        if let Some(covered) = self.active() {
            exit(covered, out);
        }
        self.states.push(state);
        enter(state, out);
    }

    /// Removes the active state and reactivates the one beneath it.
    pub fn pop(&mut self, out: &mut Vec<StateTransition>) -> Option<AppState> {
        let popped = self.states.pop()?;
        exit(popped, out);
        if let Some(uncovered) = self.active() {
            enter(uncovered, out);
        }
        Some(popped)
    }

    /// Swaps the active state for `state` without growing the stack.
    pub fn replace(&mut self, state: AppState, out: &mut Vec<StateTransition>) {
        if let Some(previous) = self.states.pop() {
            exit(previous, out);
        }
        self.states.push(state);
        enter(state, out);
    }
}

/// Input relevant to application sequencing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppInput {
    /// Frame time elapsed.
    Elapsed(Duration),
    /// The player asked to start a game.
    StartPressed,
    /// The player pressed escape.
    EscapePressed,
}

/// Sequences splash, menu, and gameplay states and greets the player.
#[derive(Debug)]
pub struct Bootstrap {
    stack: StateStack,
    splash_remaining: Duration,
    quit_requested: bool,
}

impl Bootstrap {
    /// Starts the application on the splash screen.
    #[must_use]
    pub fn new(splash: Duration, out: &mut Vec<StateTransition>) -> Self {
        let mut stack = StateStack::new();
        stack.push(AppState::Splash, out);
        Self {
            stack,
            splash_remaining: splash,
            quit_requested: false,
        }
    }

    /// State currently active.
    #[must_use]
    pub fn active(&self) -> Option<AppState> {
        self.stack.active()
    }

    /// Reports whether the player asked to leave from the main menu.
    #[must_use]
    pub const fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Applies one input to the state stack.
    pub fn advance(&mut self, input: AppInput, out: &mut Vec<StateTransition>) {
        match (self.stack.active(), input) {
            (Some(AppState::Splash), AppInput::Elapsed(dt)) => {
                self.splash_remaining = self.splash_remaining.saturating_sub(dt);
                if self.splash_remaining.is_zero() {
                    self.stack.replace(AppState::MainMenu, out);
                }
            }
            (Some(AppState::MainMenu), AppInput::StartPressed) => {
                self.stack.push(AppState::Gameplay, out);
            }
            (Some(AppState::MainMenu), AppInput::EscapePressed) => {
                self.quit_requested = true;
            }
            (Some(AppState::Gameplay), AppInput::EscapePressed) => {
                let _ = self.stack.pop(out);
            }
            _ => {}
        }
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }
}
