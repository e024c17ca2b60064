use strum_macros::AsRefStr;

/// High-level modes of the game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
pub enum GameState {
    #[default]
    Boot,
    Intro,
    Credit,
    Ready,
    Hunting,
    LevelStarting,
    LevelComplete,
    PacmanDying,
    GhostDying,
    GameOver,
    Intermission,
    IntermissionTest,
}

/// A transition the controller just made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameStateChange {
    pub old: GameState,
    pub new: GameState,
}

impl GameStateChange {
    pub const fn new(old: GameState, new: GameState) -> Self {
        Self { old, new }
    }
}

/// Everything the controller tells the front-end about, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum GameEvent {
    StateChange(GameStateChange),
    /// A new scatter phase began (0-based).
    ScatterPhaseStarted(u8),
    PlayerGainsPower,
    PlayerLosesPower,
    PlayerFindsFood,
    BonusActivated,
    BonusEaten,
    ExtraLife,
    GhostReturnsHome,
    GhostEntersHouse,
    LevelStarting,
    /// Something changed that requires the current scene to start over (variant switch,
    /// intro reset).
    UnspecifiedChange,
}
