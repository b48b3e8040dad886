/// Authoritative phase of a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    #[default]
    #[strum(serialize = "START")]
    Start,
    #[strum(serialize = "PLAYERTURN")]
    PlayerTurn,
    #[strum(serialize = "ENEMYTURN")]
    EnemyTurn,
    #[strum(serialize = "SELECTING_TARGET")]
    SelectingTarget,
    #[strum(serialize = "WON")]
    Won,
    #[strum(serialize = "LOST")]
    Lost,
    #[strum(serialize = "LEVEL_UP")]
    LevelUp,
}

/// One of the two combatants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// How a finished battle ended for the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
}
