/// Level-derived maxima and combat stats of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_health: u32,
    pub max_mana: u32,
    pub attack: u32,
    pub defense: u32,
    /// Always within `[1, 100]` once scaled.
    pub accuracy: u32,
}

impl StatBlock {
    pub const MIN_ACCURACY: u32 = 1;
    pub const MAX_ACCURACY: u32 = 100;

    pub const fn new(max_health: u32, max_mana: u32, attack: u32, defense: u32, accuracy: u32) -> Self {
        Self {
            max_health,
            max_mana,
            attack,
            defense,
            accuracy,
        }
    }
}

impl Default for StatBlock {
    /// Baseline level-1 stats of an authored unit.
    fn default() -> Self {
        Self::new(100, 50, 10, 5, 95)
    }
}
