//! Common error infrastructure for battle-core.
//!
//! Nothing in the battle rules is fatal. Every error here describes a request
//! that was refused while leaving unit and battle state untouched, and carries
//! a severity so callers can decide whether to surface it or drop it.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure family has its own enum with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No Mutation on Error**: A returned error guarantees no state was changed

use crate::engine::BattleState;
use crate::skill::SkillId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The request was legal but its preconditions were not met
///   (e.g. not enough mana). The player may pick another action.
/// - **Validation**: The request arrived at the wrong time or named something
///   that does not exist (e.g. input outside the player's turn).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Preconditions unmet; retrying with a different action can succeed.
    Recoverable,

    /// Invalid or stale input; should be dropped without retry.
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for logging fields and assertions in tests.
    fn error_code(&self) -> &'static str;
}

/// Why a unit cannot use a skill right now.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GatingFailure {
    #[error("caster is dead")]
    CasterDead,

    #[error("not enough mana (requires {required}, has {available})")]
    InsufficientMana { required: u32, available: u32 },

    #[error("not enough health (requires {required}, has {available})")]
    InsufficientHealth { required: u32, available: u32 },

    #[error("skill is on cooldown for {remaining} more turn(s)")]
    OnCooldown { remaining: u32 },
}

impl BattleError for GatingFailure {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CasterDead => "GATING_CASTER_DEAD",
            Self::InsufficientMana { .. } => "GATING_INSUFFICIENT_MANA",
            Self::InsufficientHealth { .. } => "GATING_INSUFFICIENT_HEALTH",
            Self::OnCooldown { .. } => "GATING_ON_COOLDOWN",
        }
    }
}

/// Why a player input was refused by the battle state machine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("no battle has been started")]
    BattleNotStarted,

    #[error("input is not accepted in state {state} (or a step is still pending)")]
    NotAcceptingInput { state: BattleState },

    #[error("no skill equipped in slot {index}")]
    SkillSlotEmpty { index: usize },

    #[error("cannot use skill '{skill}': {reason}")]
    SkillUnavailable { skill: SkillId, reason: GatingFailure },

    #[error("no skill is awaiting a target")]
    NoSkillSelected,

    #[error("target index {index} out of range ({available} candidate(s))")]
    TargetOutOfRange { index: usize, available: usize },
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SkillUnavailable { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleNotStarted => "ACTION_BATTLE_NOT_STARTED",
            Self::NotAcceptingInput { .. } => "ACTION_NOT_ACCEPTING_INPUT",
            Self::SkillSlotEmpty { .. } => "ACTION_SKILL_SLOT_EMPTY",
            Self::SkillUnavailable { .. } => "ACTION_SKILL_UNAVAILABLE",
            Self::NoSkillSelected => "ACTION_NO_SKILL_SELECTED",
            Self::TargetOutOfRange { .. } => "ACTION_TARGET_OUT_OF_RANGE",
        }
    }
}

/// Errors from managing a unit's equipped skill slots.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("slot {slot} is out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },

    #[error("skill '{0}' has not been learned")]
    NotLearned(SkillId),

    #[error("skill '{0}' is already equipped")]
    AlreadyEquipped(SkillId),
}

impl BattleError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotOutOfRange { .. } => "EQUIP_SLOT_OUT_OF_RANGE",
            Self::NotLearned(_) => "EQUIP_NOT_LEARNED",
            Self::AlreadyEquipped(_) => "EQUIP_ALREADY_EQUIPPED",
        }
    }
}
