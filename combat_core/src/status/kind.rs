//! Effect kinds and their behavioural families

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every status effect the engine knows about.
///
/// Declaration order is the tick order: `Ord` is derived, so the status
/// table (a `BTreeMap`) iterates in the same order as [`EffectKind::TICK_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    // Control loss
    Freeze,
    Stun,
    // Damage over time
    Poison,
    Burn,
    Bleed,
    BloodTorrent,
    EntropicDebt,
    // Reversible stat modifiers. Corruption runs first so the buffs it
    // strips never tick on the same turn.
    CreepingCorruption,
    CompressionSickness,
    MiasmaAura,
    HasteDysphoria,
    Inspire,
    // Timed bookkeeping
    Shield,
    Blessed,
    Cursed,
    BeetleBane,
    SpitefulReflection,
    // Stack-timer pools
    AudienceFatigue,
    SoulTax,
    FesterMark,
    // Persistent until cleared
    SpotlightPing,
    Marked,
    // One-shot combat markers
    DefendDamage,
    DefendAttack,
    Advantage,
}

/// Behavioural family, decides how application and ticking work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectFamily {
    DamageOverTime,
    /// Damage over time whose magnitude is a stack count
    StackingDamage,
    ControlLoss,
    Reversible,
    Timed,
    StackPool,
    Persistent,
    Marker,
}

impl EffectKind {
    /// Fixed per-tick processing order
    pub const TICK_ORDER: [EffectKind; 25] = [
        EffectKind::Freeze,
        EffectKind::Stun,
        EffectKind::Poison,
        EffectKind::Burn,
        EffectKind::Bleed,
        EffectKind::BloodTorrent,
        EffectKind::EntropicDebt,
        EffectKind::CreepingCorruption,
        EffectKind::CompressionSickness,
        EffectKind::MiasmaAura,
        EffectKind::HasteDysphoria,
        EffectKind::Inspire,
        EffectKind::Shield,
        EffectKind::Blessed,
        EffectKind::Cursed,
        EffectKind::BeetleBane,
        EffectKind::SpitefulReflection,
        EffectKind::AudienceFatigue,
        EffectKind::SoulTax,
        EffectKind::FesterMark,
        EffectKind::SpotlightPing,
        EffectKind::Marked,
        EffectKind::DefendDamage,
        EffectKind::DefendAttack,
        EffectKind::Advantage,
    ];

    pub fn family(&self) -> EffectFamily {
        use EffectKind::*;
        match self {
            Freeze | Stun => EffectFamily::ControlLoss,
            Poison | Burn | Bleed => EffectFamily::DamageOverTime,
            BloodTorrent | EntropicDebt => EffectFamily::StackingDamage,
            CreepingCorruption | CompressionSickness | MiasmaAura | HasteDysphoria | Inspire => {
                EffectFamily::Reversible
            }
            Shield | Blessed | Cursed | BeetleBane | SpitefulReflection => EffectFamily::Timed,
            AudienceFatigue | SoulTax | FesterMark => EffectFamily::StackPool,
            SpotlightPing | Marked => EffectFamily::Persistent,
            DefendDamage | DefendAttack | Advantage => EffectFamily::Marker,
        }
    }

    /// Debuffs can be reflected and are removed by cleansing
    pub fn is_debuff(&self) -> bool {
        use EffectKind::*;
        matches!(
            self,
            Freeze
                | Stun
                | Poison
                | Burn
                | Bleed
                | BloodTorrent
                | EntropicDebt
                | CreepingCorruption
                | CompressionSickness
                | MiasmaAura
                | HasteDysphoria
                | Cursed
                | AudienceFatigue
                | SoulTax
                | FesterMark
        )
    }

    /// Stable snake_case identifier, matches the serialized form
    pub fn id(&self) -> &'static str {
        use EffectKind::*;
        match self {
            Freeze => "freeze",
            Stun => "stun",
            Poison => "poison",
            Burn => "burn",
            Bleed => "bleed",
            BloodTorrent => "blood_torrent",
            EntropicDebt => "entropic_debt",
            CreepingCorruption => "creeping_corruption",
            CompressionSickness => "compression_sickness",
            MiasmaAura => "miasma_aura",
            HasteDysphoria => "haste_dysphoria",
            Inspire => "inspire",
            Shield => "shield",
            Blessed => "blessed",
            Cursed => "cursed",
            BeetleBane => "beetle_bane",
            SpitefulReflection => "spiteful_reflection",
            AudienceFatigue => "audience_fatigue",
            SoulTax => "soul_tax",
            FesterMark => "fester_mark",
            SpotlightPing => "spotlight_ping",
            Marked => "marked",
            DefendDamage => "defend_damage",
            DefendAttack => "defend_attack",
            Advantage => "advantage",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Accepts the snake_case id as well as kebab-case and spaced spellings
/// used by floor scripts ("blood-torrent", "Spotlight Ping").
impl FromStr for EffectKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        EffectKind::TICK_ORDER
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| EngineError::UnknownEffect(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_order_matches_ord() {
        let mut sorted = EffectKind::TICK_ORDER;
        sorted.sort();
        assert_eq!(sorted, EffectKind::TICK_ORDER);
    }

    #[test]
    fn test_parse_script_spellings() {
        assert_eq!("blood-torrent".parse::<EffectKind>().unwrap(), EffectKind::BloodTorrent);
        assert_eq!("Spotlight Ping".parse::<EffectKind>().unwrap(), EffectKind::SpotlightPing);
        assert!("gloom".parse::<EffectKind>().is_err());
    }

    #[test]
    fn test_serialized_form_matches_id() {
        for kind in EffectKind::TICK_ORDER {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn test_markers_are_not_debuffs() {
        assert!(!EffectKind::DefendDamage.is_debuff());
        assert!(!EffectKind::SpotlightPing.is_debuff());
        assert!(EffectKind::Poison.is_debuff());
    }
}
