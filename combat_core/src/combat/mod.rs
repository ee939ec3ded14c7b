//! Combat resolution - Attacks, player actions and enemy turns

mod actions;
mod attack;
mod enemy;

pub use actions::{
    award_item, flee, resolve_player_action, use_cleansing_draught, use_health_potion,
    PlayerAction,
};
pub use attack::resolve_attack;
pub use enemy::resolve_enemy_turn;

pub use crate::defense::consume_shield;
