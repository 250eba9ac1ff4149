//! Collision Detection
//!
//! Player hitbox against enemy and coin sprite rectangles. Detection only;
//! the tick decides what a hit means.

use crate::core::rect::Rect;
use crate::game::entity::{Bounds, Coin, Enemy};

/// First enemy overlapping the hitbox, in collection order.
///
/// At most one enemy hurts the player per tick.
pub fn first_enemy_hit(hitbox: &Rect, enemies: &[Enemy]) -> Option<u32> {
    enemies
        .iter()
        .find(|enemy| hitbox.intersects(&enemy.rect()))
        .map(|enemy| enemy.id)
}

/// Remove and return every coin overlapping the hitbox.
///
/// All overlapping coins are taken in the same tick, in collection order.
pub fn take_coin_hits(hitbox: &Rect, coins: &mut Vec<Coin>) -> Vec<Coin> {
    let mut taken = Vec::new();
    coins.retain(|coin| {
        if hitbox.intersects(&coin.rect()) {
            taken.push(coin.clone());
            false
        } else {
            true
        }
    });
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::entity::Behavior;
    use crate::game::sprite::SpriteSize;

    fn coin(id: u32, x: f32) -> Coin {
        Coin { id, pos: Vec2::new(x, 620.0), size: SpriteSize::new(40.0, 40.0) }
    }

    fn enemy(id: u32, x: f32) -> Enemy {
        Enemy {
            id,
            sprite: "enemies/enemy_1".into(),
            pos: Vec2::new(x, 660.0),
            size: SpriteSize::new(96.0, 96.0),
            behavior: Behavior::Static,
        }
    }

    #[test]
    fn test_first_enemy_hit_stops_early() {
        let hitbox = Rect::new(300.0, 560.0, 40.0, 100.0);
        let enemies = vec![enemy(1, 1000.0), enemy(2, 320.0), enemy(3, 330.0)];
        assert_eq!(first_enemy_hit(&hitbox, &enemies), Some(2));
        assert_eq!(first_enemy_hit(&hitbox, &enemies[..1]), None);
    }

    #[test]
    fn test_all_overlapping_coins_taken() {
        let hitbox = Rect::new(300.0, 560.0, 40.0, 100.0);
        let mut coins = vec![coin(1, 310.0), coin(2, 900.0), coin(3, 330.0)];

        let taken = take_coin_hits(&hitbox, &mut coins);
        let ids: Vec<u32> = taken.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].id, 2);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Coin spans x 340..380; hitbox ends at 340
        let hitbox = Rect::new(300.0, 560.0, 40.0, 100.0);
        let mut coins = vec![coin(1, 360.0)];
        assert!(take_coin_hits(&hitbox, &mut coins).is_empty());
    }
}
