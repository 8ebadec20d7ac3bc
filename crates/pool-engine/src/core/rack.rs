//! Ball catalogue, the opening rack and clear-spot search for returned balls.

use std::f32::consts::FRAC_PI_3;

use glam::Vec2;

use crate::core::ball::Ball;
use crate::core::table::TableConfig;

/// Object balls in rack order, apex first, row by row.
///
/// ```text
///  1
///  9 10
///  2  8  3
///  4  7  6  5
/// 15 14 13 12 11
/// ```
pub const RACK_ORDER: [u8; 15] = [1, 9, 10, 2, 8, 3, 4, 7, 6, 5, 15, 14, 13, 12, 11];

/// Ball centre spacing in the rack, in radii. Slightly over 2 so the rack
/// does not start in contact.
const RACK_SPACING: f32 = 2.01;

/// A returned ball needs this much room from every ball on the table.
const CLEAR_RADIUS: f32 = 30.0;
const SEARCH_GRID: f32 = 40.0;
/// Candidates closer than this to the felt edge are skipped.
const SEARCH_EDGE_MARGIN: f32 = 40.0;

/// Rack slot positions. The apex points at the cue ball (-x); rows extend
/// toward +x, each centred on the apex line.
pub fn rack_positions(apex: Vec2, radius: f32) -> [Vec2; 15] {
    let spacing = radius * RACK_SPACING;
    let row_advance = spacing * FRAC_PI_3.sin();
    let mut positions = [Vec2::ZERO; 15];

    let mut slot = 0;
    for row in 0..5 {
        let count = row + 1;
        let x = apex.x + row as f32 * row_advance;
        let first_y = apex.y - (count - 1) as f32 * spacing / 2.0;
        for i in 0..count {
            positions[slot] = Vec2::new(x, first_y + i as f32 * spacing);
            slot += 1;
        }
    }

    positions
}

/// All 16 balls at their opening positions: the cue ball first, then the rack.
pub fn rack(table: &TableConfig) -> Vec<Ball> {
    let radius = table.ball_radius;
    let mut balls = Vec::with_capacity(16);
    balls.push(Ball::new(0, table.cue_spot(), radius));
    let slots = rack_positions(table.rack_spot(), radius);
    for (&number, &pos) in RACK_ORDER.iter().zip(slots.iter()) {
        balls.push(Ball::new(number, pos, radius));
    }
    balls
}

/// Search outward from the rack spot on a square grid for a spot at least
/// `CLEAR_RADIUS` from every ball still on the table.
pub fn find_clear_spot(table: &TableConfig, balls: &[Ball]) -> Option<Vec2> {
    let origin = table.rack_spot();
    let max_offset = table.felt_width.max(table.felt_height) / 2.0;
    let rings = (max_offset / SEARCH_GRID).floor() as i32;

    for ring in 0..=rings {
        for i in -ring..=ring {
            for j in -ring..=ring {
                let candidate = origin + Vec2::new(i as f32, j as f32) * SEARCH_GRID;
                if !table.contains_felt(candidate, SEARCH_EDGE_MARGIN) {
                    continue;
                }
                let clear = balls
                    .iter()
                    .filter(|b| !b.is_pocketed())
                    .all(|b| b.pos.distance(candidate) >= CLEAR_RADIUS);
                if clear {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ball::{BallRole, BallState};

    #[test]
    fn rack_rows_grow_away_from_apex() {
        let apex = Vec2::new(975.0, 450.0);
        let pos = rack_positions(apex, 20.0);
        assert_eq!(pos[0], apex);
        // Row 1 straddles the apex line.
        assert!((pos[1].y - (450.0 - 20.1)).abs() < 1e-3);
        assert!((pos[2].y - (450.0 + 20.1)).abs() < 1e-3);
        assert!(pos[1].x > apex.x);
        // Back row is five wide and centred.
        assert!((pos[12].y - 450.0).abs() < 1e-3);
        assert!((pos[10].x - pos[14].x).abs() < 1e-3);
    }

    #[test]
    fn rack_balls_do_not_overlap() {
        let pos = rack_positions(Vec2::new(975.0, 450.0), 20.0);
        for i in 0..pos.len() {
            for j in (i + 1)..pos.len() {
                assert!(pos[i].distance(pos[j]) >= 40.0, "slots {} and {} overlap", i, j);
            }
        }
    }

    #[test]
    fn full_rack_has_one_of_each_number() {
        let balls = rack(&TableConfig::default());
        assert_eq!(balls.len(), 16);
        assert_eq!(balls[0].role, BallRole::Cue);
        let mut numbers: Vec<u8> = balls.iter().map(Ball::number).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (0..16).collect::<Vec<u8>>());
        let eight = balls.iter().find(|b| b.number() == 8).expect("8-ball racked");
        assert_eq!(eight.role, BallRole::EightBall);
    }

    #[test]
    fn clear_spot_on_empty_table_is_rack_spot() {
        let table = TableConfig::default();
        assert_eq!(find_clear_spot(&table, &[]), Some(table.rack_spot()));
    }

    #[test]
    fn clear_spot_avoids_occupied_origin() {
        let table = TableConfig::default();
        let blocker = Ball::new(3, table.rack_spot(), 20.0);
        let spot = find_clear_spot(&table, &[blocker]).expect("space on the table");
        assert_eq!(spot, table.rack_spot() + Vec2::new(-40.0, -40.0));
    }

    #[test]
    fn clear_spot_ignores_pocketed_balls() {
        let table = TableConfig::default();
        let mut ghost = Ball::new(3, table.rack_spot(), 20.0);
        ghost.state = BallState::Pocketed;
        assert_eq!(find_clear_spot(&table, &[ghost]), Some(table.rack_spot()));
    }

    #[test]
    fn clear_spot_keeps_distance_from_full_rack() {
        let table = TableConfig::default();
        let balls = rack(&table);
        let spot = find_clear_spot(&table, &balls).expect("space on the table");
        assert!(balls.iter().all(|b| b.pos.distance(spot) >= 30.0));
        assert!(table.contains_felt(spot, 40.0));
    }
}
