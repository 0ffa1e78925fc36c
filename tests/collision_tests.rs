//! Actor push-out against walls, doors, pushwalls and other actors.

use rampage::actor::{AVOID_WALLS_ATTEMPTS, Actor};
use rampage::tilemap::{MapData, Tile};
use rampage::vector::Vector;
use rampage::world::{Door, Monster, Player, Pushwall, World};

/// 6x6 room with a wall column at x = 2 on rows 1..=3 and the player in the
/// bottom-right corner.
fn room_with_pillar() -> World {
    let mut tiles = vec![0u8; 36];
    let mut things = vec![0u8; 36];
    for i in 0..6 {
        tiles[i] = 1;
        tiles[30 + i] = 1;
        tiles[i * 6] = 1;
        tiles[i * 6 + 5] = 1;
    }
    for y in 1..=3 {
        tiles[y * 6 + 2] = 1;
    }
    things[4 * 6 + 4] = 1;
    let mut world = World::new(&MapData {
        width: 6,
        tiles,
        things,
    })
    .unwrap();
    world.effects.clear();
    world
}

#[test]
fn monster_against_wall_column_converges() {
    let world = room_with_pillar();
    let mut monster = Monster::new(Vector::new(2.0, 2.5));
    assert_eq!(monster.radius(), 0.4375);
    assert!(monster.intersection_with_map(&world.map).is_some());

    monster.avoid_walls(&world);
    assert_eq!(monster.intersection_with_map(&world.map), None);
    assert!((monster.position.x - 1.5625).abs() < 1e-12);
    assert_eq!(monster.position.y, 2.5);
}

#[test]
fn avoid_walls_gives_up_inside_solid_rock() {
    let mut tiles = vec![1u8; 25];
    let mut things = vec![0u8; 25];
    tiles[0] = 0;
    things[0] = 1;
    let world = World::new(&MapData {
        width: 5,
        tiles,
        things,
    })
    .unwrap();

    let mut monster = Monster::new(Vector::new(2.5, 2.5));
    monster.avoid_walls(&world);
    // bounded: at most AVOID_WALLS_ATTEMPTS pushes of at most one radius
    let moved = (monster.position - Vector::new(2.5, 2.5)).length();
    assert!(moved <= AVOID_WALLS_ATTEMPTS as f64 * Monster::RADIUS * 2.0);
    assert!(monster.is_stuck(&world));
}

#[test]
fn dead_monster_is_walked_through() {
    let mut world = room_with_pillar();
    let mut monster = Monster::new(Vector::new(4.0, 4.5));
    monster.health = 0.0;
    world.monsters.push(monster);
    let before = world.player.position;
    world.update(1.0 / 120.0, &Default::default());
    assert_eq!(world.player.position, before);
    assert_eq!(world.monsters[0].position, monster.position);
}

#[test]
fn living_monster_and_player_share_the_push() {
    let mut world = room_with_pillar();
    world.monsters.push(Monster::new(Vector::new(4.0, 4.5)));
    world.update(1.0 / 120.0, &Default::default());
    let gap = world.monsters[0].position.x - world.player.position.x;
    assert!(gap.abs() >= Player::RADIUS + Monster::RADIUS - 1e-9);
    assert!(world.player.intersection_with_actor(&world.monsters[0]).is_none());
}

#[test]
fn closed_door_blocks_the_player() {
    let mut world = room_with_pillar();
    world.doors.push(Door::new(Vector::new(4.5, 3.5), false));
    world.player.position = Vector::new(4.5, 3.7);
    assert!(world.player.intersection_with_world(&world).is_some());
    let mut player = world.player;
    player.avoid_walls(&world);
    assert!(player.position.y >= 3.5 + Player::RADIUS - 1e-9);

    // fully open door no longer overlaps
    world.doors[0].offset = 1.0;
    assert!(world.player.intersection_with_world(&world).is_none());
}

#[test]
fn dead_monster_ignores_pushwalls() {
    let mut world = room_with_pillar();
    world.pushwalls.push(Pushwall::new(Vector::new(4.5, 2.5), Tile::Wall));

    let mut monster = Monster::new(Vector::new(3.8, 2.5));
    assert!(monster.intersection_with_world(&world).is_some());
    let mut alive = monster;
    alive.avoid_walls(&world);
    assert!((alive.position.x - 3.5625).abs() < 1e-12);

    monster.health = 0.0;
    assert_eq!(monster.intersection_with_world(&world), None);
    monster.avoid_walls(&world);
    assert_eq!(monster.position, Vector::new(3.8, 2.5));
}
