//! Fixed timestep scene update and one-shot actions

use glam::Vec2;
use rand::Rng;

use super::scene::{ListMode, SceneKind, SceneState, SpriteCounts};
use super::sprite::{MeteorStyle, Sprite};

/// One-shot commands from the input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    /// Print sprite counts
    Report,
    /// Eject the pilot of a random ship
    EjectRandom,
    /// Eject every pilot
    EjectAll,
    /// Eject the pilots of all ships under a world point
    EjectAt(Vec2),
    /// Stop clearing the screen between frames
    ToggleTrippy,
    TogglePerfGraph,
    CycleMeteorStyle,
    ToggleListMode,
}

/// Things the runner reports to the console
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Quit,
    Report(SpriteCounts),
    MeteorStyleChanged(MeteorStyle),
    ListModeChanged(ListMode),
}

/// Advance the scene by one fixed step
pub fn tick(state: &mut SceneState, dt: f32) {
    state.steps += 1;
    state.elapsed += dt;

    let bounds = state.bounds;
    state.meteors.update(&bounds);
    state.ships.update(&bounds);
    state.pilots.update(&bounds);
    state.drifters.update(&bounds);

    if state.kind == SceneKind::Spiral {
        state.spiral.step(&mut state.rng);
    }

    let now = state.elapsed;

    if let Some(spawner) = state.meteor_spawner.as_mut() {
        let count = spawner.poll(now, state.meteors.len());
        for _ in 0..count {
            let meteor = Sprite::meteor(&mut state.rng, &bounds, state.meteor_style);
            state.meteors.push(meteor);
        }
    }

    if let Some(spawner) = state.ship_spawner.as_mut() {
        // Pilots sharing the list do not count towards the cap
        let population = state.ships.count_where(Sprite::is_ship);
        let count = spawner.poll(now, population);
        for _ in 0..count {
            let ship = Sprite::ship(&mut state.rng, &bounds, state.config.ship_scale);
            state.ships.push(ship);
        }
    }

    if let Some(spawner) = state.drifter_spawner.as_mut() {
        if spawner.poll(now, state.drifters.len()) > 0 {
            let drifter = Sprite::drifter(&mut state.rng, &bounds);
            state.drifters.push(drifter);
            log::info!("{}", state.drifters.len());
        }
    }
}

/// Apply a one-shot action. View toggles are handled by the app and
/// ignored here.
pub fn apply(state: &mut SceneState, action: Action) -> Option<SceneEvent> {
    match action {
        Action::Quit => Some(SceneEvent::Quit),
        Action::Report => Some(SceneEvent::Report(state.counts())),
        Action::EjectRandom => {
            if !state.ships.is_empty() {
                let index = state.rng.random_range(0..state.ships.len());
                eject_pilot(state, index);
            }
            None
        }
        Action::EjectAll => {
            // Pilots appended in single-list mode are skipped
            for index in 0..state.ships.len() {
                eject_pilot(state, index);
            }
            None
        }
        Action::EjectAt(point) => {
            for index in state.ships.sprites_at_point(point) {
                eject_pilot(state, index);
            }
            None
        }
        Action::CycleMeteorStyle => {
            if state.kind != SceneKind::MeteorField {
                return None;
            }
            state.meteor_style = state.meteor_style.next();
            Some(SceneEvent::MeteorStyleChanged(state.meteor_style))
        }
        Action::ToggleListMode => {
            if state.kind != SceneKind::ListBench {
                return None;
            }
            state.set_list_mode(state.list_mode.toggled());
            Some(SceneEvent::ListModeChanged(state.list_mode))
        }
        Action::ToggleTrippy | Action::TogglePerfGraph => None,
    }
}

/// Eject the pilot of the ship at `index` in the ship list.
///
/// Returns false if the slot holds no ship, or the ship is already
/// tumbling and the scene forbids a second ejection.
pub fn eject_pilot(state: &mut SceneState, index: usize) -> bool {
    let Some(ship) = state.ships.get_mut(index) else {
        return false;
    };
    if !ship.is_ship() || (state.config.guard_tumbling && ship.is_tumbling()) {
        return false;
    }
    if state.config.tumble_on_eject {
        ship.tumble(&mut state.rng, state.config.tumble_shrink);
    }
    let pilot = ship.eject_pilot(&mut state.rng, &state.config.pilot);

    match state.list_mode {
        ListMode::Single => state.ships.push(pilot),
        ListMode::Separate => state.pilots.push(pilot),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::scene::{MAX_METEORS, MAX_SHIPS, METEORS_TO_ADD, SHIPS_TO_ADD};

    fn run(state: &mut SceneState, steps: usize) {
        for _ in 0..steps {
            tick(state, SIM_DT);
        }
    }

    #[test]
    fn test_sprites_scene_spawns_ships() {
        let mut state = SceneState::new(SceneKind::Sprites, 1);
        run(&mut state, 60);
        // 0.15 s at 60 Hz fires every 9th or 10th step
        assert!(state.ships.len() >= 5 && state.ships.len() <= 7);
        assert!(state.meteors.is_empty());
    }

    #[test]
    fn test_meteor_field_respects_cap() {
        let mut state = SceneState::new(SceneKind::MeteorField, 2);
        run(&mut state, 20);
        assert_eq!(state.meteors.len(), METEORS_TO_ADD);
        run(&mut state, 600);
        assert!(state.meteors.len() < MAX_METEORS + METEORS_TO_ADD);
    }

    #[test]
    fn test_list_bench_caps_ships_in_batches() {
        let mut state = SceneState::new(SceneKind::ListBench, 3);
        run(&mut state, 10);
        assert_eq!(state.ships.len(), SHIPS_TO_ADD);
        run(&mut state, 300);
        assert!(state.counts().ships < MAX_SHIPS + SHIPS_TO_ADD);
    }

    #[test]
    fn test_drift_scene_launches_every_five_steps() {
        let mut state = SceneState::new(SceneKind::Drift, 4);
        run(&mut state, 15);
        assert_eq!(state.drifters.len(), 3);
    }

    #[test]
    fn test_spiral_turns_each_step() {
        let mut state = SceneState::new(SceneKind::Spiral, 5);
        run(&mut state, 2);
        assert_eq!(state.spiral.start_angle, 349.0);
        assert!(state.ships.is_empty());
    }

    #[test]
    fn test_eject_guarded_ship_only_once() {
        let mut state = SceneState::new(SceneKind::MeteorField, 6);
        run(&mut state, 10);
        assert!(!state.ships.is_empty());

        assert!(eject_pilot(&mut state, 0));
        assert!(state.ships.get(0).is_some_and(Sprite::is_tumbling));
        assert!(!eject_pilot(&mut state, 0));
        assert_eq!(state.pilots.len(), 1);
    }

    #[test]
    fn test_sprites_scene_allows_repeat_ejection() {
        let mut state = SceneState::new(SceneKind::Sprites, 7);
        run(&mut state, 10);
        assert!(eject_pilot(&mut state, 0));
        assert!(eject_pilot(&mut state, 0));
        assert_eq!(state.pilots.len(), 2);
        // Sprites scene ships spin but keep their size
        assert_eq!(state.ships.get(0).map(|s| s.motion.dscale), Some(0.0));
    }

    #[test]
    fn test_eject_all_in_single_mode_skips_pilots() {
        let mut state = SceneState::new(SceneKind::ListBench, 8);
        run(&mut state, 10);
        apply(&mut state, Action::ToggleListMode);
        assert_eq!(state.list_mode, ListMode::Single);

        let ships = state.ships.len();
        apply(&mut state, Action::EjectAll);
        assert_eq!(state.ships.len(), ships * 2);
        assert!(state.pilots.is_empty());
        assert_eq!(state.counts().ships, ships);
        assert_eq!(state.counts().pilots, ships);
    }

    #[test]
    fn test_list_mode_toggle_moves_pilots() {
        let mut state = SceneState::new(SceneKind::ListBench, 9);
        run(&mut state, 10);
        apply(&mut state, Action::EjectAll);
        let pilots = state.pilots.len();
        assert!(pilots > 0);

        apply(&mut state, Action::ToggleListMode);
        assert!(state.pilots.is_empty());
        assert_eq!(state.ships.count_where(Sprite::is_pilot), pilots);

        apply(&mut state, Action::ToggleListMode);
        assert_eq!(state.pilots.len(), pilots);
        assert_eq!(state.ships.count_where(Sprite::is_pilot), 0);
    }

    #[test]
    fn test_foreground_is_depth_sorted_in_both_modes() {
        let mut state = SceneState::new(SceneKind::ListBench, 10);
        run(&mut state, 40);
        apply(&mut state, Action::EjectAll);
        run(&mut state, 5);

        for _ in 0..2 {
            state.prepare_draw();
            let scales: Vec<f32> = state.foreground().iter().map(|s| s.scale).collect();
            assert!(scales.windows(2).all(|w| w[0] <= w[1]));
            apply(&mut state, Action::ToggleListMode);
        }
    }

    #[test]
    fn test_eject_random_with_no_ships_is_noop() {
        let mut state = SceneState::new(SceneKind::Sprites, 11);
        assert_eq!(apply(&mut state, Action::EjectRandom), None);
        assert!(state.pilots.is_empty());
    }

    #[test]
    fn test_eject_at_point() {
        let mut state = SceneState::new(SceneKind::MeteorField, 12);
        run(&mut state, 10);
        let target = state.ships.get(0).map(|s| s.pos).unwrap_or_default();
        apply(&mut state, Action::EjectAt(target));
        assert!(!state.pilots.is_empty());
        apply(&mut state, Action::EjectAt(Vec2::new(-5000.0, -5000.0)));
    }

    #[test]
    fn test_meteor_style_only_cycles_in_meteor_field() {
        let mut state = SceneState::new(SceneKind::MeteorField, 13);
        assert_eq!(
            apply(&mut state, Action::CycleMeteorStyle),
            Some(SceneEvent::MeteorStyleChanged(MeteorStyle::Fixed))
        );
        let mut other = SceneState::new(SceneKind::Sprites, 13);
        assert_eq!(apply(&mut other, Action::CycleMeteorStyle), None);
    }

    #[test]
    fn test_determinism() {
        let mut a = SceneState::new(SceneKind::MeteorField, 99);
        let mut b = SceneState::new(SceneKind::MeteorField, 99);
        for step in 0..200 {
            if step == 50 {
                apply(&mut a, Action::EjectAll);
                apply(&mut b, Action::EjectAll);
            }
            tick(&mut a, SIM_DT);
            tick(&mut b, SIM_DT);
        }
        assert_eq!(a.counts(), b.counts());
        let pa: Vec<Vec2> = a.ships.iter().map(|s| s.pos).collect();
        let pb: Vec<Vec2> = b.ships.iter().map(|s| s.pos).collect();
        assert_eq!(pa, pb);
    }
}
