use proptest::prelude::*;
use sundown_core::game::{base_accuracy, has_line_of_sight, line_cells, resolve_shot, trace_shot};
use sundown_core::{
    BonusKind, Combatant, Grid, Loadout, Pos, RulesConfig, SeededDice, ShotPath, ShotResult,
    WeaponKind,
};

const GLYPHS: [char; 7] = ['.', '#', '~', 'T', 'R', 'H', 'Y'];

fn grid_strategy() -> impl Strategy<Value = (Grid, Pos, Pos)> {
    (3_usize..14, 3_usize..14).prop_flat_map(|(width, height)| {
        (
            prop::collection::vec(0_usize..GLYPHS.len() * 2, width * height),
            (0..height as i32, 0..width as i32),
            (0..height as i32, 0..width as i32),
        )
            .prop_map(move |(cells, (ay, ax), (by, bx))| {
                // Half the draws land on open ground so paths are not always blocked.
                let rows: Vec<String> = cells
                    .chunks(width)
                    .map(|row| row.iter().map(|idx| GLYPHS.get(*idx).copied().unwrap_or('.')).collect())
                    .collect();
                let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                (Grid::from_rows(&rows), Pos { y: ay, x: ax }, Pos { y: by, x: bx })
            })
    })
}

fn weapon_strategy() -> impl Strategy<Value = WeaponKind> {
    prop::sample::select(WeaponKind::ALL.to_vec())
}

fn bonus_strategy() -> impl Strategy<Value = Option<BonusKind>> {
    prop::option::of(prop::sample::select(BonusKind::ALL.to_vec()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn line_of_sight_is_symmetric((grid, a, b) in grid_strategy()) {
        prop_assert_eq!(has_line_of_sight(&grid, a, b), has_line_of_sight(&grid, b, a));
        let mut back = line_cells(b, a);
        back.reverse();
        prop_assert_eq!(line_cells(a, b), back);
    }

    #[test]
    fn blocked_trace_stops_at_the_first_blocking_cell((grid, a, b) in grid_strategy()) {
        let path = trace_shot(&grid, a, b).expect("endpoints are in bounds");
        let cells = line_cells(a, b);
        match path {
            ShotPath::Blocked { cells: walked, at, terrain } => {
                prop_assert!(terrain.blocks_line_of_sight());
                prop_assert_eq!(walked.last(), Some(&at));
                prop_assert_eq!(&cells[..walked.len()], walked.as_slice());
                for pos in &walked[1..walked.len() - 1] {
                    prop_assert!(!grid.cell_at(*pos).expect("on path").blocks_line_of_sight());
                }
            }
            ShotPath::Clear { cells: walked, distance } => {
                prop_assert_eq!(walked, cells.clone());
                for pos in &cells[1..cells.len().saturating_sub(1).max(1)] {
                    prop_assert!(!grid.cell_at(*pos).expect("on path").blocks_line_of_sight());
                }
                let expected = f64::from(b.x - a.x).hypot(f64::from(b.y - a.y));
                prop_assert!((distance - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn base_accuracy_falls_off_monotonically(
        weapon in weapon_strategy(),
        near in 0.0_f64..40.0,
        extra in 0.0_f64..40.0,
    ) {
        let profile = weapon.profile(&RulesConfig::default());
        let range = f64::from(profile.max_range);
        let close = base_accuracy(&profile, near, range);
        let far = base_accuracy(&profile, near + extra, range);
        prop_assert!(far <= close + 1e-12);
        prop_assert!(close <= profile.max_accuracy && close >= profile.min_accuracy);
        prop_assert!(far <= profile.max_accuracy && far >= profile.min_accuracy);
    }

    #[test]
    fn health_never_drops_below_zero(
        shooter_weapon in weapon_strategy(),
        shooter_bonus in bonus_strategy(),
        target_bonus in bonus_strategy(),
        starting_health in 1_i32..150,
        gap in 1_i32..8,
        seed in any::<u64>(),
    ) {
        let rules = RulesConfig::default();
        let shooter = Combatant::new(
            "Player",
            Pos { y: 0, x: 0 },
            100,
            Loadout { weapon: shooter_weapon, bonus: shooter_bonus },
            &rules,
        );
        let mut target = Combatant::new(
            "Bandit",
            Pos { y: 0, x: gap },
            100,
            Loadout { weapon: WeaponKind::Pistol, bonus: target_bonus },
            &rules,
        );
        target.current_health = starting_health;
        let path = ShotPath::Clear { cells: Vec::new(), distance: f64::from(gap) };
        let mut dice = SeededDice::new(seed);

        let result = resolve_shot(&shooter, &mut target, &path, &rules, &mut dice)
            .expect("every weapon reaches eight tiles");
        prop_assert!(target.current_health >= 0);
        match result {
            ShotResult::Hit { damage, target_health, killed, .. } => {
                prop_assert!(damage > 0);
                prop_assert_eq!(target_health, target.current_health);
                prop_assert_eq!(killed, target.current_health == 0);
                prop_assert_eq!(target.current_health, (starting_health - damage).max(0));
            }
            ShotResult::Miss { .. } => prop_assert_eq!(target.current_health, starting_health),
        }
    }
}
