use proptest::prelude::*;
use taskmine_core::engine::Simulation;
use taskmine_core::miner::Miner;
use taskmine_core::task::{Task, TaskKind};
use taskmine_core::wire::SimulationConfig;

proptest! {
    #[test]
    fn fleet_always_has_the_exact_byzantine_count(
        num_miners in 1u32..60,
        max_byzantine in 0u32..80,
        seed in any::<u64>(),
    ) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let fleet = Miner::spawn_fleet(num_miners, max_byzantine, 0.3, None, &mut rng);

        let flagged = fleet.iter().filter(|m| m.is_byzantine).count() as u32;
        prop_assert_eq!(flagged, max_byzantine.min(num_miners));
        prop_assert_eq!(fleet.len() as u32, num_miners);
    }

    #[test]
    fn random_alphas_stay_in_range(num_miners in 1u32..40, seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let fleet = Miner::spawn_fleet(num_miners, 0, 0.3, None, &mut rng);
        for miner in &fleet {
            prop_assert!(miner.renewable_share >= 0.0 && miner.renewable_share < 0.5);
        }
    }

    #[test]
    fn selection_weights_are_probability_shares(
        scores in proptest::collection::vec(0.0f64..1000.0, 1..30),
        pick in 0usize..30,
        seed in any::<u64>(),
    ) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut fleet = Miner::spawn_fleet(scores.len() as u32, 0, 0.3, Some(0.1), &mut rng);
        for (miner, score) in fleet.iter_mut().zip(&scores) {
            miner.reward(*score);
        }

        let total: f64 = scores.iter().sum();
        let miner = &fleet[pick % fleet.len()];
        let weight = miner.selection_weight(total, true);
        if total == 0.0 {
            prop_assert_eq!(weight, 0.01);
        } else {
            prop_assert!(weight >= 0.0 && weight <= 1.0);
        }
        prop_assert_eq!(miner.selection_weight(total, false), 1.0);
    }

    #[test]
    fn task_cost_follows_the_complexity_table(size in 1u32..200, seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        for kind in [
            TaskKind::Addition,
            TaskKind::Multiplication,
            TaskKind::Searching,
        ] {
            let task = Task::generate(kind, size, &mut rng);
            prop_assert_eq!(task.cost, size as f64);
            prop_assert_eq!(task.input_data.len(), size as usize);
        }
        let sorting = Task::generate(TaskKind::Sorting, size, &mut rng);
        prop_assert_eq!(sorting.cost, (size as f64) * (size as f64));
    }

    #[test]
    fn input_values_stay_in_published_range(size in 1u32..100, seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let task = Task::generate(TaskKind::Addition, size, &mut rng);
        for &v in &task.input_data {
            prop_assert!((1..=100).contains(&v));
        }
    }
}

proptest! {
    // Full runs are slow; a thin case budget still covers the invariant.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn any_seed_completes_and_stays_consistent(seed in any::<u64>()) {
        let config = SimulationConfig {
            num_miners: 5,
            num_tasks: 25,
            seed: Some(seed),
            ..Default::default()
        };
        let result = Simulation::new(config).unwrap().run();

        prop_assert_eq!(result.summary.total_tasks, 25);
        prop_assert!(result.summary.successful_tasks <= 25);
        prop_assert!(result.summary.success_rate >= 0.0 && result.summary.success_rate <= 1.0);
        prop_assert!(result.summary.useful_work_efficiency >= 0.0);
        prop_assert!(result.summary.useful_work_efficiency <= 1.0);

        let selections: u32 = result.miners.iter().map(|m| m.selection_count).sum();
        prop_assert_eq!(selections, 25);
        let completed: u32 = result.miners.iter().map(|m| m.tasks_completed).sum();
        prop_assert!(completed <= 25);
    }
}
