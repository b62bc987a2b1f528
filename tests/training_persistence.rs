//! End-to-end training plus model persistence

use std::path::PathBuf;

use uttt::{Player, QLearningAgent, Trainer, TrainingConfig};

fn temp_model_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("uttt-{}-{}.mpk", name, std::process::id()))
}

#[test]
fn trained_agent_survives_a_save_load_cycle() {
    let config = TrainingConfig {
        num_games: 50,
        agent_player: Player::X,
        seed: Some(21),
    };
    let mut trainer = Trainer::new(config);
    let mut agent = QLearningAgent::default().with_seed(22);

    trainer.run(&mut agent, |_, _| {}).unwrap();
    assert_eq!(agent.metrics().total_games, 50);
    assert!(agent.table_size() > 0);
    assert!(agent.epsilon() < 0.1);

    let path = temp_model_path("roundtrip");
    agent.save_model(&path).unwrap();

    let mut restored = QLearningAgent::default();
    assert!(restored.load_model(&path));
    std::fs::remove_file(&path).ok();

    assert_eq!(restored.table_size(), agent.table_size());
    assert_eq!(restored.epsilon(), agent.epsilon());

    let before = agent.metrics();
    let after = restored.metrics();
    assert_eq!(after.total_games, before.total_games);
    assert_eq!(after.wins, before.wins);
    assert_eq!(after.losses, before.losses);
    assert_eq!(after.draws, before.draws);
    assert_eq!(after.win_rate, before.win_rate);
    assert_eq!(after.exploration_rate, restored.epsilon());
}

#[test]
fn training_resumes_on_top_of_a_loaded_model() {
    let path = temp_model_path("resume");

    let config = TrainingConfig {
        num_games: 25,
        agent_player: Player::X,
        seed: Some(31),
    };
    let mut agent = QLearningAgent::default().with_seed(32);
    Trainer::new(config.clone()).run(&mut agent, |_, _| {}).unwrap();
    agent.save_model(&path).unwrap();

    let mut resumed = QLearningAgent::default().with_seed(33);
    assert!(resumed.load_model(&path));
    std::fs::remove_file(&path).ok();

    Trainer::new(TrainingConfig {
        seed: Some(34),
        ..config
    })
    .run(&mut resumed, |_, _| {})
    .unwrap();

    assert_eq!(resumed.metrics().total_games, 50);
    assert!(resumed.table_size() >= agent.table_size());
}

#[test]
fn missing_model_leaves_a_fresh_agent() {
    let mut agent = QLearningAgent::default();
    assert!(!agent.load_model(temp_model_path("does-not-exist")));
    assert_eq!(agent.table_size(), 0);
    assert_eq!(agent.metrics().total_games, 0);
    assert_eq!(agent.epsilon(), 0.1);
}

#[test]
fn greedy_evaluation_works_on_a_restored_agent() {
    let config = TrainingConfig {
        num_games: 40,
        agent_player: Player::X,
        seed: Some(41),
    };
    let mut agent = QLearningAgent::default().with_seed(42);
    Trainer::new(config).run(&mut agent, |_, _| {}).unwrap();

    let path = temp_model_path("evaluate");
    agent.save_model(&path).unwrap();

    let mut restored = QLearningAgent::default().with_seed(43);
    assert!(restored.load_model(&path));
    std::fs::remove_file(&path).ok();

    let games_trained = restored.metrics().total_games;
    let result = Trainer::new(TrainingConfig {
        num_games: 10,
        agent_player: Player::X,
        seed: Some(44),
    })
    .evaluate(&mut restored, 10, |_, _| {})
    .unwrap();

    assert_eq!(result.total_games, 10);
    // Evaluation neither learns nor counts games
    assert_eq!(restored.metrics().total_games, games_trained);
}
