use headsup_holdem::betting::{Action, Phase};
use headsup_holdem::config::GameConfig;
use headsup_holdem::game::{Game, GameError};

#[test]
fn shoving_every_hand_ends_the_game() {
    let mut game = Game::with_seed(GameConfig::default(), 99).unwrap();
    let mut hands = 0;
    loop {
        match game.start_hand() {
            Ok(()) => {}
            Err(GameError::GameOver { winner }) => {
                assert_eq!(game.winner(), Some(winner));
                assert_eq!(game.players()[winner].stack(), 6000);
                assert_eq!(game.players()[1 - winner].stack(), 0);
                break;
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
        hands += 1;
        assert!(hands < 500, "game never ended");

        while game.phase().is_betting() {
            let legal = game.legal_actions();
            let action = if legal.all_in.is_some() { Action::AllIn } else { Action::Call };
            game.apply(action).unwrap();
        }
        assert_eq!(game.phase(), Phase::HandComplete);
        let total: u64 = game.players().iter().map(|p| p.stack()).sum();
        assert_eq!(total, 6000);
    }
}

#[test]
fn game_over_blocks_new_hands() {
    let config = GameConfig::default().with_initial_stack(200);
    let mut game = Game::with_seed(config, 7).unwrap();
    while game.winner().is_none() {
        game.start_hand().unwrap();
        while game.phase().is_betting() {
            game.apply(Action::Fold).unwrap();
        }
    }
    let winner = game.winner().unwrap();
    assert_eq!(game.start_hand(), Err(GameError::GameOver { winner }));
    assert!(game.hands_played() >= 2);
}
