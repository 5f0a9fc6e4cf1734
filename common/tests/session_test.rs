use anyhow::Result;
use common::{MatchReplay, PlayerState, ReplaySession, StandardScorer, WordMatch};

const MATCH_JSON: &str = r#"{
    "board": {
        "letters": ["CATS", "ODES", "RNGE", "LIPS"],
        "bonusGrid": [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,2]]
    },
    "boardWords": ["cat", "cats", "code", "codes", "dog"],
    "players": [
        {
            "name": "alice",
            "team": "red",
            "recording": [
                {"type": "swipe_letter", "timestamp": 1000, "x": 0, "y": 0, "word": "C"},
                {"type": "swipe_letter", "timestamp": 1200, "x": 0, "y": 1, "word": "CA"},
                {"type": "swipe_letter", "timestamp": 1400, "x": 0, "y": 2, "word": "CAT"},
                {"type": "word_submit", "timestamp": 1500, "word": "CAT"},
                {"type": "board_rotation", "timestamp": 2000, "rotation": 90}
            ]
        },
        {
            "name": "bob",
            "recording": [
                {"type": "keyboard_word", "timestamp": 500, "word": "CODE", "tracePath": [true, false, false, false, true]},
                {"type": "word_submit", "timestamp": 3000, "word": "code"}
            ],
            "initialFoundWords": ["Dog"]
        }
    ]
}"#;

fn session() -> Result<ReplaySession<StandardScorer>> {
    Ok(ReplaySession::new(MatchReplay::from_json(MATCH_JSON)?, StandardScorer))
}

#[test]
fn test_session_loads_and_derives_initial_states() -> Result<()> {
    let session = session()?;
    assert_eq!(session.max_time(), 3000.0);
    assert_eq!(session.current_time(), 0.0);
    assert_eq!(session.states().len(), 2);
    assert_eq!(session.state(0), Some(&PlayerState::default()));
    assert!(session.state(1).unwrap().found_words_set.contains("dog"));
    Ok(())
}

#[test]
fn test_players_share_the_clock() -> Result<()> {
    let mut session = session()?;
    session.seek(1450.0);

    let alice = session.state(0).unwrap();
    assert_eq!(alice.current_swipe_word, "CAT");
    let bob = session.state(1).unwrap();
    assert_eq!(bob.current_keyboard_word, "CODE");
    assert!(bob.current_keyboard_trace_path[4]);

    session.seek(5000.0);
    assert_eq!(session.current_time(), 3000.0);
    let alice = session.state(0).unwrap();
    assert_eq!(alice.score, 5);
    assert_eq!(alice.board_rotation, 90.0);
    let bob = session.state(1).unwrap();
    // code: c3 o1 d2 e1 = 7, no boojum 'S'
    assert_eq!(bob.score, 7);
    assert_eq!(bob.found_words_set.len(), 2);
    Ok(())
}

#[test]
fn test_repeated_seek_is_idempotent() -> Result<()> {
    let mut once = session()?;
    once.seek(1300.0);

    let mut twice = session()?;
    twice.seek(1300.0);
    twice.seek(1300.0);
    assert_eq!(once.states(), twice.states());

    // Backwards then forwards lands on the same state.
    twice.seek(2500.0);
    twice.seek(100.0);
    twice.seek(1300.0);
    assert_eq!(once.states(), twice.states());
    Ok(())
}

#[test]
fn test_playback_ticks_to_the_end() -> Result<()> {
    let mut session = session()?;
    session.play(10_000.0);
    assert!(session.is_playing());

    assert!(session.tick(11_450.0));
    assert_eq!(session.state(0).unwrap().current_swipe_word, "CAT");

    assert!(session.tick(20_000.0));
    assert!(!session.is_playing());
    assert_eq!(session.current_time(), 3000.0);
    assert!(!session.tick(21_000.0));

    // Playing again from the end rewinds first.
    session.play(30_000.0);
    assert_eq!(session.current_time(), 0.0);
    assert_eq!(session.state(0), Some(&PlayerState::default()));
    Ok(())
}

#[test]
fn test_reset_and_speed() -> Result<()> {
    let mut session = session()?;
    session.seek(2000.0);
    session.reset();
    assert_eq!(session.current_time(), 0.0);
    assert_eq!(session.state(0), Some(&PlayerState::default()));

    session.step_speed(true, 0.0);
    assert_eq!(session.speed(), 2.0);
    session.step_speed(false, 0.0);
    session.step_speed(false, 0.0);
    assert_eq!(session.speed(), 0.5);

    session.play(0.0);
    session.tick(2000.0);
    assert_eq!(session.current_time(), 1000.0);
    Ok(())
}

#[test]
fn test_speed_change_catching_up_to_the_end_updates_states() -> Result<()> {
    let mut session = session()?;
    session.play(0.0);
    assert!(session.tick(100.0));
    assert_eq!(session.state(0).unwrap().score, 0);

    // A long stall before the speed change runs the clock to the end.
    session.set_speed(2.0, 10_000.0);
    assert_eq!(session.current_time(), 3000.0);
    assert!(!session.is_playing());
    assert!(!session.tick(10_016.0));

    assert_eq!(session.state(0).unwrap().score, 5);
    assert!(session.state(0).unwrap().found_words_set.contains("cat"));
    assert_eq!(session.state(1).unwrap().score, 7);
    Ok(())
}

#[test]
fn test_speed_change_mid_play_keeps_states_current() -> Result<()> {
    let mut session = session()?;
    session.play(0.0);
    session.tick(100.0);

    session.step_speed(true, 1_450.0);
    assert_eq!(session.current_time(), 1_450.0);
    assert!(session.is_playing());
    assert_eq!(session.state(0).unwrap().current_swipe_word, "CAT");
    Ok(())
}

#[test]
fn test_catalog_and_total_points() -> Result<()> {
    let session = session()?;
    let found = &session.state(1).unwrap().found_words_set;
    assert_eq!(session.catalog().classify("co", found), WordMatch::Partial);
    assert_eq!(session.catalog().classify("DOG", found), WordMatch::AlreadyFound);

    // cat 5, cats 6*2, code 7, codes (8+1)*2, dog 2+1+2=5 with the boojum on 'S'
    assert_eq!(session.total_points(), 5 + 12 + 7 + 18 + 5);
    Ok(())
}

#[test]
fn test_empty_match_is_inert() -> Result<()> {
    let replay = MatchReplay::from_json(r#"{"board": {"letters": ["CATS", "ODES", "RNGE", "LIPS"]}}"#)?;
    let mut session = ReplaySession::new(replay, StandardScorer);
    session.play(0.0);
    assert!(!session.is_playing());
    assert!(!session.tick(1000.0));
    session.seek(500.0);
    assert_eq!(session.current_time(), 0.0);
    assert!(session.states().is_empty());
    Ok(())
}
