//! Drive the game loop headless with the embedded assets.

use slot_jam::{
    assets::Assets,
    compositor::{BUTTONS_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH},
    input::{Button, InputState},
    surface::Surface,
    Game,
};

/// Height of a single frame in the button sheet.
const BUTTON_FRAME_HEIGHT: usize = 17;

fn game() -> Game {
    Game::new(Assets::load_embedded().expect("Error loading embedded assets"))
}

/// Whether the button buffer shows the frame at the index of the sheet.
fn shows_button_frame(buffer: &Surface, sheet: &Surface, frame: usize) -> bool {
    (0..BUTTONS_SIZE.1).all(|y| {
        (0..BUTTONS_SIZE.0).all(|x| {
            let shown = buffer.pixel(x, y).unwrap_or_default();
            let expected = sheet
                .pixel(x, y + frame * BUTTON_FRAME_HEIGHT)
                .unwrap_or_default();

            if expected.a == 0 {
                shown.a == 0
            } else {
                shown == expected
            }
        })
    })
}

#[test]
fn reels_roll_every_fifth_tick() {
    let mut game = game();
    assert_eq!(game.reels().positions(), [0, 0, 0]);

    for _ in 0..5 {
        game.update(InputState::default());
    }
    assert_eq!(game.reels().positions(), [1, 1, 1]);

    for _ in 5..30 {
        game.update(InputState::default());
    }
    assert_eq!(game.reels().positions(), [6, 6, 6]);

    for _ in 30..35 {
        game.update(InputState::default());
    }
    assert_eq!(game.reels().positions(), [0, 0, 0]);
}

#[test]
fn stopped_reels_stay_put() {
    let mut game = game();
    game.reels_mut().set_rolling(false);

    for _ in 0..100 {
        game.update(InputState::default());
    }

    assert_eq!(game.reels().positions(), [0, 0, 0]);
}

#[test]
fn score_follows_rendered_frames() {
    let mut game = game();
    assert_eq!(game.score().format(), "0000005000");

    let frame = game.render();
    assert_eq!(frame.width(), SCREEN_WIDTH);
    assert_eq!(frame.height(), SCREEN_HEIGHT);

    assert_eq!(game.score().format(), "0000005001");
}

#[test]
fn button_feedback_follows_held_buttons() {
    let mut game = game();
    let sheet = Assets::load_embedded()
        .expect("Error loading embedded assets")
        .buttons;

    game.update(InputState::with_held(&[Button::A]));
    game.render();
    assert!(shows_button_frame(game.buffers().buttons(), &sheet, 1));

    let released = InputState::from_fn(game.input(), |_| false);
    game.update(released);
    game.render();
    assert!(shows_button_frame(game.buffers().buttons(), &sheet, 0));

    game.update(InputState::from_fn(&released, |button| {
        button == Button::A || button == Button::B
    }));
    game.render();
    assert!(shows_button_frame(game.buffers().buttons(), &sheet, 3));
}

#[test]
fn start_press_pauses_the_reels() {
    let mut game = game();

    game.update(InputState::with_held(&[Button::Start]));
    assert!(!game.reels().is_rolling());

    for _ in 0..20 {
        let held = InputState::from_fn(game.input(), |button| button == Button::Start);
        game.update(held);
    }

    assert!(!game.reels().is_rolling());
    assert_eq!(game.reels().positions(), [0, 0, 0]);
}
