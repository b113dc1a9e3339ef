pub const PLAYERS: usize = 2;
pub const DECK_SIZE: usize = 52;

pub const HAND_CAPACITY: usize = 5;
pub const DRAW_PILE_SIZE: usize = 15;
pub const SIDE_PILE_SIZE: usize = 5;
pub const CENTER_PILE_SEED: usize = 1;

pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;
pub const MAX_NAME_LEN: usize = 32;

/// Cards consumed by one deal: every hand, draw pile, side pile and center pile.
pub const fn cards_per_deal() -> usize {
    PLAYERS * (HAND_CAPACITY + DRAW_PILE_SIZE) + 2 * SIDE_PILE_SIZE + 2 * CENTER_PILE_SEED
}
